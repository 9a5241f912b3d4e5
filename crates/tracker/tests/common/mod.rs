//! Scriptable mock campaign backend for tracker tests.
//!
//! Each job id can be given a script: a sequence of status payloads
//! returned in order, with the final entry repeating. Endpoints count
//! their hits so tests can assert which paths were (or were not)
//! exercised.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Default)]
pub struct MockBackend {
    pub sync_hits: AtomicUsize,
    pub async_hits: AtomicUsize,
    pub list_hits: AtomicUsize,
    pub delete_hits: AtomicUsize,
    status_hits: Mutex<HashMap<String, usize>>,
    scripts: Mutex<HashMap<String, VecDeque<Value>>>,
    delays: Mutex<HashMap<String, Duration>>,
    reports: Mutex<HashMap<String, Value>>,
    saved: Mutex<Vec<Value>>,
    pub list_fails: AtomicBool,
    job_ids: Mutex<VecDeque<String>>,
}

impl MockBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Job id handed out by the next async submission.
    pub fn queue_job_id(&self, job_id: &str) {
        self.job_ids.lock().unwrap().push_back(job_id.to_string());
    }

    /// Install the status payload sequence for a job. The last entry
    /// repeats on further polls.
    pub fn script(&self, job_id: &str, steps: Vec<Value>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(job_id.to_string(), steps.into());
    }

    /// Delay every status response for a job (to hold a request in
    /// flight past a cancellation).
    pub fn delay_status(&self, job_id: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(job_id.to_string(), delay);
    }

    pub fn seed_saved(&self, record: Value) {
        self.saved.lock().unwrap().push(record);
    }

    pub fn seed_report(&self, job_id: &str, report: Value) {
        self.reports
            .lock()
            .unwrap()
            .insert(job_id.to_string(), report);
    }

    pub fn status_hits(&self, job_id: &str) -> usize {
        self.status_hits
            .lock()
            .unwrap()
            .get(job_id)
            .copied()
            .unwrap_or(0)
    }

    /// Every request of any kind seen by the backend.
    pub fn total_hits(&self) -> usize {
        self.sync_hits.load(Ordering::SeqCst)
            + self.async_hits.load(Ordering::SeqCst)
            + self.list_hits.load(Ordering::SeqCst)
            + self.delete_hits.load(Ordering::SeqCst)
            + self.status_hits.lock().unwrap().values().sum::<usize>()
    }

    fn next_status(&self, job_id: &str) -> Option<Value> {
        let mut scripts = self.scripts.lock().unwrap();
        let queue = scripts.get_mut(job_id)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

/// Serve the mock backend on an ephemeral port, returning its base URL.
pub async fn serve(backend: Arc<MockBackend>) -> String {
    let router = Router::new()
        .route("/api/compare-lists", post(submit_async))
        .route("/api/compare-sync", post(submit_sync))
        .route("/api/compare-status/{job_id}", get(job_status))
        .route("/api/comparisons", get(list_comparisons))
        .route("/api/comparisons/{job_id}", get(load_report).delete(delete_comparison))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock backend");
    });

    format!("http://{addr}")
}

// ---- handlers ----

async fn submit_async(State(backend): State<Arc<MockBackend>>) -> Json<Value> {
    backend.async_hits.fetch_add(1, Ordering::SeqCst);
    let job_id = backend
        .job_ids
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| "job-1".to_string());
    Json(json!({"job_id": job_id, "status": "processing"}))
}

async fn submit_sync(State(backend): State<Arc<MockBackend>>) -> Json<Value> {
    backend.sync_hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({"status": "completed", "result": report(1_100)}))
}

async fn job_status(
    State(backend): State<Arc<MockBackend>>,
    Path(job_id): Path<String>,
) -> Response {
    {
        let mut hits = backend.status_hits.lock().unwrap();
        *hits.entry(job_id.clone()).or_default() += 1;
    }

    let delay = backend.delays.lock().unwrap().get(&job_id).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    match backend.next_status(&job_id) {
        Some(step) if step.get("__fail__").is_some() => {
            (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded").into_response()
        }
        Some(step) => Json(step).into_response(),
        None => (StatusCode::NOT_FOUND, "unknown job").into_response(),
    }
}

async fn list_comparisons(State(backend): State<Arc<MockBackend>>) -> Response {
    backend.list_hits.fetch_add(1, Ordering::SeqCst);
    if backend.list_fails.load(Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "listing unavailable").into_response();
    }
    let saved = backend.saved.lock().unwrap().clone();
    Json(json!({"comparisons": saved})).into_response()
}

async fn load_report(
    State(backend): State<Arc<MockBackend>>,
    Path(job_id): Path<String>,
) -> Response {
    let stored = backend.reports.lock().unwrap().get(&job_id).cloned();
    match stored {
        Some(body) => Json(body).into_response(),
        None => Json(report(500)).into_response(),
    }
}

async fn delete_comparison(
    State(backend): State<Arc<MockBackend>>,
    Path(_job_id): Path<String>,
) -> Json<Value> {
    backend.delete_hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({"success": true, "message": "deleted"}))
}

// ---- payload builders ----

pub fn report(total_new: u64) -> Value {
    json!({
        "summary": {
            "matched": total_new / 2,
            "corrected": 0,
            "added": total_new / 2,
            "deleted": 0,
            "total_old": total_new,
            "total_new": total_new
        },
        "wards": [
            {"ward": "W1", "matched": total_new / 2, "corrected": 0,
             "added": total_new / 2, "deleted": 0}
        ]
    })
}

pub fn queued(job_id: &str) -> Value {
    json!({"job_id": job_id, "status": "queued", "progress": 0})
}

pub fn processing(job_id: &str, progress: u8) -> Value {
    json!({"job_id": job_id, "status": "processing", "progress": progress})
}

pub fn completed(job_id: &str, total_new: u64) -> Value {
    json!({
        "job_id": job_id,
        "status": "completed",
        "progress": 100,
        "result": report(total_new)
    })
}

pub fn errored(job_id: &str, message: &str) -> Value {
    json!({"job_id": job_id, "status": "error", "message": message})
}

pub fn failing() -> Value {
    json!({"__fail__": true})
}

pub fn saved_record(job_id: &str, status: &str) -> Value {
    json!({
        "job_id": job_id,
        "old_list_id": "list-a",
        "new_list_id": "list-b",
        "status": status,
        "created_at": "2026-08-01T10:00:00Z",
        "old_record_count": 500,
        "new_record_count": 550
    })
}

/// Poll `cond` until it holds or a 5-second deadline passes.
pub async fn eventually<F, Fut>(mut cond: F, what: &str)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        if cond().await {
            return;
        }
        if tokio::time::Instant::now() > deadline {
            panic!("timed out waiting for {what}");
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
