//! Page-level job tracking orchestrator.
//!
//! [`CompareTracker`] owns the page's shared mutable state: the
//! single active [`PollSession`] slot and the
//! current [`JobView`]. Submission routes between the synchronous
//! fast-path and the job-based path, enforces pre-dispatch validation,
//! and converges the resume path for saved jobs onto the same poller
//! contract as fresh submission.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, RwLock};

use canvass_client::{ApiError, CampaignApi};
use canvass_core::error::CoreError;
use canvass_core::job::SavedComparison;
use canvass_core::options::{validate_operands, CompareOptions};
use canvass_core::routing::{choose_path, ExecutionPath};
use canvass_core::status::JobStatus;

use crate::events::TrackerEvent;
use crate::session::{PollConfig, PollSession};
use crate::view::JobView;

/// Broadcast channel capacity for tracker events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// How a submission was executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Synchronous fast-path: the result was reconciled directly, no
    /// job id was assigned and no polling occurs.
    Completed,
    /// Job-based path: a poll session is now tracking `job_id`.
    Tracking { job_id: String },
}

/// Errors surfaced by the tracker.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Rejected before dispatch; never reached the network.
    #[error("Invalid submission: {0}")]
    Invalid(#[from] CoreError),

    /// A backend call failed (transport or non-2xx).
    #[error("Backend call failed: {0}")]
    Api(#[from] ApiError),

    /// The saved job cannot be loaded in its current state.
    #[error("Cannot load saved comparison: {0}")]
    NotLoadable(String),
}

/// Owns one page's job-tracking state.
///
/// Created once per view via [`CompareTracker::new`]; the returned
/// `Arc` can be cheaply cloned wherever the page needs it.
pub struct CompareTracker {
    api: Arc<CampaignApi>,
    config: PollConfig,
    view: Arc<Mutex<JobView>>,
    /// The single active session slot; clear-before-set.
    session: Mutex<Option<PollSession>>,
    /// Generation currently authorized to mutate the view. `0` means
    /// none; sessions are numbered from 1.
    active_generation: Arc<AtomicU64>,
    generations: AtomicU64,
    /// Cached saved-comparisons list, refreshed best-effort.
    saved: RwLock<Vec<SavedComparison>>,
    event_tx: broadcast::Sender<TrackerEvent>,
}

impl CompareTracker {
    /// Create a tracker with the default 2-second poll interval.
    pub fn new(api: Arc<CampaignApi>) -> Arc<Self> {
        Self::with_config(api, PollConfig::default())
    }

    pub fn with_config(api: Arc<CampaignApi>, config: PollConfig) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            api,
            config,
            view: Arc::new(Mutex::new(JobView::new())),
            session: Mutex::new(None),
            active_generation: Arc::new(AtomicU64::new(0)),
            generations: AtomicU64::new(0),
            saved: RwLock::new(Vec::new()),
            event_tx,
        })
    }

    /// Subscribe to tracker events.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.event_tx.subscribe()
    }

    /// Snapshot of the current view state.
    pub async fn view(&self) -> JobView {
        self.view.lock().await.clone()
    }

    /// Submit a comparison.
    ///
    /// Validates operands and options before any network call, tears
    /// down any prior poll session, then routes to the synchronous or
    /// job-based path per [`choose_path`]. On either success the
    /// saved-jobs cache is refreshed best-effort. On failure a single
    /// user-facing message lands in the view and no partial state is
    /// committed.
    pub async fn submit(
        &self,
        old_list_id: &str,
        new_list_id: &str,
        options: CompareOptions,
    ) -> Result<SubmitOutcome, TrackerError> {
        validate_operands(old_list_id, new_list_id)?;
        options.check()?;

        // Clear-before-set: at most one live session per tracker.
        self.stop_tracking().await;

        let path = choose_path(&options);
        tracing::info!(
            old_list_id,
            new_list_id,
            ?path,
            "Submitting comparison",
        );

        match path {
            ExecutionPath::Sync => {
                let response = match self
                    .api
                    .submit_compare_sync(old_list_id, new_list_id, &options)
                    .await
                {
                    Ok(response) => response,
                    Err(e) => return Err(self.fail_submission(e).await),
                };

                self.view.lock().await.complete(response.result, None);
                let _ = self.event_tx.send(TrackerEvent::Completed { job_id: None });
                self.refresh_saved().await;
                Ok(SubmitOutcome::Completed)
            }
            ExecutionPath::Async => {
                let response = match self
                    .api
                    .submit_compare(old_list_id, new_list_id, &options)
                    .await
                {
                    Ok(response) => response,
                    Err(e) => return Err(self.fail_submission(e).await),
                };

                tracing::info!(job_id = %response.job_id, "Comparison job queued");
                self.view.lock().await.begin(Some(response.job_id.clone()));
                self.start_session(response.job_id.clone()).await;
                self.refresh_saved().await;
                Ok(SubmitOutcome::Tracking {
                    job_id: response.job_id,
                })
            }
        }
    }

    /// Stop any active poll session without touching view state.
    ///
    /// Idempotent: stopping an already-stopped (or never-started)
    /// tracker is a no-op. An in-flight status response is not aborted,
    /// but revoking the active generation guarantees it is discarded.
    pub async fn stop_tracking(&self) {
        self.active_generation.store(0, Ordering::SeqCst);
        if let Some(session) = self.session.lock().await.take() {
            tracing::debug!(job_id = session.job_id(), "Stopping poll session");
            session.stop();
        }
    }

    /// Refresh the saved-comparisons cache. Best-effort: a failure is
    /// logged and leaves the cache unchanged, never blocking the
    /// primary tracking flow.
    pub async fn refresh_saved(&self) {
        match self.api.list_comparisons().await {
            Ok(list) => {
                let count = list.len();
                *self.saved.write().await = list;
                let _ = self
                    .event_tx
                    .send(TrackerEvent::SavedListRefreshed { count });
            }
            Err(e) => {
                tracing::warn!(error = %e, "Saved-comparisons refresh failed, keeping cache");
            }
        }
    }

    /// Cached saved comparisons from the last successful refresh.
    pub async fn saved(&self) -> Vec<SavedComparison> {
        self.saved.read().await.clone()
    }

    /// Load a saved comparison.
    ///
    /// Completed jobs fetch the full report directly; still-active jobs
    /// resume a poll session on their `job_id`, identical to a fresh
    /// submission.
    pub async fn load_saved(
        &self,
        record: &SavedComparison,
    ) -> Result<SubmitOutcome, TrackerError> {
        if record.status.is_terminal() {
            if record.status != JobStatus::Completed {
                return Err(TrackerError::NotLoadable(format!(
                    "saved comparison {} ended in error",
                    record.job_id
                )));
            }
            let report = self.api.load_report(&record.job_id).await?;
            self.stop_tracking().await;
            self.view
                .lock()
                .await
                .complete(report, Some(record.job_id.clone()));
            let _ = self.event_tx.send(TrackerEvent::Completed {
                job_id: Some(record.job_id.clone()),
            });
            return Ok(SubmitOutcome::Completed);
        }

        if !record.status.is_active() {
            return Err(TrackerError::NotLoadable(format!(
                "saved comparison {} is not running",
                record.job_id
            )));
        }

        // Resume: converge on the same poller contract as submission.
        self.stop_tracking().await;
        tracing::info!(job_id = %record.job_id, "Resuming poll session for saved job");
        self.view.lock().await.begin(Some(record.job_id.clone()));
        self.start_session(record.job_id.clone()).await;
        Ok(SubmitOutcome::Tracking {
            job_id: record.job_id.clone(),
        })
    }

    /// Delete a saved comparison. The cache is updated only after the
    /// backend confirms; there is no speculative local removal.
    pub async fn delete_saved(&self, job_id: &str) -> Result<(), TrackerError> {
        self.api.delete_comparison(job_id).await?;
        self.saved.write().await.retain(|c| c.job_id != job_id);
        tracing::info!(job_id, "Saved comparison deleted");
        Ok(())
    }

    /// Dismiss a terminal banner, returning the view to idle.
    pub async fn acknowledge(&self) {
        self.view.lock().await.acknowledge();
    }

    /// Stop tracking and wait (bounded) for the poll task to exit.
    pub async fn shutdown(&self) {
        self.active_generation.store(0, Ordering::SeqCst);
        if let Some(session) = self.session.lock().await.take() {
            session.shutdown().await;
        }
    }

    // ---- private helpers ----

    /// Authorize and install a new poll session for `job_id`.
    async fn start_session(&self, job_id: String) {
        let generation = self.generations.fetch_add(1, Ordering::SeqCst) + 1;
        self.active_generation.store(generation, Ordering::SeqCst);

        let session = PollSession::spawn(
            Arc::clone(&self.api),
            job_id,
            self.config.interval,
            Arc::clone(&self.view),
            self.event_tx.clone(),
            Arc::clone(&self.active_generation),
            generation,
        );

        // The slot was already cleared by `stop_tracking`; replacing a
        // straggler here still cancels it via Drop.
        *self.session.lock().await = Some(session);
    }

    /// Record a submission failure in the view and hand the error back
    /// to the caller.
    async fn fail_submission(&self, error: ApiError) -> TrackerError {
        let message = user_message(&error);
        tracing::warn!(error = %error, "Submission failed");
        self.view.lock().await.fail(message.clone());
        let _ = self.event_tx.send(TrackerEvent::Failed {
            job_id: None,
            error: message,
        });
        TrackerError::Api(error)
    }
}

/// Collapse an API error to the single user-facing message the view
/// displays: backend-reported bodies verbatim, transport problems as a
/// generic connectivity message.
fn user_message(error: &ApiError) -> String {
    match error {
        ApiError::Api { body, .. } if !body.is_empty() => body.clone(),
        ApiError::Refused(message) => message.clone(),
        _ => "Could not reach the campaign backend".to_string(),
    }
}
