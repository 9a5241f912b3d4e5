//! Owned poll-loop driver for one job.
//!
//! A [`PollSession`] wraps the recurring status check as an owned
//! resource with explicit acquire/release: spawning starts the loop,
//! [`stop`](PollSession::stop) is idempotent, and dropping the handle
//! cancels the task. The loop issues exactly one status request per
//! tick and awaits it before the next tick, so there is never more than
//! one outstanding request per session.
//!
//! Stale-response immunity: each session carries a generation number
//! checked against the tracker's active-generation slot after every
//! response. A response that lands after the session was stopped or
//! superseded is discarded without touching view state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use canvass_client::CampaignApi;
use canvass_core::config::COMPARE_POLL_INTERVAL;
use canvass_core::status::JobStatus;

use crate::events::TrackerEvent;
use crate::view::JobView;

/// Tunable parameters for the poll loop.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between status requests.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: COMPARE_POLL_INTERVAL,
        }
    }
}

/// Handle to one live poll loop.
pub struct PollSession {
    job_id: String,
    cancel: CancellationToken,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl PollSession {
    /// Spawn the poll task for `job_id`.
    ///
    /// `generation` must already be stored in `active_generation`; the
    /// task discards any response observed while the slot no longer
    /// matches.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn spawn(
        api: Arc<CampaignApi>,
        job_id: String,
        interval: Duration,
        view: Arc<Mutex<JobView>>,
        event_tx: broadcast::Sender<TrackerEvent>,
        active_generation: Arc<AtomicU64>,
        generation: u64,
    ) -> Self {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let task_job_id = job_id.clone();

        let handle = tokio::spawn(async move {
            tracing::debug!(job_id = %task_job_id, generation, "Poll session started");
            run_poll_loop(
                api,
                task_job_id.clone(),
                interval,
                task_cancel,
                view,
                event_tx,
                active_generation,
                generation,
            )
            .await;
            tracing::debug!(job_id = %task_job_id, generation, "Poll session exited");
        });

        Self {
            job_id,
            cancel,
            handle: Some(handle),
        }
    }

    /// Job id this session is tracking.
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Stop the poll loop. Safe to call any number of times, including
    /// after the loop already terminated on its own.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stop the loop and wait (bounded) for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }
    }
}

impl Drop for PollSession {
    fn drop(&mut self) {
        // View teardown must never leave a dangling timer behind.
        self.cancel.cancel();
    }
}

/// One status request per tick until a terminal state, cancellation, or
/// a transport failure (fail-fast: a single failed poll ends the
/// session rather than risking an orphaned timer).
#[allow(clippy::too_many_arguments)]
async fn run_poll_loop(
    api: Arc<CampaignApi>,
    job_id: String,
    interval: Duration,
    cancel: CancellationToken,
    view: Arc<Mutex<JobView>>,
    event_tx: broadcast::Sender<TrackerEvent>,
    active_generation: Arc<AtomicU64>,
    generation: u64,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_status = JobStatus::Idle;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(job_id = %job_id, "Poll session cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }

        let outcome = api.job_status(&job_id).await;

        // The session may have been stopped or superseded while the
        // request was in flight; such a response must not mutate state.
        // Re-checking under the view lock makes guard and mutation
        // atomic: a new job's `begin` runs under the same lock, so a
        // stale response can never interleave past the check.
        let mut current = view.lock().await;
        if cancel.is_cancelled() || active_generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(job_id = %job_id, generation, "Discarding stale poll response");
            return;
        }

        let snapshot = match outcome {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(job_id = %job_id, error = %e, "Status poll failed, ending session");
                let message = "Could not reach the campaign backend".to_string();
                current.fail(message.clone());
                let _ = event_tx.send(TrackerEvent::Failed {
                    job_id: Some(job_id),
                    error: message,
                });
                return;
            }
        };

        if snapshot.job_id != job_id {
            // Response targeted at a different job: no-op.
            tracing::warn!(
                expected = %job_id,
                received = %snapshot.job_id,
                "Status response for unexpected job id, ignoring",
            );
            continue;
        }

        if !last_status.can_transition_to(snapshot.status) {
            // Out-of-order or drifting backend response; statuses only
            // move forward, so a regressive snapshot is a no-op.
            tracing::warn!(
                job_id = %job_id,
                from = ?last_status,
                to = ?snapshot.status,
                "Ignoring non-monotonic status transition",
            );
            continue;
        }
        last_status = snapshot.status;

        match snapshot.status {
            JobStatus::Completed => {
                match snapshot.result {
                    Some(report) => {
                        current.complete(report, Some(job_id.clone()));
                        let _ = event_tx.send(TrackerEvent::Completed {
                            job_id: Some(job_id),
                        });
                    }
                    None => {
                        // Completed without a payload is backend drift;
                        // fail loudly instead of rendering nothing.
                        let message = "Backend reported completion without a result".to_string();
                        tracing::error!(job_id = %job_id, "{message}");
                        current.fail(message.clone());
                        let _ = event_tx.send(TrackerEvent::Failed {
                            job_id: Some(job_id),
                            error: message,
                        });
                    }
                }
                return;
            }
            JobStatus::Error => {
                let message = snapshot
                    .message
                    .unwrap_or_else(|| "Comparison failed".to_string());
                tracing::info!(job_id = %job_id, error = %message, "Job reported failure");
                current.fail(message.clone());
                let _ = event_tx.send(TrackerEvent::Failed {
                    job_id: Some(job_id),
                    error: message,
                });
                return;
            }
            status => {
                current.set_progress(snapshot.progress);
                let _ = event_tx.send(TrackerEvent::Progress {
                    job_id: job_id.clone(),
                    status,
                    progress: snapshot.progress,
                });
            }
        }
    }
}
