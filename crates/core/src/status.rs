//! Job status model.
//!
//! A job is in exactly one state at any instant. Transitions are
//! monotonic: an active job may move forward to `Completed` or `Error`,
//! never backward, and the terminal states admit no further
//! transitions. The backend also reports `pending` for jobs discovered
//! already queued; the client treats it like `queued`.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a comparison job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// No job submitted (client-side only, never on the wire).
    Idle,
    /// Accepted by the backend, waiting for a worker.
    Queued,
    /// Synonym for `Queued` used by the backend for jobs discovered
    /// already in the queue.
    Pending,
    /// A worker is computing the comparison.
    Processing,
    /// Finished successfully; a result payload is available.
    Completed,
    /// Finished with a backend-reported error message.
    Error,
}

impl JobStatus {
    /// Terminal states admit no further polling.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    /// States in which the job is live on the backend and worth polling.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            JobStatus::Queued | JobStatus::Pending | JobStatus::Processing
        )
    }

    /// Whether moving from `self` to `next` respects the monotonic
    /// transition rule.
    pub fn can_transition_to(self, next: JobStatus) -> bool {
        match self {
            JobStatus::Idle => next != JobStatus::Idle,
            JobStatus::Queued | JobStatus::Pending => matches!(
                next,
                JobStatus::Queued
                    | JobStatus::Pending
                    | JobStatus::Processing
                    | JobStatus::Completed
                    | JobStatus::Error
            ),
            JobStatus::Processing => matches!(
                next,
                JobStatus::Processing | JobStatus::Completed | JobStatus::Error
            ),
            JobStatus::Completed | JobStatus::Error => false,
        }
    }
}
