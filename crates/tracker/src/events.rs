//! Tracker-level events.
//!
//! Broadcast to any number of subscribers (UI layers, logging). A sync
//! fast-path completion carries no `job_id` because the backend never
//! assigned one.

use canvass_core::status::JobStatus;

/// Events emitted while tracking comparison jobs.
#[derive(Debug, Clone)]
pub enum TrackerEvent {
    /// A non-terminal poll tick updated the job's progress.
    Progress {
        job_id: String,
        status: JobStatus,
        progress: u8,
    },

    /// A job reached terminal success and its result was reconciled.
    Completed { job_id: Option<String> },

    /// A job reached terminal failure (backend-reported or transport).
    Failed {
        job_id: Option<String>,
        error: String,
    },

    /// The saved-comparisons cache was refreshed from the backend.
    SavedListRefreshed { count: usize },
}
