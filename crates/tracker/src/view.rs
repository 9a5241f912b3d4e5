//! View-state reconciliation.
//!
//! [`JobView`] is the client-side mirror the UI renders from. It only
//! ever reflects outcomes handed to it; it never computes job state
//! itself. On terminal success the displayed result is replaced
//! wholesale; on terminal failure a single error message is set and the
//! previous job's result -- if any -- is kept but marked stale, so the
//! UI can distinguish "stale success from an earlier job" from "current
//! job's result".

use canvass_core::job::CompareReport;

/// Where the view is in the job lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// No job in flight.
    Idle,
    /// A job is live and being polled.
    Tracking,
    /// The most recent job finished successfully.
    Completed,
    /// The most recent job failed; `error` holds the banner message.
    Failed,
}

/// A result payload retained for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedResult {
    pub report: CompareReport,
    /// Backend job id the report came from; `None` for the synchronous
    /// fast-path, which never assigns one.
    pub job_id: Option<String>,
    /// True once a newer job has superseded this result.
    pub stale: bool,
}

/// Client-side view state for one comparison page.
#[derive(Debug, Clone)]
pub struct JobView {
    phase: ViewPhase,
    job_id: Option<String>,
    progress: u8,
    result: Option<DisplayedResult>,
    error: Option<String>,
}

impl Default for JobView {
    fn default() -> Self {
        Self::new()
    }
}

impl JobView {
    pub fn new() -> Self {
        Self {
            phase: ViewPhase::Idle,
            job_id: None,
            progress: 0,
            result: None,
            error: None,
        }
    }

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    /// Job id currently being tracked, if any.
    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    /// Last-fetched progress percentage for the tracked job.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn result(&self) -> Option<&DisplayedResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enter tracking for a new job. Any retained result now belongs to
    /// a previous job and is marked stale.
    pub fn begin(&mut self, job_id: Option<String>) {
        self.phase = ViewPhase::Tracking;
        self.job_id = job_id;
        self.progress = 0;
        self.error = None;
        if let Some(result) = self.result.as_mut() {
            result.stale = true;
        }
    }

    /// Record a non-terminal progress update.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
    }

    /// Apply terminal success: the displayed result is replaced
    /// entirely.
    ///
    /// Pagination or filter cursors held by the page against the old
    /// result are the page's responsibility to reset; the view only
    /// swaps the payload.
    pub fn complete(&mut self, report: CompareReport, job_id: Option<String>) {
        self.phase = ViewPhase::Completed;
        self.progress = 100;
        self.error = None;
        self.job_id = job_id.clone();
        self.result = Some(DisplayedResult {
            report,
            job_id,
            stale: false,
        });
    }

    /// Apply terminal failure: one message, no partial merge, previous
    /// result left in place (already marked stale by [`begin`](Self::begin)).
    pub fn fail(&mut self, message: String) {
        self.phase = ViewPhase::Failed;
        self.error = Some(message);
    }

    /// Dismiss a terminal banner and return to idle. The retained
    /// result survives so the page can keep rendering it.
    pub fn acknowledge(&mut self) {
        if matches!(self.phase, ViewPhase::Completed | ViewPhase::Failed) {
            self.phase = ViewPhase::Idle;
            self.error = None;
        }
    }
}
