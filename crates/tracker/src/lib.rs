//! Async job-tracking protocol for the campaign backend.
//!
//! Owns the lifecycle of long-running comparison jobs on the client
//! side: submission routing (sync fast-path vs. job-based path), a
//! single owned poll loop per tracker ([`session::PollSession`]),
//! reconciliation of terminal outcomes into view state
//! ([`view::JobView`]), and saved-comparison browsing with resume.
//!
//! Tracker-level events are broadcast via a [`tokio::sync::broadcast`]
//! channel; call [`tracker::CompareTracker::subscribe`] to receive them.

pub mod events;
pub mod session;
pub mod tracker;
pub mod view;

pub use events::TrackerEvent;
pub use session::{PollConfig, PollSession};
pub use tracker::{CompareTracker, SubmitOutcome, TrackerError};
pub use view::{DisplayedResult, JobView, ViewPhase};
