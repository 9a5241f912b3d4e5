//! Shared domain types for the canvass job-tracking client.
//!
//! Pure data and validation logic with no I/O: the job status model,
//! wire payload types, submission options, and the sync/async routing
//! heuristic. Network code lives in `canvass-client`, the poll-loop
//! protocol in `canvass-tracker`.

pub mod config;
pub mod error;
pub mod job;
pub mod options;
pub mod routing;
pub mod status;
pub mod types;
