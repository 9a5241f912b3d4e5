//! Sync/async execution routing.
//!
//! Small comparisons can be executed on the backend's synchronous
//! endpoint, which blocks until the final result is returned directly
//! (no job id, no polling). The routing rule uses a cheap size estimate
//! from locally known record counts; when no counts are known the size
//! is treated as unbounded and the job-based path is used.

use crate::config::SYNC_SIZE_THRESHOLD;
use crate::options::CompareOptions;

/// Which backend execution path a submission should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPath {
    /// Blocking endpoint returning the result directly.
    Sync,
    /// Job-based endpoint returning a `job_id` to poll.
    Async,
}

/// Sum of the known operand record counts, or `None` when neither
/// operand's size is known locally.
pub fn estimated_size(options: &CompareOptions) -> Option<u64> {
    match (options.old_record_count, options.new_record_count) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(0) + b.unwrap_or(0)),
    }
}

/// Apply the routing rule: synchronous only when the caller prefers it
/// AND the estimated size is known and below [`SYNC_SIZE_THRESHOLD`].
pub fn choose_path(options: &CompareOptions) -> ExecutionPath {
    if !options.prefer_sync {
        return ExecutionPath::Async;
    }
    match estimated_size(options) {
        Some(size) if size < SYNC_SIZE_THRESHOLD => ExecutionPath::Sync,
        _ => ExecutionPath::Async,
    }
}
