//! Client-side constants and environment variable names.
//!
//! Polling intervals are client-side constants, not negotiated with the
//! server; the backend exposes no push channel, so all progress
//! observation is pull.

use std::time::Duration;

/// Interval between status polls for an active comparison job.
pub const COMPARE_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Interval between dashboard summary refreshes.
pub const DASHBOARD_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Summed record count below which the synchronous fast-path may be
/// used (see [`crate::routing::choose_path`]).
pub const SYNC_SIZE_THRESHOLD: u64 = 5_000;

/// Per-request timeout on backend HTTP calls. A hung poll request must
/// not stall failure detection indefinitely.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URL of the campaign backend, e.g. `http://localhost:8000`.
pub const ENV_API_URL: &str = "CANVASS_API_URL";

/// Dashboard refresh interval override in seconds.
pub const ENV_REFRESH_SECS: &str = "CANVASS_REFRESH_SECS";
