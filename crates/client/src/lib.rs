//! REST client for the campaign backend.
//!
//! Wraps the comparison, saved-jobs, and dashboard endpoints using
//! [`reqwest`]. All progress observation is client-initiated pull; the
//! backend exposes no push channel.

pub mod api;

pub use api::{ApiError, CampaignApi, SubmitResponse, SyncCompareResponse};
