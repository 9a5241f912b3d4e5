//! HTTP wrapper for the campaign backend REST API.
//!
//! Covers comparison submission (sync and job-based), job status
//! polling, saved-comparison browsing, and the dashboard summary
//! endpoint. Non-2xx responses are surfaced with their status and body
//! so callers can show a meaningful message.

use serde::{Deserialize, Serialize};

use canvass_core::config::REQUEST_TIMEOUT;
use canvass_core::job::{CompareReport, DashboardSummary, JobSnapshot, SavedComparison};
use canvass_core::options::CompareOptions;
use canvass_core::status::JobStatus;

/// HTTP client for a single campaign backend.
pub struct CampaignApi {
    client: reqwest::Client,
    base_url: String,
}

/// Response returned by the async comparison endpoint after queuing a
/// job.
#[derive(Debug, Deserialize)]
pub struct SubmitResponse {
    /// Server-assigned identifier for the queued job.
    pub job_id: String,
    pub status: JobStatus,
}

/// Response returned by the synchronous fast-path endpoint. The result
/// is final; no job id is assigned and no polling occurs.
#[derive(Debug, Deserialize)]
pub struct SyncCompareResponse {
    pub status: JobStatus,
    pub result: CompareReport,
}

/// Request body shared by both comparison endpoints.
#[derive(Debug, Serialize)]
struct CompareRequest<'a> {
    old_list_id: &'a str,
    new_list_id: &'a str,
    name_threshold: f64,
    relative_threshold: f64,
}

#[derive(Debug, Deserialize)]
struct ComparisonList {
    comparisons: Vec<SavedComparison>,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    success: bool,
    message: Option<String>,
}

/// Errors from the backend REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("Backend API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The backend answered 2xx but refused the operation.
    #[error("Backend refused: {0}")]
    Refused(String),
}

impl CampaignApi {
    /// Create a new API client for the backend at `base_url`.
    ///
    /// The underlying client carries a per-request timeout so a hung
    /// poll cannot stall failure detection indefinitely.
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a comparison on the job-based path.
    ///
    /// Sends `POST /api/compare-lists` and returns the server-assigned
    /// `job_id` to poll.
    pub async fn submit_compare(
        &self,
        old_list_id: &str,
        new_list_id: &str,
        options: &CompareOptions,
    ) -> Result<SubmitResponse, ApiError> {
        let body = CompareRequest {
            old_list_id,
            new_list_id,
            name_threshold: options.name_threshold,
            relative_threshold: options.relative_threshold,
        };

        let response = self
            .client
            .post(format!("{}/api/compare-lists", self.base_url))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Submit a comparison on the synchronous fast-path.
    ///
    /// Sends `POST /api/compare-sync` and blocks until the backend
    /// returns the final result directly.
    pub async fn submit_compare_sync(
        &self,
        old_list_id: &str,
        new_list_id: &str,
        options: &CompareOptions,
    ) -> Result<SyncCompareResponse, ApiError> {
        let body = CompareRequest {
            old_list_id,
            new_list_id,
            name_threshold: options.name_threshold,
            relative_threshold: options.relative_threshold,
        };

        let response = self
            .client
            .post(format!("{}/api/compare-sync", self.base_url))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the current status snapshot for a job.
    ///
    /// Sends `GET /api/compare-status/{job_id}`.
    pub async fn job_status(&self, job_id: &str) -> Result<JobSnapshot, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/compare-status/{}", self.base_url, job_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// List saved comparisons.
    ///
    /// Sends `GET /api/comparisons`.
    pub async fn list_comparisons(&self) -> Result<Vec<SavedComparison>, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/comparisons", self.base_url))
            .send()
            .await?;

        let list: ComparisonList = Self::parse_response(response).await?;
        Ok(list.comparisons)
    }

    /// Load the full report of a completed saved comparison.
    ///
    /// Sends `GET /api/comparisons/{job_id}`.
    pub async fn load_report(&self, job_id: &str) -> Result<CompareReport, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/comparisons/{}", self.base_url, job_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Delete a saved comparison.
    ///
    /// Sends `DELETE /api/comparisons/{job_id}`. A 2xx response with
    /// `success: false` maps to [`ApiError::Refused`].
    pub async fn delete_comparison(&self, job_id: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!("{}/api/comparisons/{}", self.base_url, job_id))
            .send()
            .await?;

        let confirm: DeleteResponse = Self::parse_response(response).await?;
        if !confirm.success {
            return Err(ApiError::Refused(
                confirm
                    .message
                    .unwrap_or_else(|| "delete rejected".to_string()),
            ));
        }
        Ok(())
    }

    /// Fetch the election-day dashboard summary.
    ///
    /// Sends `GET /api/dashboard/summary`.
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/dashboard/summary", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
