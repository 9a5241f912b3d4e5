//! Wire payload types for the campaign backend.
//!
//! The comparison result has an explicit schema and deserialization
//! fails loudly on shape mismatch, so backend/frontend drift surfaces
//! as an error instead of silently rendering empty data.

use serde::{Deserialize, Serialize};

use crate::status::JobStatus;
use crate::types::{JobId, Timestamp};

/// Client-side mirror of one backend job, as returned by the status
/// endpoint. The backend is the sole source of truth; this is only the
/// last-fetched snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub job_id: JobId,
    pub status: JobStatus,
    /// Percentage 0-100. The backend omits it while queued.
    #[serde(default)]
    pub progress: u8,
    /// Present only when `status` is `Completed`.
    pub result: Option<CompareReport>,
    /// Present only when `status` is `Error`.
    pub message: Option<String>,
}

/// Full result of a voter-list comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareReport {
    pub summary: CompareSummary,
    /// Per-ward breakdown of the four match buckets.
    pub wards: Vec<WardBreakdown>,
}

/// Roll-up counts across all wards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareSummary {
    /// Records present in both rolls with matching names.
    pub matched: u64,
    /// Records matched by fuzzy similarity with corrected fields.
    pub corrected: u64,
    /// Records only in the new roll.
    pub added: u64,
    /// Records only in the old roll.
    pub deleted: u64,
    pub total_old: u64,
    pub total_new: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WardBreakdown {
    pub ward: String,
    pub matched: u64,
    pub corrected: u64,
    pub added: u64,
    pub deleted: u64,
}

/// Backend-persisted summary of a past comparison, as returned by the
/// saved-jobs listing. Read-only from the client except for delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedComparison {
    pub job_id: JobId,
    pub old_list_id: String,
    pub new_list_id: String,
    pub status: JobStatus,
    pub created_at: Timestamp,
    /// Known record counts, when the backend has them.
    pub old_record_count: Option<u64>,
    pub new_record_count: Option<u64>,
}

/// Election-day dashboard snapshot, fetched on the auto-refresh path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_voters: u64,
    pub voted: u64,
    pub wards_reporting: u32,
    pub wards_total: u32,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_progress_defaults_to_zero() {
        let json = r#"{"job_id":"abc","status":"queued","result":null,"message":null}"#;
        let snap: JobSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.progress, 0);
        assert_eq!(snap.status, JobStatus::Queued);
    }

    #[test]
    fn snapshot_with_result_parses() {
        let json = r#"{
            "job_id": "abc123",
            "status": "completed",
            "progress": 100,
            "result": {
                "summary": {
                    "matched": 400, "corrected": 50, "added": 100,
                    "deleted": 50, "total_old": 500, "total_new": 550
                },
                "wards": [
                    {"ward": "W1", "matched": 400, "corrected": 50, "added": 100, "deleted": 50}
                ]
            },
            "message": null
        }"#;
        let snap: JobSnapshot = serde_json::from_str(json).unwrap();
        let report = snap.result.unwrap();
        assert_eq!(report.summary.matched, 400);
        assert_eq!(report.wards.len(), 1);
        assert_eq!(report.wards[0].ward, "W1");
    }

    #[test]
    fn malformed_report_is_a_hard_error() {
        // Summary missing entirely: must not silently default.
        let json = r#"{"wards": []}"#;
        assert!(serde_json::from_str::<CompareReport>(json).is_err());
    }

    #[test]
    fn error_snapshot_carries_message() {
        let json = r#"{"job_id":"x","status":"error","message":"list not found"}"#;
        let snap: JobSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.status, JobStatus::Error);
        assert_eq!(snap.message.as_deref(), Some("list not found"));
        assert!(snap.result.is_none());
    }
}
