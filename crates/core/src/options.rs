//! Submission options and pre-dispatch validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Named options for one comparison submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareOptions {
    /// Minimum fuzzy-similarity score for a voter-name match.
    #[validate(range(min = 0.0, max = 1.0))]
    pub name_threshold: f64,

    /// Minimum fuzzy-similarity score for a relative-name match.
    #[validate(range(min = 0.0, max = 1.0))]
    pub relative_threshold: f64,

    /// Prefer the synchronous fast-path when the operands are small
    /// enough (see [`crate::routing`]).
    pub prefer_sync: bool,

    /// Known record counts for the operands, when list metadata is
    /// available locally. Used only for routing, never sent to the
    /// backend.
    #[serde(skip)]
    pub old_record_count: Option<u64>,
    #[serde(skip)]
    pub new_record_count: Option<u64>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            name_threshold: 0.85,
            relative_threshold: 0.75,
            prefer_sync: false,
            old_record_count: None,
            new_record_count: None,
        }
    }
}

impl CompareOptions {
    /// Validate threshold ranges, mapping validator output to a single
    /// [`CoreError::Validation`].
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))
    }
}

/// Reject a submission whose operands resolve to the same list.
///
/// Validated before dispatch; this must never reach the network.
pub fn validate_operands(old_list_id: &str, new_list_id: &str) -> Result<(), CoreError> {
    if old_list_id.trim().is_empty() || new_list_id.trim().is_empty() {
        return Err(CoreError::Validation(
            "Both list identifiers must be non-empty".to_string(),
        ));
    }
    if old_list_id == new_list_id {
        return Err(CoreError::Conflict(format!(
            "Cannot compare list '{old_list_id}' against itself"
        )));
    }
    Ok(())
}
