#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A value failed a range or format check.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Two inputs are individually valid but cannot be combined.
    #[error("Conflict: {0}")]
    Conflict(String),
}
