use thiserror::Error;

/// Batch-level failures. Row-level problems are never reported here; they
/// travel as [`crate::model::FieldError`] values inside the report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// The input had no data rows.
    #[error("input contains no data rows")]
    EmptyInput,
}
