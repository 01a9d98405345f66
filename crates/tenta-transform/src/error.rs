//! Error types for the reconciliation transform.

use chrono::NaiveDate;
use thiserror::Error;

/// Structural problems with a merge or import request.
///
/// Row-level problems never surface here; they become skipped or
/// out-of-validity records instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    /// Input table has no rows at all, not even a header.
    #[error("{table} has no header row")]
    MissingHeader { table: String },

    /// Validity window of zero months.
    #[error("validity window must span at least one month")]
    EmptyWindow,

    /// Window start cannot be computed for the reference date.
    #[error("reference date {as_of} is out of range for a {months}-month window")]
    ReferenceDateOutOfRange { as_of: NaiveDate, months: u32 },

    /// Date range whose start is after its end.
    #[error("date range starts after it ends ({start} > {end})")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
