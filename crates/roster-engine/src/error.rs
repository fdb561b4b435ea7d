//! Error types for the engine crate.

use thiserror::Error;

/// Errors raised when validating caller-supplied table controls.
///
/// [`compute_page`](crate::compute_page) itself never fails; these errors
/// come from the validated constructors callers use before invoking it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Page numbers are one-based.
    #[error("invalid page {0}: pages start at 1")]
    InvalidPage(usize),

    /// A page must hold at least one row.
    #[error("invalid page size {0}: must be at least 1")]
    InvalidPageSize(usize),

    /// Unrecognized sort direction.
    #[error("invalid sort direction '{0}': expected asc or desc")]
    InvalidDirection(String),

    /// Malformed sort expression.
    #[error("invalid sort '{0}': expected field or field:asc|desc")]
    InvalidSort(String),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
