//! Error types for the shared data model.

use thiserror::Error;

/// Errors raised by strict conversions in the data model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An impact string did not name any [`ImpactLevel`](crate::ImpactLevel).
    #[error("unknown impact level: {0}")]
    UnknownImpact(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
