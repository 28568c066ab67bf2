//! Fact repository errors.

use thiserror::Error;

/// Failure of the underlying fact store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FactError {
    /// Store unreachable.
    #[error("Fact store unavailable: {0}")]
    Unavailable(String),

    /// Query failed.
    #[error("Fact query failed: {0}")]
    Query(String),

    /// Write refused because the fact itself is invalid.
    #[error("Fact rejected: {0}")]
    Rejected(String),
}
