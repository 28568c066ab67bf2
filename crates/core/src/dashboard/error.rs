//! Dashboard errors.

use std::time::Duration;

use thiserror::Error;

use crate::calendar::CalendarError;
use crate::facts::FactError;

/// Errors raised while assembling a dashboard.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DashboardError {
    /// Malformed or out-of-range request input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The fact store failed.
    #[error(transparent)]
    Repository(#[from] FactError),

    /// Assembly did not finish within the deadline.
    #[error("Report not assembled within {0:?}")]
    DeadlineExceeded(Duration),
}

impl From<CalendarError> for DashboardError {
    fn from(err: CalendarError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
