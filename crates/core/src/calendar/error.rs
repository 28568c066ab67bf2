//! Calendar error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised while building date ranges or parsing calendar input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// End date precedes start date.
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Date could not be parsed or built.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Year outside the supported calendar.
    #[error("Year {0} is out of range")]
    YearOutOfRange(i32),

    /// Unknown granularity name.
    #[error("Unknown granularity: {0}")]
    UnknownGranularity(String),
}
