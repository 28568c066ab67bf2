//! Calendar primitives for bucketing sale events.
//!
//! All times in this module are local wall-clock times in the reporting
//! timezone. Windows are half-open `[start, end)`.

pub mod error;
pub mod granularity;
pub mod names;
pub mod range;
pub mod slot;

#[cfg(test)]
mod tests;

pub use error::CalendarError;
pub use granularity::{BucketKey, Granularity};
pub use names::{month_abbrev, month_name, parse_month_name, parse_week_number};
pub use range::{DateRange, SUPPORTED_YEARS, TimeWindow, check_year, parse_date};
pub use slot::TimeSlot;
