//! Date ranges and half-open time windows.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use super::error::CalendarError;
use super::granularity::Granularity;

/// Years accepted by [`DateRange`]; keeps every ±1 year step inside chrono's range.
pub const SUPPORTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

/// Inclusive range of whole local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Last day (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting `end < start`.
    ///
    /// # Errors
    ///
    /// Returns `CalendarError::InvalidRange` if the end precedes the start and
    /// `CalendarError::YearOutOfRange` for years outside 1..=9999.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CalendarError> {
        check_year(start.year())?;
        check_year(end.year())?;
        if end < start {
            return Err(CalendarError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range covering a single day.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is unsupported.
    pub fn single(day: NaiveDate) -> Result<Self, CalendarError> {
        Self::new(day, day)
    }

    /// First of `today`'s month through `today`; the dashboards' default window.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is unsupported.
    pub fn month_to_date(today: NaiveDate) -> Result<Self, CalendarError> {
        Self::new(today - TimeDelta::days(i64::from(today.day0())), today)
    }

    /// The whole calendar month.
    ///
    /// # Errors
    ///
    /// Returns an error if the year or month is invalid.
    pub fn month(year: i32, month: u32) -> Result<Self, CalendarError> {
        check_year(year)?;
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| CalendarError::InvalidDate(format!("{year}-{month:02}")))?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or(CalendarError::YearOutOfRange(year))?;
        Self::new(first, next - TimeDelta::days(1))
    }

    /// The whole calendar year.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is unsupported.
    pub fn year(year: i32) -> Result<Self, CalendarError> {
        check_year(year)?;
        let first = NaiveDate::from_yo_opt(year, 1).ok_or(CalendarError::YearOutOfRange(year))?;
        let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or(CalendarError::YearOutOfRange(year))?;
        Self::new(first, last)
    }

    /// Monday through Sunday of the ISO week containing `day`.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is unsupported.
    pub fn iso_week_of(day: NaiveDate) -> Result<Self, CalendarError> {
        let monday = day - TimeDelta::days(i64::from(day.weekday().num_days_from_monday()));
        Self::new(monday, monday + TimeDelta::days(6))
    }

    /// Days between start and end; a 31-day month has span 30.
    #[must_use]
    pub fn span_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Number of calendar days covered, both ends included.
    #[must_use]
    pub fn day_count(&self) -> i64 {
        self.span_days() + 1
    }

    /// Half-open window `[start 00:00, (end + 1) 00:00)`.
    #[must_use]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(
            self.start.and_time(NaiveTime::MIN),
            (self.end + TimeDelta::days(1)).and_time(NaiveTime::MIN),
        )
    }

    /// The immediately preceding range of equal length.
    #[must_use]
    pub fn previous(&self) -> Self {
        let len = TimeDelta::days(self.day_count());
        Self {
            start: self.start - len,
            end: self.start - TimeDelta::days(1),
        }
    }

    /// Every day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let count = usize::try_from(self.day_count()).unwrap_or(0);
        self.start.iter_days().take(count)
    }

    /// Granularity picked from the span: >90 days monthly, >31 weekly, else daily.
    #[must_use]
    pub fn auto_granularity(&self) -> Granularity {
        Granularity::for_span(self.span_days())
    }

    /// Intersection with another range, if any.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Returns true if `day` lies in the range.
    #[must_use]
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `CalendarError::InvalidDate` if the text is not a valid date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CalendarError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| CalendarError::InvalidDate(format!("'{raw}': {e}")))
}

/// Rejects years outside [`SUPPORTED_YEARS`].
///
/// # Errors
///
/// Returns `CalendarError::YearOutOfRange` for an unsupported year.
pub fn check_year(year: i32) -> Result<(), CalendarError> {
    if SUPPORTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(CalendarError::YearOutOfRange(year))
    }
}

/// Half-open local time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Inclusive start.
    pub start: NaiveDateTime,
    /// Exclusive end.
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a window; an `end` before `start` yields an empty window.
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// The whole local day.
    #[must_use]
    pub fn of_day(day: NaiveDate) -> Self {
        Self::new(
            day.and_time(NaiveTime::MIN),
            (day + TimeDelta::days(1)).and_time(NaiveTime::MIN),
        )
    }

    /// Returns true if `at` lies inside the window.
    #[must_use]
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.start <= at && at < self.end
    }

    /// Returns true if the window covers no time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Elapsed time between start and end.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
