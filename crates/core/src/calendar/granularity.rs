//! Time granularities and chronologically sortable bucket keys.

use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use super::error::CalendarError;
use super::names::{month_abbrev, month_name};

/// Size of the time bucket used to group facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Calendar day.
    Daily,
    /// ISO week (Monday start).
    Weekly,
    /// Calendar month.
    Monthly,
    /// Calendar quarter.
    Quarterly,
    /// Calendar year.
    Yearly,
}

impl Granularity {
    /// Auto-selection from a range span in days.
    #[must_use]
    pub const fn for_span(span_days: i64) -> Self {
        if span_days > 90 {
            Self::Monthly
        } else if span_days > 31 {
            Self::Weekly
        } else {
            Self::Daily
        }
    }

    /// Lowercase name as used in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// Bucket containing `day` at this granularity.
    #[must_use]
    pub fn key_of(self, day: NaiveDate) -> BucketKey {
        BucketKey::new(self, day)
    }
}

impl FromStr for Granularity {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            other => Err(CalendarError::UnknownGranularity(other.to_string())),
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time bucket identified by its first day.
///
/// Ordering follows the start date, so a sorted set of keys of one
/// granularity is always chronological. Labels are for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    start: NaiveDate,
    granularity: Granularity,
}

impl BucketKey {
    /// Bucket of `granularity` that contains `day`.
    #[must_use]
    pub fn new(granularity: Granularity, day: NaiveDate) -> Self {
        let month_start = day - TimeDelta::days(i64::from(day.day0()));
        let start = match granularity {
            Granularity::Daily => day,
            Granularity::Weekly => {
                day - TimeDelta::days(i64::from(day.weekday().num_days_from_monday()))
            }
            Granularity::Monthly => month_start,
            Granularity::Quarterly => month_start
                .checked_sub_months(Months::new(day.month0() % 3))
                .unwrap_or(month_start),
            Granularity::Yearly => day - TimeDelta::days(i64::from(day.ordinal0())),
        };
        Self { start, granularity }
    }

    /// First day of the bucket.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Granularity of the bucket.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Quarter number 1..=4 of the bucket start.
    #[must_use]
    pub fn quarter(&self) -> u32 {
        self.start.month0() / 3 + 1
    }

    /// Display label: `2025-09-24`, `Week 39`, `September 2025`, `Q3 2025`, `2025`.
    #[must_use]
    pub fn label(&self) -> String {
        match self.granularity {
            Granularity::Daily => self.start.format("%Y-%m-%d").to_string(),
            Granularity::Weekly => format!("Week {}", self.start.iso_week().week()),
            Granularity::Monthly => {
                format!("{} {}", month_name(self.start.month()), self.start.year())
            }
            Granularity::Quarterly => format!("Q{} {}", self.quarter(), self.start.year()),
            Granularity::Yearly => self.start.year().to_string(),
        }
    }

    /// Compact label used by comparison charts; months render as `Sep 2025`.
    #[must_use]
    pub fn short_label(&self) -> String {
        match self.granularity {
            Granularity::Monthly => {
                format!("{} {}", month_abbrev(self.start.month()), self.start.year())
            }
            _ => self.label(),
        }
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
