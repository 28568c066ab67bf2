//! Intraday reporting slots.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use super::range::TimeWindow;

/// One of the four fixed entry windows of a reporting day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeSlot {
    /// 06:00-10:00.
    #[serde(rename = "8am")]
    Morning,
    /// 10:00-14:00.
    #[serde(rename = "12pm")]
    Midday,
    /// 14:00-18:00.
    #[serde(rename = "3pm")]
    Afternoon,
    /// 18:00-22:00.
    #[serde(rename = "8pm")]
    Evening,
}

impl TimeSlot {
    /// All slots in chronological order.
    pub const ALL: [Self; 4] = [Self::Morning, Self::Midday, Self::Afternoon, Self::Evening];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Morning => "8am",
            Self::Midday => "12pm",
            Self::Afternoon => "3pm",
            Self::Evening => "8pm",
        }
    }

    /// Position in [`TimeSlot::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Morning => 0,
            Self::Midday => 1,
            Self::Afternoon => 2,
            Self::Evening => 3,
        }
    }

    /// First hour of the slot.
    #[must_use]
    pub const fn start_hour(self) -> u32 {
        match self {
            Self::Morning => 6,
            Self::Midday => 10,
            Self::Afternoon => 14,
            Self::Evening => 18,
        }
    }

    /// Exclusive end hour of the slot.
    #[must_use]
    pub const fn end_hour(self) -> u32 {
        self.start_hour() + 4
    }

    /// Slot covering a local hour; hours before 06:00 and from 22:00 fall in none.
    #[must_use]
    pub const fn of_hour(hour: u32) -> Option<Self> {
        match hour {
            6..=9 => Some(Self::Morning),
            10..=13 => Some(Self::Midday),
            14..=17 => Some(Self::Afternoon),
            18..=21 => Some(Self::Evening),
            _ => None,
        }
    }

    /// Slot covering a local timestamp.
    #[must_use]
    pub fn of_time(at: NaiveDateTime) -> Option<Self> {
        Self::of_hour(at.hour())
    }

    /// The slot's window on `day`.
    #[must_use]
    pub fn window(self, day: NaiveDate) -> TimeWindow {
        let midnight = day.and_time(NaiveTime::MIN);
        TimeWindow::new(
            midnight + TimeDelta::hours(i64::from(self.start_hour())),
            midnight + TimeDelta::hours(i64::from(self.end_hour())),
        )
    }

    /// Exclusive end of the slot on `day`.
    #[must_use]
    pub fn end_on(self, day: NaiveDate) -> NaiveDateTime {
        self.window(day).end
    }

    /// A slot is missing only once its window has fully elapsed without entries.
    #[must_use]
    pub fn is_missing(self, day: NaiveDate, events: i64, now: NaiveDateTime) -> bool {
        events == 0 && now > self.end_on(day)
    }
}

impl std::fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
