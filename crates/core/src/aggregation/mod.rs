//! Numeric building blocks shared by every dashboard.
//!
//! - `ratio` - achievement, period-over-period change, contribution share
//! - `series` - bucketed sums, cumulative series, stable ranking
//! - `level` - achievement bands and status classifications
//! - `slots` - intraday slot breakdowns
//! - `stats` - mean, median, population standard deviation
//!
//! Every percentage is a `Decimal` rounded to two places and a zero
//! denominator yields 0, never an error.

pub mod level;
pub mod ratio;
pub mod series;
pub mod slots;
pub mod stats;


pub use level::{AchievementLevel, GrowthDirection, MonthTrend, ObjectiveStatus, PerformanceTrend};
pub use series::{Bucket, RankBy, Rankable};
pub use slots::SlotBreakdown;

/// Stateless aggregation functions over fact rows.
pub struct Aggregator;
