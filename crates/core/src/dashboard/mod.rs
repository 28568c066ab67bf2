//! Dashboard assembly.
//!
//! One builder per report family:
//! - `daily` - live daily monitor with slot compliance
//! - `overview` - global overview over a date range
//! - `provincial` - per-province comparison and intraday pattern
//! - `historical` - multi-year cumulative sales and growth
//! - `objectives` - year-objective progress, table, summaries, comparison
//! - `analytics` - stock movement over a day, week or month
//!
//! Reports are memoised by [`ReportCache`] and bounded by an optional
//! deadline.

mod analytics;
mod assembler;
mod cache;
mod daily;
mod error;
mod historical;
mod objectives;
mod overview;
mod provincial;
mod query;
pub mod types;


pub use analytics::ANALYTICS_YEARS;
pub use assembler::DashboardAssembler;
pub use cache::ReportCache;
pub use error::DashboardError;
pub use query::{AnalyticsQuery, DailyQuery, HistoricalQuery, RangeQuery, ReportQuery, YearQuery};
pub use types::*;
