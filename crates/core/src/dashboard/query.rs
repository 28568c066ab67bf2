//! Report requests.
//!
//! Every query carries the already-resolved province scope, so two callers
//! with different scopes never share a cached report.

use chrono::{NaiveDate, NaiveDateTime};
use salesdash_shared::ProvinceScope;

use super::types::ViewBy;
use crate::calendar::{DateRange, Granularity};

/// Live view of one day.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DailyQuery {
    /// Reporting day.
    pub day: NaiveDate,
    /// Local time the report is built at.
    pub now: NaiveDateTime,
    /// Provinces covered.
    pub scope: ProvinceScope,
}

/// Report over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeQuery {
    /// Inclusive days.
    pub range: DateRange,
    /// Explicit bucket size; chosen from the span when absent.
    pub granularity: Option<Granularity>,
    /// Provinces covered.
    pub scope: ProvinceScope,
}

impl RangeQuery {
    /// Bucket size in effect.
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.granularity
            .unwrap_or_else(|| self.range.auto_granularity())
    }
}

/// Multi-year comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoricalQuery {
    /// Years to compare, in display order.
    pub years: Vec<i32>,
    /// Monthly or quarterly periods.
    pub view_by: ViewBy,
    /// Provinces covered.
    pub scope: ProvinceScope,
}

/// Year-objective reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YearQuery {
    /// Calendar year.
    pub year: i32,
    /// Local date used to count elapsed months.
    pub today: NaiveDate,
    /// Provinces covered.
    pub scope: ProvinceScope,
}

/// Stock movement over a day, ISO week or month.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnalyticsQuery {
    /// `Daily`, `Weekly` or `Monthly`.
    pub period: Granularity,
    /// Day that picks the window.
    pub anchor: NaiveDate,
    /// Year the window is clipped to.
    pub year: i32,
    /// Provinces covered.
    pub scope: ProvinceScope,
}

/// Identity of an assembled report, used as cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReportQuery {
    /// Daily monitor.
    DailyMonitor(DailyQuery),
    /// Global overview.
    GlobalOverview(RangeQuery),
    /// Provincial analysis.
    ProvincialAnalysis(RangeQuery),
    /// Historical trends.
    HistoricalTrends(HistoricalQuery),
    /// Progress per province.
    YearObjectives(YearQuery),
    /// Objective table.
    YearObjectiveTable(YearQuery),
    /// Per-province year summaries.
    ProvinceYearSummaries(YearQuery),
    /// All provinces at a glance.
    OverallSummary(YearQuery),
    /// Ranked comparison.
    ComparisonSummary(YearQuery),
    /// Stock movement.
    SalesAnalytics(AnalyticsQuery),
}
