//! Dashboard assembler.
//!
//! Composes repository queries, target resolution and aggregation into the
//! typed reports of [`super::types`]. Independent queries of a report are
//! issued concurrently; a report is either complete or an error.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDateTime, Timelike};
use salesdash_shared::types::ProvinceId;

use super::cache::ReportCache;
use super::error::DashboardError;
use super::query::{AnalyticsQuery, DailyQuery, HistoricalQuery, RangeQuery, ReportQuery, YearQuery};
use super::types::{
    ComparisonSummary, DailyMonitor, GlobalOverview, HistoricalTrends, OverallSummaryDashboard,
    ProvinceYearSummary, ProvincialAnalysis, SalesAnalytics, YearObjectiveProgress,
    YearObjectiveRow,
};
use crate::facts::{DailyTotal, FactRepository, Province};
use crate::targets::TargetResolver;

/// Builds dashboards over a fact repository.
pub struct DashboardAssembler<R: ?Sized> {
    pub(super) repo: Arc<R>,
    pub(super) targets: TargetResolver<R>,
    cache: ReportCache,
    deadline: Option<Duration>,
}

impl<R: ?Sized> Clone for DashboardAssembler<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            targets: self.targets.clone(),
            cache: self.cache.clone(),
            deadline: self.deadline,
        }
    }
}

impl<R: ?Sized> std::fmt::Debug for DashboardAssembler<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardAssembler")
            .field("cache", &self.cache)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl<R: FactRepository + ?Sized> DashboardAssembler<R> {
    /// Creates an assembler without cache or deadline.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        let targets = TargetResolver::new(Arc::clone(&repo));
        Self {
            repo,
            targets,
            cache: ReportCache::disabled(),
            deadline: None,
        }
    }

    /// Memoises reports in `cache`.
    #[must_use]
    pub fn with_cache(mut self, cache: ReportCache) -> Self {
        self.cache = cache;
        self
    }

    /// Fails any report not assembled within `deadline`.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Report cache in use.
    #[must_use]
    pub const fn cache(&self) -> &ReportCache {
        &self.cache
    }

    /// Target resolver over the same repository.
    #[must_use]
    pub const fn targets(&self) -> &TargetResolver<R> {
        &self.targets
    }

    /// Today's sales, targets, slot compliance and charts.
    ///
    /// `now` is truncated to the minute so polling clients share a report.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` if the input is invalid, the repository
    /// fails or the deadline passes.
    pub async fn daily_monitor(&self, query: DailyQuery) -> Result<DailyMonitor, DashboardError> {
        let query = DailyQuery {
            now: truncate_to_minute(query.now),
            ..query
        };
        let key = ReportQuery::DailyMonitor(query.clone());
        self.run(key, self.build_daily_monitor(&query)).await
    }

    /// Totals, best and worst province, trend and heatmap over a range.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` if the repository fails or the deadline passes.
    pub async fn global_overview(&self, query: RangeQuery) -> Result<GlobalOverview, DashboardError> {
        let key = ReportQuery::GlobalOverview(query.clone());
        self.run(key, self.build_global_overview(&query)).await
    }

    /// Per-province series, contributions, intraday pattern and targets.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` if the repository fails or the deadline passes.
    pub async fn provincial_analysis(
        &self,
        query: RangeQuery,
    ) -> Result<ProvincialAnalysis, DashboardError> {
        let key = ReportQuery::ProvincialAnalysis(query.clone());
        self.run(key, self.build_provincial_analysis(&query)).await
    }

    /// Multi-year cumulative sales, annual totals and growth.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::InvalidInput` for an empty or unsupported
    /// year list, otherwise on repository failure or deadline.
    pub async fn historical_trends(
        &self,
        query: HistoricalQuery,
    ) -> Result<HistoricalTrends, DashboardError> {
        let key = ReportQuery::HistoricalTrends(query.clone());
        self.run(key, self.build_historical_trends(&query)).await
    }

    /// Progress of every province towards its year objective.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` if the repository fails or the deadline passes.
    pub async fn year_objectives(
        &self,
        query: YearQuery,
    ) -> Result<Vec<YearObjectiveProgress>, DashboardError> {
        let key = ReportQuery::YearObjectives(query.clone());
        self.run(key, self.build_year_objectives(&query)).await
    }

    /// Objective table with remaining quantity and status.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` if the repository fails or the deadline passes.
    pub async fn year_objective_table(
        &self,
        query: YearQuery,
    ) -> Result<Vec<YearObjectiveRow>, DashboardError> {
        let key = ReportQuery::YearObjectiveTable(query.clone());
        self.run(key, self.build_year_objective_table(&query)).await
    }

    /// Full-year summary of every province.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` if the repository fails or the deadline passes.
    pub async fn province_year_summaries(
        &self,
        query: YearQuery,
    ) -> Result<Vec<ProvinceYearSummary>, DashboardError> {
        let key = ReportQuery::ProvinceYearSummaries(query.clone());
        self.run(key, self.build_province_year_summaries(&query)).await
    }

    /// All provinces at a glance.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` if the repository fails or the deadline passes.
    pub async fn overall_summary(
        &self,
        query: YearQuery,
    ) -> Result<OverallSummaryDashboard, DashboardError> {
        let key = ReportQuery::OverallSummary(query.clone());
        self.run(key, self.build_overall_summary(&query)).await
    }

    /// Ranked comparison with trend against the previous year.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` if the repository fails or the deadline passes.
    pub async fn comparison_summary(
        &self,
        query: YearQuery,
    ) -> Result<ComparisonSummary, DashboardError> {
        let key = ReportQuery::ComparisonSummary(query.clone());
        self.run(key, self.build_comparison_summary(&query)).await
    }

    /// Stock movement for a day, ISO week or month.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::InvalidInput` for an unsupported period or
    /// year, or an anchor outside the year.
    pub async fn sales_analytics(
        &self,
        query: AnalyticsQuery,
    ) -> Result<SalesAnalytics, DashboardError> {
        let key = ReportQuery::SalesAnalytics(query.clone());
        self.run(key, self.build_sales_analytics(&query)).await
    }

    /// Serves from cache or assembles under the deadline; only successful
    /// reports are cached.
    async fn run<T, F>(&self, key: ReportQuery, build: F) -> Result<T, DashboardError>
    where
        T: Clone + Send + Sync + 'static,
        F: Future<Output = Result<T, DashboardError>>,
    {
        if let Some(report) = self.cache.get::<T>(&key) {
            return Ok(report);
        }
        let generation = self.cache.generation();
        let report = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, build)
                .await
                .map_err(|_| DashboardError::DeadlineExceeded(deadline))??,
            None => build.await?,
        };
        self.cache.insert(key, &report, generation);
        Ok(report)
    }
}

fn truncate_to_minute(now: NaiveDateTime) -> NaiveDateTime {
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

/// Province names in reporting order.
pub(super) struct Directory<'a> {
    provinces: &'a [Province],
    names: BTreeMap<ProvinceId, &'a str>,
}

impl<'a> Directory<'a> {
    pub(super) fn new(provinces: &'a [Province]) -> Self {
        let names = provinces
            .iter()
            .map(|p| (p.id, p.name.as_str()))
            .collect();
        Self { provinces, names }
    }

    /// Name of a province; empty when it is unknown.
    pub(super) fn name(&self, id: ProvinceId) -> String {
        self.names.get(&id).copied().unwrap_or_default().to_string()
    }

    /// Every listed province, in reporting order.
    pub(super) fn listed(&self) -> impl Iterator<Item = (ProvinceId, String)> + '_ {
        self.provinces.iter().map(|p| (p.id, p.name.clone()))
    }

    /// Provinces with a positive total: listed ones by name, then unknown
    /// ones by id.
    pub(super) fn with_sales(&self, totals: &BTreeMap<ProvinceId, i64>) -> Vec<(ProvinceId, String, i64)> {
        let listed = self.provinces.iter().filter_map(|p| {
            totals
                .get(&p.id)
                .copied()
                .filter(|total| *total > 0)
                .map(|total| (p.id, p.name.clone(), total))
        });
        let unknown = totals
            .iter()
            .filter(|(id, total)| **total > 0 && !self.names.contains_key(id))
            .map(|(id, total)| (*id, String::new(), *total));
        listed.chain(unknown).collect()
    }
}

/// Quantity per province.
pub(super) fn totals_by_province(rows: &[DailyTotal]) -> BTreeMap<ProvinceId, i64> {
    let mut totals = BTreeMap::new();
    for row in rows {
        *totals.entry(row.province_id).or_insert(0) += row.quantity;
    }
    totals
}

/// Quantity per province and calendar month (index 0 is January).
pub(super) fn months_by_province(rows: &[DailyTotal]) -> BTreeMap<ProvinceId, [i64; 12]> {
    let mut months: BTreeMap<ProvinceId, [i64; 12]> = BTreeMap::new();
    for row in rows {
        months.entry(row.province_id).or_insert([0; 12])[row.day.month0() as usize] +=
            row.quantity;
    }
    months
}
