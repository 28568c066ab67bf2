//! Report shapes, serialized field-for-field at the API boundary.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use salesdash_shared::types::ProvinceId;
use serde::{Deserialize, Serialize};

use crate::aggregation::{
    AchievementLevel, GrowthDirection, MonthTrend, ObjectiveStatus, PerformanceTrend, Rankable,
};
use crate::calendar::Granularity;

// ============================================================================
// Daily monitor
// ============================================================================

/// Live view of one reporting day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMonitor {
    /// Quantity sold on the day.
    pub total_sales_today: i64,
    /// Daily share of the week targets.
    pub target_for_today: i64,
    /// Achievement against `target_for_today`.
    pub achievement_percent: Decimal,
    /// Change against the same stretch of the previous day.
    pub pace_vs_yesterday: Decimal,
    /// Entry compliance per province.
    pub last_entry_status: Vec<LastEntryStatus>,
    /// Running totals per slot: today, yesterday, 7-day average.
    pub cumulative_sales_chart: CumulativeSalesChart,
    /// Entries per slot per province.
    pub daily_entry_table: Vec<DailyEntryRow>,
    /// Provinces with sales, largest first.
    pub province_bar_chart: Vec<ProvinceSales>,
    /// Sales per slot.
    pub time_slot_bar_chart: Vec<SlotSales>,
    /// Provinces with sales and their share of the day.
    pub province_pie_chart: Vec<ProvinceShare>,
    /// Slots and their share of the four-slot total.
    pub time_slot_pie_chart: Vec<SlotShare>,
}

/// Entry compliance of a province for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    /// Entries present and no elapsed slot missing.
    Complete,
    /// Some entries, some elapsed slots missing.
    Partial,
    /// No entries at all.
    Missing,
}

/// Last entry and missing slots of one province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastEntryStatus {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// Slot label of the latest entry, empty when none.
    pub last_entry_time: String,
    /// Time of the latest entry.
    pub last_entry_at: Option<NaiveDateTime>,
    /// Elapsed slots without entries.
    pub missing_entries: Vec<String>,
    /// Compliance.
    pub compliance_status: ComplianceStatus,
}

/// Running totals per slot end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativeSalesChart {
    /// Slot labels.
    pub time_slots: Vec<String>,
    /// Today.
    pub today_sales: Vec<i64>,
    /// Yesterday.
    pub yesterday_sales: Vec<i64>,
    /// Average of the 7 preceding days.
    pub average_sales: Vec<i64>,
}

/// Slot entries of one province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntryRow {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// 06:00-10:00.
    pub entry_8am: i64,
    /// 10:00-14:00.
    pub entry_12pm: i64,
    /// 14:00-18:00.
    pub entry_3pm: i64,
    /// 18:00-22:00.
    pub entry_8pm: i64,
    /// Sum of the four slots.
    pub daily_total: i64,
}

/// Sales of a province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceSales {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// Quantity sold.
    pub total_sales: i64,
}

/// Sales of a province with its share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceShare {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// Quantity sold.
    pub total_sales: i64,
    /// Share of the day's total.
    pub percentage: Decimal,
}

/// Sales of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSales {
    /// Slot label.
    pub time_slot: String,
    /// Quantity sold.
    pub total_sales: i64,
}

/// Sales of a slot with its share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotShare {
    /// Slot label.
    pub time_slot: String,
    /// Quantity sold.
    pub sales: i64,
    /// Share of the four-slot total.
    pub percentage: Decimal,
}

// ============================================================================
// Global overview
// ============================================================================

/// Sales, targets and trend over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalOverview {
    /// Quantity sold in the range.
    pub total_sales: i64,
    /// Change against the preceding range of equal length.
    pub previous_period_change: Decimal,
    /// Total divided by the number of days.
    pub average_daily_sales: Decimal,
    /// Largest seller.
    pub best_province: ProvincePerformance,
    /// Smallest seller.
    pub worst_province: ProvincePerformance,
    /// Bucketed sales.
    pub sales_trend: SalesTrend,
    /// Provinces with sales, by achievement.
    pub provincial_sales: Vec<ProvincePerformance>,
    /// Sales against targets per province and period.
    pub sales_heatmap: Vec<HeatmapRow>,
    /// Bucket size used.
    pub time_granularity: Granularity,
}

/// Sales and achievement of a province.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvincePerformance {
    /// Province UUID, empty for the zeroed record.
    pub uuid: String,
    /// Province name.
    pub name: String,
    /// Quantity sold.
    pub total_sales: i64,
    /// Resolved target.
    pub target: i64,
    /// Achievement percentage.
    pub achievement: Decimal,
}

impl Rankable for ProvincePerformance {
    fn total(&self) -> i64 {
        self.total_sales
    }

    fn achievement(&self) -> Decimal {
        self.achievement
    }
}

/// Bucketed series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTrend {
    /// Bucket labels.
    pub labels: Vec<String>,
    /// Bucket sums.
    pub values: Vec<i64>,
    /// Bucket size.
    pub interval: Granularity,
}

/// Heatmap row of a province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapRow {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// Periods with sales.
    pub period_data: Vec<HeatmapCell>,
}

/// Sales of a period against its target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    /// `Week N` or month name.
    pub period: String,
    /// Quantity sold.
    pub sales: i64,
    /// Deviation from the period target in percent.
    pub deviation: Decimal,
}

// ============================================================================
// Provincial analysis
// ============================================================================

/// Side-by-side comparison of provinces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvincialAnalysis {
    /// Series per province.
    pub provincial_comparison: Vec<ProvinceSeries>,
    /// Share of each province per bucket.
    pub contribution_data: Vec<ContributionBucket>,
    /// Average quantity per sale per slot.
    pub intraday_pattern: Vec<IntradayPattern>,
    /// Bucket size used.
    pub time_granularity: Granularity,
    /// Target against actual per province.
    pub province_targets: Vec<ProvinceTarget>,
}

/// Series of one province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvinceSeries {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// Buckets with sales.
    pub data_points: Vec<DataPoint>,
}

/// Labelled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Bucket label.
    pub label: String,
    /// Quantity.
    pub value: i64,
}

/// Province shares within one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributionBucket {
    /// Bucket label.
    pub label: String,
    /// First day of the bucket.
    pub timestamp: NaiveDate,
    /// Provinces with sales in the bucket.
    pub provinces: Vec<ProvinceContribution>,
    /// Bucket total.
    pub total: i64,
}

/// Share of a province within a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceContribution {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// Quantity sold.
    pub sales: i64,
    /// Share of the bucket total.
    pub percentage: Decimal,
}

/// Intraday profile of a province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayPattern {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// Average quantity per sale per slot.
    pub time_slots: SlotAverages,
}

/// Value per reporting slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotAverages {
    /// 06:00-10:00.
    #[serde(rename = "8am")]
    pub morning: Decimal,
    /// 10:00-14:00.
    #[serde(rename = "12pm")]
    pub midday: Decimal,
    /// 14:00-18:00.
    #[serde(rename = "3pm")]
    pub afternoon: Decimal,
    /// 18:00-22:00.
    #[serde(rename = "8pm")]
    pub evening: Decimal,
}

/// Target against actual of a province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceTarget {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// Resolved target.
    pub target: i64,
    /// Quantity sold.
    pub actual: i64,
    /// Achievement percentage.
    pub achievement: Decimal,
}

// ============================================================================
// Historical trends
// ============================================================================

/// Period resolution of the historical view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewBy {
    /// Twelve months.
    #[default]
    Monthly,
    /// Four quarters.
    Quarterly,
}

impl std::str::FromStr for ViewBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            other => Err(format!("view_by must be monthly or quarterly, got '{other}'")),
        }
    }
}

/// Multi-year comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalTrends {
    /// Running totals per year.
    pub cumulative_yearly_sales: Vec<YearSeries>,
    /// Totals per province per year.
    pub annual_sales_by_province: Vec<AnnualProvinceSales>,
    /// Growth between the two most recent selected years.
    pub yoy_growth_heatmap: Vec<GrowthRow>,
    /// Years analysed.
    pub selected_years: Vec<i32>,
    /// Period resolution.
    pub view_by: ViewBy,
}

/// Running totals of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSeries {
    /// Year.
    pub year: i32,
    /// One point per month or quarter.
    pub data_points: Vec<CumulativePoint>,
}

/// Running total at the end of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// `Jan`..`Dec` or `Q1`..`Q4`.
    pub period: String,
    /// Last month of the period.
    pub month_index: u32,
    /// Running total.
    pub value: i64,
}

/// Yearly totals of a province.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualProvinceSales {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// One entry per selected year.
    pub yearly_data: Vec<YearTotal>,
}

/// Total of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearTotal {
    /// Year.
    pub year: i32,
    /// Quantity sold.
    pub total_sales: i64,
}

/// Growth row of a province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRow {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// One cell per month or quarter.
    pub periods: Vec<GrowthCell>,
}

/// Growth of one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthCell {
    /// `Jan`..`Dec` or `Q1`..`Q4`.
    pub period: String,
    /// Last month of the period.
    pub month_index: u32,
    /// Sales in the more recent year.
    pub current_sales: i64,
    /// Sales in the earlier year.
    pub previous_sales: i64,
    /// Change in percent.
    pub growth_percent: Decimal,
}

// ============================================================================
// Year objectives
// ============================================================================

/// Progress of a province towards its year objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearObjectiveProgress {
    /// Province name.
    pub province: String,
    /// Province.
    pub province_uuid: ProvinceId,
    /// Year objective.
    pub year_objective: i64,
    /// Sold so far.
    pub total_achieved: i64,
    /// Progress percentage.
    pub progress_percentage: Decimal,
    /// Achievement band.
    pub achievement_level: AchievementLevel,
    /// Month by month.
    pub monthly_breakdown: Vec<MonthProgress>,
    /// Chart arrays.
    pub graph_data: ObjectiveGraph,
}

/// Progress within one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthProgress {
    /// Month name.
    pub month: String,
    /// 1..=12.
    pub month_number: u32,
    /// Sold.
    pub achieved: i64,
    /// Monthly target.
    pub target: i64,
    /// Achievement percentage.
    pub percentage: Decimal,
}

/// Parallel arrays for charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveGraph {
    /// Month names.
    pub labels: Vec<String>,
    /// Monthly targets.
    pub objectives: Vec<i64>,
    /// Monthly sales.
    pub achieved: Vec<i64>,
    /// Monthly achievement.
    pub percentages: Vec<Decimal>,
}

/// Row of the year-objective table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearObjectiveRow {
    /// Province name.
    pub province: String,
    /// Province.
    pub province_uuid: ProvinceId,
    /// Year objective.
    pub year_objective: i64,
    /// Sold so far.
    pub total_achieved: i64,
    /// Progress percentage.
    pub progress_percentage: Decimal,
    /// Achievement band.
    pub achievement_level: AchievementLevel,
    /// Left to sell, never negative.
    pub remaining: i64,
    /// Behind, On Track or Exceeded.
    pub status: ObjectiveStatus,
}

/// Full-year summary of a province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceYearSummary {
    /// Province name.
    pub province: String,
    /// Province.
    pub province_uuid: ProvinceId,
    /// Year.
    pub year: i32,
    /// Year objective.
    pub year_objective: i64,
    /// Sold in the year.
    pub total_sales: i64,
    /// Progress percentage.
    pub progress_percentage: Decimal,
    /// Achievement band.
    pub achievement_level: AchievementLevel,
    /// Month with the most sales.
    pub best_month: MonthHighlight,
    /// Month with the fewest non-zero sales.
    pub worst_month: MonthHighlight,
    /// Total divided by twelve.
    pub average_monthly_sales: Decimal,
    /// Left to sell, never negative.
    pub remaining_to_target: i64,
    /// Linear projection from elapsed months.
    pub projected_year_end: i64,
    /// Progress at or above 75%.
    pub is_on_track: bool,
    /// Per quarter.
    pub quarterly_performance: Vec<QuarterPerformance>,
    /// Per month with running total.
    pub monthly_trend: Vec<MonthTrendPoint>,
}

/// A notable month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthHighlight {
    /// Month name, empty when zeroed.
    pub month: String,
    /// 1..=12, 0 when zeroed.
    pub month_number: u32,
    /// Sold.
    pub sales: i64,
    /// Share of the year objective.
    pub percentage_of_objective: Decimal,
}

/// Performance within a quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterPerformance {
    /// `Q1`..`Q4`.
    pub quarter: String,
    /// Sold.
    pub sales: i64,
    /// Quarter target.
    pub target: i64,
    /// Achievement percentage.
    pub percentage: Decimal,
    /// Achievement band.
    pub achievement_level: AchievementLevel,
}

/// Month with running total and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthTrendPoint {
    /// Month name.
    pub month: String,
    /// 1..=12.
    pub month_number: u32,
    /// Sold.
    pub sales: i64,
    /// Running total.
    pub cumulative: i64,
    /// Movement against the previous month.
    pub trend: MonthTrend,
}

/// All provinces at a glance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSummaryDashboard {
    /// Provinces covered.
    pub total_provinces: usize,
    /// Year.
    pub year: i32,
    /// Sum of objectives.
    pub total_year_objective: i64,
    /// Sum of sales.
    pub total_achieved: i64,
    /// Overall progress.
    pub overall_progress_percentage: Decimal,
    /// Provinces between 75% and 100%.
    pub provinces_on_track: usize,
    /// Provinces at or above 100%.
    pub provinces_exceeded: usize,
    /// Provinces below 75%.
    pub provinces_behind: usize,
    /// First five by progress.
    pub top_performing_provinces: Vec<ProvinceRanking>,
    /// Last five by progress.
    pub bottom_performing_provinces: Vec<ProvinceRanking>,
    /// Per month across provinces.
    pub monthly_aggregate_progress: Vec<MonthlyAggregate>,
    /// Provinces per achievement band.
    pub achievement_distribution: AchievementDistribution,
}

/// Ranked province.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvinceRanking {
    /// 1-based rank.
    pub rank: usize,
    /// Province name.
    pub province: String,
    /// Province.
    pub province_uuid: ProvinceId,
    /// Sold.
    pub achieved: i64,
    /// Year objective.
    pub objective: i64,
    /// Progress percentage.
    pub percentage: Decimal,
    /// Achievement band.
    pub achievement_level: AchievementLevel,
}

/// One month across provinces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// Month name.
    pub month: String,
    /// 1..=12.
    pub month_number: u32,
    /// Sold by every province.
    pub total_achieved: i64,
    /// Sum of monthly targets.
    pub total_target: i64,
    /// Achievement percentage.
    pub percentage: Decimal,
    /// Provinces whose sales reached their monthly target.
    pub provinces_met_target: usize,
}

/// Provinces per achievement band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementDistribution {
    /// At or above 100%.
    pub excellent: usize,
    /// 90% to 100%.
    pub very_good: usize,
    /// 75% to 90%.
    pub good: usize,
    /// 50% to 75%.
    pub fair: usize,
    /// 25% to 50%.
    pub poor: usize,
    /// Below 25%.
    pub critical: usize,
}

impl AchievementDistribution {
    /// Counts a province in its band.
    pub fn record(&mut self, level: AchievementLevel) {
        let slot = match level {
            AchievementLevel::Excellent => &mut self.excellent,
            AchievementLevel::VeryGood => &mut self.very_good,
            AchievementLevel::Good => &mut self.good,
            AchievementLevel::Fair => &mut self.fair,
            AchievementLevel::Poor => &mut self.poor,
            AchievementLevel::Critical => &mut self.critical,
        };
        *slot += 1;
    }
}

/// Table, chart and statistics of the year comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    /// Ranked rows.
    pub table_data: Vec<ComparisonRow>,
    /// Chart arrays in rank order.
    pub graph_data: ComparisonGraph,
    /// Distribution statistics.
    pub summary: ComparisonStats,
}

/// Ranked comparison row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Province name.
    pub province: String,
    /// Province.
    pub province_uuid: ProvinceId,
    /// Year objective.
    pub objective: i64,
    /// Sold.
    pub achieved: i64,
    /// Progress percentage.
    pub percentage: Decimal,
    /// Left to sell, never negative.
    pub remaining: i64,
    /// Achievement band.
    pub achievement_level: AchievementLevel,
    /// 1-based rank.
    pub rank: usize,
    /// Behind, On Track or Exceeded.
    pub status: ObjectiveStatus,
    /// Movement against the previous year.
    pub trend: PerformanceTrend,
}

/// Parallel arrays for the comparison chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonGraph {
    /// Province names.
    pub province_names: Vec<String>,
    /// Objectives.
    pub objectives: Vec<i64>,
    /// Sales.
    pub achieved: Vec<i64>,
    /// Progress percentages.
    pub percentages: Vec<Decimal>,
    /// Band colours.
    pub achievement_colors: Vec<String>,
}

/// Distribution of progress percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonStats {
    /// Provinces covered.
    pub total_provinces: usize,
    /// Mean.
    pub average_percentage: Decimal,
    /// Median.
    pub median_percentage: Decimal,
    /// Highest.
    pub best_performance: Decimal,
    /// Lowest.
    pub worst_performance: Decimal,
    /// Population standard deviation.
    pub standard_deviation: Decimal,
}

// ============================================================================
// Sales analytics
// ============================================================================

/// Stock movement and trend for a day, week or month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesAnalytics {
    /// `daily`, `weekly` or `monthly`.
    pub period: Granularity,
    /// Days analysed.
    pub date_range: AnalyticsRange,
    /// Volume figures.
    pub stock_movement: StockMovement,
    /// Comparison with the preceding window.
    pub trend_analysis: TrendAnalysis,
    /// Breakdown by sub-period.
    pub sales_by_period: Vec<PeriodSales>,
    /// Largest seller, if any sales.
    pub top_province: Option<TopProvince>,
}

/// Window of the analytics report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsRange {
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Number of days.
    pub days: i64,
}

/// Volume figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovement {
    /// Quantity sold.
    pub total_quantity_sold: i64,
    /// Number of sale events.
    pub total_sales_transactions: i64,
    /// Quantity per sale event.
    pub average_quantity_per_sale: Decimal,
    /// Quantity per day.
    pub daily_average_quantity: Decimal,
    /// Day with the most sales.
    pub peak_sales_date: Option<NaiveDate>,
    /// Sales on that day.
    pub peak_sales_quantity: i64,
}

/// Comparison with the preceding window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Sold in the window.
    pub current_period_total: i64,
    /// Sold in the preceding window.
    pub previous_period_total: i64,
    /// Change in percent.
    pub growth_percentage: Decimal,
    /// up, down or stable.
    pub trend_direction: GrowthDirection,
    /// Day with the most sales.
    pub best_performing_day: Option<NaiveDate>,
    /// Day with the fewest non-zero sales.
    pub worst_performing_day: Option<NaiveDate>,
}

/// Sales of one sub-period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSales {
    /// Key: slot label or date.
    pub period: String,
    /// Human label.
    pub label: String,
    /// Quantity sold.
    pub quantity: i64,
    /// Number of sale events.
    pub transactions: i64,
}

/// Largest seller of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProvince {
    /// Province.
    pub province_uuid: ProvinceId,
    /// Province name.
    pub province_name: String,
    /// Quantity sold.
    pub total_quantity: i64,
    /// Number of sale events.
    pub sales_count: i64,
}
