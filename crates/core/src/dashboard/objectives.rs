//! Year-objective reports.
//!
//! Objectives come from the year plan; achieved figures are the year's
//! sales per calendar month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use salesdash_shared::ProvinceScope;
use salesdash_shared::types::ProvinceId;

use super::assembler::{DashboardAssembler, months_by_province};
use super::error::DashboardError;
use super::query::YearQuery;
use super::types::{
    AchievementDistribution, ComparisonGraph, ComparisonRow, ComparisonStats, ComparisonSummary,
    MonthHighlight, MonthProgress, MonthTrendPoint, MonthlyAggregate, ObjectiveGraph,
    OverallSummaryDashboard, ProvinceRanking, ProvinceYearSummary, QuarterPerformance,
    YearObjectiveProgress, YearObjectiveRow,
};
use crate::aggregation::{
    AchievementLevel, Aggregator, MonthTrend, ObjectiveStatus, PerformanceTrend, RankBy, Rankable,
};
use crate::calendar::{DateRange, month_name};
use crate::facts::{FactRepository, Province};
use crate::targets::YearPlan;

/// Number of provinces in the top and bottom lists.
const HIGHLIGHT_COUNT: usize = 5;

/// Progress threshold for being on track.
const ON_TRACK: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// Plan and monthly sales of one year.
struct YearFacts {
    plan: YearPlan,
    months: BTreeMap<ProvinceId, [i64; 12]>,
}

impl YearFacts {
    fn months(&self, id: ProvinceId) -> [i64; 12] {
        self.months.get(&id).copied().unwrap_or([0; 12])
    }

    fn standing(&self, province: &Province) -> Standing {
        let objective = self.plan.plan(province.id).objective();
        let achieved = self.months(province.id).iter().sum();
        let percentage = Aggregator::achievement(achieved, objective);
        Standing {
            province: province.clone(),
            objective,
            achieved,
            percentage,
            level: AchievementLevel::from_percentage(percentage),
        }
    }

    /// Standings in name order.
    fn standings(&self) -> Vec<Standing> {
        self.plan
            .provinces()
            .iter()
            .map(|p| self.standing(p))
            .collect()
    }
}

/// Year progress of a province.
#[derive(Debug, Clone)]
struct Standing {
    province: Province,
    objective: i64,
    achieved: i64,
    percentage: Decimal,
    level: AchievementLevel,
}

impl Standing {
    fn remaining(&self) -> i64 {
        (self.objective - self.achieved).max(0)
    }
}

impl Rankable for Standing {
    fn total(&self) -> i64 {
        self.achieved
    }

    fn achievement(&self) -> Decimal {
        self.percentage
    }
}

impl<R: FactRepository + ?Sized> DashboardAssembler<R> {
    async fn year_facts(&self, year: i32, scope: &ProvinceScope) -> Result<YearFacts, DashboardError> {
        let range = DateRange::year(year)?;
        let (plan, rows) = futures::try_join!(
            self.targets.year_plan(year, scope),
            self.repo.daily_totals(scope, range.window()),
        )?;
        Ok(YearFacts {
            plan,
            months: months_by_province(&rows),
        })
    }

    pub(super) async fn build_year_objectives(
        &self,
        query: &YearQuery,
    ) -> Result<Vec<YearObjectiveProgress>, DashboardError> {
        let facts = self.year_facts(query.year, &query.scope).await?;
        Ok(facts
            .standings()
            .into_iter()
            .map(|standing| {
                let plan = facts.plan.plan(standing.province.id);
                let sales = facts.months(standing.province.id);
                let monthly_breakdown: Vec<MonthProgress> = (1..=12_u32)
                    .zip(sales)
                    .map(|(month, achieved)| {
                        let target = plan.month_target(month);
                        MonthProgress {
                            month: month_name(month).to_string(),
                            month_number: month,
                            achieved,
                            target,
                            percentage: Aggregator::achievement(achieved, target),
                        }
                    })
                    .collect();
                let graph_data = ObjectiveGraph {
                    labels: monthly_breakdown.iter().map(|m| m.month.clone()).collect(),
                    objectives: monthly_breakdown.iter().map(|m| m.target).collect(),
                    achieved: monthly_breakdown.iter().map(|m| m.achieved).collect(),
                    percentages: monthly_breakdown.iter().map(|m| m.percentage).collect(),
                };
                YearObjectiveProgress {
                    province: standing.province.name,
                    province_uuid: standing.province.id,
                    year_objective: standing.objective,
                    total_achieved: standing.achieved,
                    progress_percentage: standing.percentage,
                    achievement_level: standing.level,
                    monthly_breakdown,
                    graph_data,
                }
            })
            .collect())
    }

    pub(super) async fn build_year_objective_table(
        &self,
        query: &YearQuery,
    ) -> Result<Vec<YearObjectiveRow>, DashboardError> {
        let facts = self.year_facts(query.year, &query.scope).await?;
        Ok(facts
            .standings()
            .into_iter()
            .map(|standing| YearObjectiveRow {
                remaining: standing.remaining(),
                status: ObjectiveStatus::from_percentage(standing.percentage),
                province: standing.province.name,
                province_uuid: standing.province.id,
                year_objective: standing.objective,
                total_achieved: standing.achieved,
                progress_percentage: standing.percentage,
                achievement_level: standing.level,
            })
            .collect())
    }

    pub(super) async fn build_province_year_summaries(
        &self,
        query: &YearQuery,
    ) -> Result<Vec<ProvinceYearSummary>, DashboardError> {
        let facts = self.year_facts(query.year, &query.scope).await?;
        let elapsed = elapsed_months(query.year, query.today);
        Ok(facts
            .standings()
            .into_iter()
            .map(|standing| {
                let plan = facts.plan.plan(standing.province.id);
                let sales = facts.months(standing.province.id);
                let highlight = |month: u32| MonthHighlight {
                    month: month_name(month).to_string(),
                    month_number: month,
                    sales: sales[month as usize - 1],
                    percentage_of_objective: Aggregator::achievement(
                        sales[month as usize - 1],
                        standing.objective,
                    ),
                };

                let quarterly_performance = (1..=4_u32)
                    .map(|quarter| {
                        let start = (quarter as usize - 1) * 3;
                        let quarter_sales: i64 = sales[start..start + 3].iter().sum();
                        let target = plan.quarter_target(quarter);
                        let percentage = Aggregator::achievement(quarter_sales, target);
                        QuarterPerformance {
                            quarter: format!("Q{quarter}"),
                            sales: quarter_sales,
                            target,
                            percentage,
                            achievement_level: AchievementLevel::from_percentage(percentage),
                        }
                    })
                    .collect();

                let monthly_trend = (1..=12_u32)
                    .zip(Aggregator::cumulative(&sales))
                    .map(|(month, cumulative)| {
                        let i = month as usize - 1;
                        MonthTrendPoint {
                            month: month_name(month).to_string(),
                            month_number: month,
                            sales: sales[i],
                            cumulative,
                            trend: MonthTrend::between(sales[i], i.checked_sub(1).map(|p| sales[p])),
                        }
                    })
                    .collect();

                ProvinceYearSummary {
                    province: standing.province.name.clone(),
                    province_uuid: standing.province.id,
                    year: query.year,
                    year_objective: standing.objective,
                    total_sales: standing.achieved,
                    progress_percentage: standing.percentage,
                    achievement_level: standing.level,
                    best_month: best_month(&sales).map(highlight).unwrap_or_default(),
                    worst_month: worst_month(&sales).map(highlight).unwrap_or_default(),
                    average_monthly_sales: Aggregator::average(standing.achieved, 12),
                    remaining_to_target: standing.remaining(),
                    projected_year_end: project_year_end(standing.achieved, elapsed),
                    is_on_track: standing.percentage >= ON_TRACK,
                    quarterly_performance,
                    monthly_trend,
                }
            })
            .collect())
    }

    pub(super) async fn build_overall_summary(
        &self,
        query: &YearQuery,
    ) -> Result<OverallSummaryDashboard, DashboardError> {
        let facts = self.year_facts(query.year, &query.scope).await?;
        let mut standings = facts.standings();

        let total_year_objective: i64 = standings.iter().map(|s| s.objective).sum();
        let total_achieved: i64 = standings.iter().map(|s| s.achieved).sum();
        let mut achievement_distribution = AchievementDistribution::default();
        let (mut on_track, mut exceeded, mut behind) = (0, 0, 0);
        for standing in &standings {
            achievement_distribution.record(standing.level);
            if standing.percentage >= Decimal::ONE_HUNDRED {
                exceeded += 1;
            } else if standing.percentage >= ON_TRACK {
                on_track += 1;
            } else {
                behind += 1;
            }
        }

        let monthly_aggregate_progress = (1..=12_u32)
            .map(|month| {
                let mut aggregate = MonthlyAggregate {
                    month: month_name(month).to_string(),
                    month_number: month,
                    total_achieved: 0,
                    total_target: 0,
                    percentage: Decimal::ZERO,
                    provinces_met_target: 0,
                };
                for standing in &standings {
                    let sales = facts.months(standing.province.id)[month as usize - 1];
                    let target = facts.plan.plan(standing.province.id).month_target(month);
                    aggregate.total_achieved += sales;
                    aggregate.total_target += target;
                    if sales >= target {
                        aggregate.provinces_met_target += 1;
                    }
                }
                aggregate.percentage =
                    Aggregator::achievement(aggregate.total_achieved, aggregate.total_target);
                aggregate
            })
            .collect();

        Aggregator::rank(&mut standings, RankBy::Achievement);
        let rankings: Vec<ProvinceRanking> = standings
            .into_iter()
            .enumerate()
            .map(|(i, standing)| ProvinceRanking {
                rank: i + 1,
                province: standing.province.name,
                province_uuid: standing.province.id,
                achieved: standing.achieved,
                objective: standing.objective,
                percentage: standing.percentage,
                achievement_level: standing.level,
            })
            .collect();
        let bottom_start = rankings.len().saturating_sub(HIGHLIGHT_COUNT);

        Ok(OverallSummaryDashboard {
            total_provinces: rankings.len(),
            year: query.year,
            total_year_objective,
            total_achieved,
            overall_progress_percentage: Aggregator::achievement(total_achieved, total_year_objective),
            provinces_on_track: on_track,
            provinces_exceeded: exceeded,
            provinces_behind: behind,
            top_performing_provinces: rankings.iter().take(HIGHLIGHT_COUNT).cloned().collect(),
            bottom_performing_provinces: rankings[bottom_start..].to_vec(),
            monthly_aggregate_progress,
            achievement_distribution,
        })
    }

    pub(super) async fn build_comparison_summary(
        &self,
        query: &YearQuery,
    ) -> Result<ComparisonSummary, DashboardError> {
        let previous_year = query.year.checked_sub(1).ok_or_else(|| {
            DashboardError::InvalidInput(format!("Year {} has no previous year", query.year))
        })?;
        let (facts, previous) = futures::try_join!(
            self.year_facts(query.year, &query.scope),
            self.year_facts(previous_year, &query.scope),
        )?;

        let mut standings = facts.standings();
        Aggregator::rank(&mut standings, RankBy::Achievement);

        let table_data: Vec<ComparisonRow> = standings
            .iter()
            .enumerate()
            .map(|(i, standing)| {
                let before = previous.standing(&standing.province).percentage;
                ComparisonRow {
                    province: standing.province.name.clone(),
                    province_uuid: standing.province.id,
                    objective: standing.objective,
                    achieved: standing.achieved,
                    percentage: standing.percentage,
                    remaining: standing.remaining(),
                    achievement_level: standing.level,
                    rank: i + 1,
                    status: ObjectiveStatus::from_percentage(standing.percentage),
                    trend: PerformanceTrend::between(standing.percentage, before),
                }
            })
            .collect();

        let graph_data = ComparisonGraph {
            province_names: table_data.iter().map(|r| r.province.clone()).collect(),
            objectives: table_data.iter().map(|r| r.objective).collect(),
            achieved: table_data.iter().map(|r| r.achieved).collect(),
            percentages: table_data.iter().map(|r| r.percentage).collect(),
            achievement_colors: table_data
                .iter()
                .map(|r| r.achievement_level.color().to_string())
                .collect(),
        };

        let percentages = &graph_data.percentages;
        let summary = ComparisonStats {
            total_provinces: table_data.len(),
            average_percentage: Aggregator::mean(percentages),
            median_percentage: Aggregator::median(percentages),
            best_performance: percentages.first().copied().unwrap_or_default(),
            worst_performance: percentages.last().copied().unwrap_or_default(),
            standard_deviation: Aggregator::std_dev(percentages),
        };

        Ok(ComparisonSummary {
            table_data,
            graph_data,
            summary,
        })
    }
}

/// Months of `year` that have elapsed as of `today`.
pub(super) fn elapsed_months(year: i32, today: NaiveDate) -> i64 {
    match year.cmp(&today.year()) {
        std::cmp::Ordering::Less => 12,
        std::cmp::Ordering::Equal => i64::from(today.month()),
        std::cmp::Ordering::Greater => 0,
    }
}

/// `total / elapsed * 12`, 0 before the year starts.
pub(super) const fn project_year_end(total: i64, elapsed: i64) -> i64 {
    if elapsed == 0 { 0 } else { total / elapsed * 12 }
}

/// Month with the most sales; the earliest wins a tie. None without sales.
pub(super) fn best_month(sales: &[i64; 12]) -> Option<u32> {
    let mut best: Option<(u32, i64)> = None;
    for (month, value) in (1..=12_u32).zip(sales) {
        if *value > 0 && best.is_none_or(|(_, top)| *value > top) {
            best = Some((month, *value));
        }
    }
    best.map(|(month, _)| month)
}

/// Month with the fewest non-zero sales; the earliest wins a tie.
pub(super) fn worst_month(sales: &[i64; 12]) -> Option<u32> {
    let mut worst: Option<(u32, i64)> = None;
    for (month, value) in (1..=12_u32).zip(sales) {
        if *value > 0 && worst.is_none_or(|(_, low)| *value < low) {
            worst = Some((month, *value));
        }
    }
    worst.map(|(month, _)| month)
}
