//! Global overview.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use futures::future::try_join_all;
use salesdash_shared::ProvinceScope;
use salesdash_shared::types::ProvinceId;

use super::assembler::{DashboardAssembler, Directory, totals_by_province};
use super::error::DashboardError;
use super::query::RangeQuery;
use super::types::{GlobalOverview, HeatmapCell, HeatmapRow, ProvincePerformance, SalesTrend};
use crate::aggregation::{Aggregator, RankBy};
use crate::calendar::{BucketKey, DateRange, Granularity, month_name};
use crate::facts::{DailyTotal, FactError, FactRepository};

/// Period targets keyed by (province, year, week or month).
type PeriodTargets = BTreeMap<(ProvinceId, i32, u32), i64>;

impl<R: FactRepository + ?Sized> DashboardAssembler<R> {
    pub(super) async fn build_global_overview(
        &self,
        query: &RangeQuery,
    ) -> Result<GlobalOverview, DashboardError> {
        let granularity = query.granularity();
        let heat = heatmap_granularity(granularity);
        let scope = &query.scope;

        let (rows, previous_total, provinces, targets, period_targets) = futures::try_join!(
            self.repo.daily_totals(scope, query.range.window()),
            self.repo.sum_quantity(scope, query.range.previous().window()),
            self.repo.list_provinces(scope),
            self.targets.resolve_targets(&query.range, scope),
            self.period_targets(&query.range, heat, scope),
        )?;

        let directory = Directory::new(&provinces);
        let total_sales: i64 = rows.iter().map(|row| row.quantity).sum();
        let totals = totals_by_province(&rows);

        let mut performances: Vec<ProvincePerformance> = directory
            .with_sales(&totals)
            .into_iter()
            .map(|(id, name, total)| {
                let target = targets.get(&id).copied().unwrap_or(0);
                ProvincePerformance {
                    uuid: id.to_string(),
                    name,
                    total_sales: total,
                    target,
                    achievement: Aggregator::achievement(total, target),
                }
            })
            .collect();
        Aggregator::rank(&mut performances, RankBy::Total);
        let best_province = performances.first().cloned().unwrap_or_default();
        let worst_province = performances.last().cloned().unwrap_or_default();
        Aggregator::rank(&mut performances, RankBy::Achievement);

        Ok(GlobalOverview {
            total_sales,
            previous_period_change: Aggregator::period_over_period_change(
                total_sales,
                previous_total,
            ),
            average_daily_sales: Aggregator::average(total_sales, query.range.day_count()),
            best_province,
            worst_province,
            sales_trend: sales_trend(&query.range, granularity, &rows),
            provincial_sales: performances,
            sales_heatmap: heatmap(&directory, &rows, heat, &period_targets),
            time_granularity: granularity,
        })
    }

    /// Exact week or month targets for every year the range touches.
    async fn period_targets(
        &self,
        range: &DateRange,
        granularity: Granularity,
        scope: &ProvinceScope,
    ) -> Result<PeriodTargets, FactError> {
        let weekly = granularity == Granularity::Weekly;
        let years: BTreeSet<i32> = range
            .days()
            .map(|day| if weekly { day.iso_week().year() } else { day.year() })
            .collect();
        let per_year = try_join_all(years.into_iter().map(|year| async move {
            let targets = if weekly {
                self.targets.week_targets_by_province(year, scope).await?
            } else {
                self.targets.month_targets_by_province(year, scope).await?
            };
            Ok::<_, FactError>((year, targets))
        }))
        .await?;

        let mut merged = PeriodTargets::new();
        for (year, targets) in per_year {
            for ((province, period), quantity) in targets {
                merged.insert((province, year, period), quantity);
            }
        }
        Ok(merged)
    }
}

/// Weekly cells for daily and weekly views, monthly cells otherwise.
const fn heatmap_granularity(granularity: Granularity) -> Granularity {
    match granularity {
        Granularity::Daily | Granularity::Weekly => Granularity::Weekly,
        Granularity::Monthly | Granularity::Quarterly | Granularity::Yearly => Granularity::Monthly,
    }
}

fn sales_trend(range: &DateRange, granularity: Granularity, rows: &[DailyTotal]) -> SalesTrend {
    let mut sums: BTreeMap<BucketKey, i64> = BTreeMap::new();
    for row in rows {
        *sums.entry(granularity.key_of(row.day)).or_insert(0) += row.quantity;
    }
    let buckets = Aggregator::dense(range, granularity, &sums);
    SalesTrend {
        labels: buckets.iter().map(crate::aggregation::Bucket::label).collect(),
        values: buckets.iter().map(|b| b.value).collect(),
        interval: granularity,
    }
}

/// One row per listed province; provinces without sales get no cells.
fn heatmap(
    directory: &Directory<'_>,
    rows: &[DailyTotal],
    granularity: Granularity,
    targets: &PeriodTargets,
) -> Vec<HeatmapRow> {
    let by_province = Aggregator::bucket_by_province(rows, granularity);
    directory
        .listed()
        .map(|(id, name)| {
            let period_data = by_province
                .get(&id)
                .into_iter()
                .flatten()
                .filter(|(_, sales)| **sales > 0)
                .map(|(key, sales)| {
                    let (period, target_key) = heatmap_period(key, granularity);
                    let target = targets
                        .get(&(id, target_key.0, target_key.1))
                        .copied()
                        .unwrap_or(0);
                    HeatmapCell {
                        period,
                        sales: *sales,
                        deviation: Aggregator::deviation(*sales, target),
                    }
                })
                .collect();
            HeatmapRow {
                province_uuid: id,
                province_name: name,
                period_data,
            }
        })
        .collect()
}

/// Label of a heatmap cell and the (year, period) its target is stored under.
fn heatmap_period(key: &BucketKey, granularity: Granularity) -> (String, (i32, u32)) {
    let start = key.start();
    if granularity == Granularity::Weekly {
        let iso = start.iso_week();
        (key.label(), (iso.year(), iso.week()))
    } else {
        (month_name(start.month()).to_string(), (start.year(), start.month()))
    }
}
