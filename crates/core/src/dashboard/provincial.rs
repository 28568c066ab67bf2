//! Provincial analysis.

use std::collections::BTreeMap;

use salesdash_shared::types::ProvinceId;

use super::assembler::{DashboardAssembler, Directory, totals_by_province};
use super::error::DashboardError;
use super::query::RangeQuery;
use super::types::{
    ContributionBucket, DataPoint, IntradayPattern, ProvinceContribution, ProvinceSeries,
    ProvinceTarget, ProvincialAnalysis, SlotAverages,
};
use crate::aggregation::{Aggregator, SlotBreakdown};
use crate::calendar::{BucketKey, TimeSlot};
use crate::facts::{DailyTotal, FactRepository};

impl<R: FactRepository + ?Sized> DashboardAssembler<R> {
    pub(super) async fn build_provincial_analysis(
        &self,
        query: &RangeQuery,
    ) -> Result<ProvincialAnalysis, DashboardError> {
        let granularity = query.granularity();
        let scope = &query.scope;
        let window = query.range.window();

        let (rows, hours, provinces, targets) = futures::try_join!(
            self.repo.daily_totals(scope, window),
            self.repo.hourly_totals(scope, window),
            self.repo.list_provinces(scope),
            self.targets.resolve_targets(&query.range, scope),
        )?;

        let directory = Directory::new(&provinces);
        let by_province = Aggregator::bucket_by_province(&rows, granularity);
        let totals = totals_by_province(&rows);
        let slots = Aggregator::slots_by_province(&hours);

        let provincial_comparison = provinces
            .iter()
            .map(|p| ProvinceSeries {
                province_uuid: p.id,
                province_name: p.name.clone(),
                data_points: by_province
                    .get(&p.id)
                    .into_iter()
                    .flatten()
                    .filter(|(_, value)| **value > 0)
                    .map(|(key, value)| DataPoint {
                        label: key.short_label(),
                        value: *value,
                    })
                    .collect(),
            })
            .collect();

        let intraday_pattern = provinces
            .iter()
            .map(|p| IntradayPattern {
                province_uuid: p.id,
                province_name: p.name.clone(),
                time_slots: slot_averages(&slots.get(&p.id).copied().unwrap_or_default()),
            })
            .collect();

        let province_targets = provinces
            .iter()
            .map(|p| {
                let target = targets.get(&p.id).copied().unwrap_or(0);
                let actual = totals.get(&p.id).copied().unwrap_or(0);
                ProvinceTarget {
                    province_uuid: p.id,
                    province_name: p.name.clone(),
                    target,
                    actual,
                    achievement: Aggregator::achievement(actual, target),
                }
            })
            .collect();

        Ok(ProvincialAnalysis {
            provincial_comparison,
            contribution_data: contributions(&directory, &rows, granularity),
            intraday_pattern,
            time_granularity: granularity,
            province_targets,
        })
    }
}

fn slot_averages(slots: &SlotBreakdown) -> SlotAverages {
    SlotAverages {
        morning: slots.average_per_event(TimeSlot::Morning),
        midday: slots.average_per_event(TimeSlot::Midday),
        afternoon: slots.average_per_event(TimeSlot::Afternoon),
        evening: slots.average_per_event(TimeSlot::Evening),
    }
}

/// Province shares per bucket, for buckets with sales.
fn contributions(
    directory: &Directory<'_>,
    rows: &[DailyTotal],
    granularity: crate::calendar::Granularity,
) -> Vec<ContributionBucket> {
    let mut buckets: BTreeMap<BucketKey, BTreeMap<ProvinceId, i64>> = BTreeMap::new();
    for row in rows {
        *buckets
            .entry(granularity.key_of(row.day))
            .or_default()
            .entry(row.province_id)
            .or_insert(0) += row.quantity;
    }

    buckets
        .into_iter()
        .filter_map(|(key, sales)| {
            let total: i64 = sales.values().sum();
            if total <= 0 {
                return None;
            }
            let provinces = directory
                .with_sales(&sales)
                .into_iter()
                .map(|(id, name, sales)| ProvinceContribution {
                    province_uuid: id,
                    province_name: name,
                    sales,
                    percentage: Aggregator::contribution_share(sales, total),
                })
                .collect();
            Some(ContributionBucket {
                label: key.short_label(),
                timestamp: key.start(),
                provinces,
                total,
            })
        })
        .collect()
}
