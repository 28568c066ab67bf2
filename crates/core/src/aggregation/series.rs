//! Time series and rankings.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use salesdash_shared::ProvinceScope;
use salesdash_shared::types::ProvinceId;

use super::Aggregator;
use crate::calendar::{BucketKey, DateRange, Granularity, TimeWindow};
use crate::facts::{DailyTotal, FactError, FactRepository};

/// One point of a bucketed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Chronological key.
    pub key: BucketKey,
    /// Summed quantity.
    pub value: i64,
}

impl Bucket {
    /// Display label of the bucket.
    #[must_use]
    pub fn label(&self) -> String {
        self.key.label()
    }
}

/// Ranking criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    /// Sales total.
    Total,
    /// Achievement percentage.
    Achievement,
}

/// Something that can be ranked by total or achievement.
pub trait Rankable {
    /// Sales total.
    fn total(&self) -> i64;
    /// Achievement percentage.
    fn achievement(&self) -> Decimal;
}

impl Aggregator {
    /// Single sum over a window.
    ///
    /// # Errors
    ///
    /// Returns `FactError` if the repository fails.
    pub async fn total_for_window<R: FactRepository + ?Sized>(
        repo: &R,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<i64, FactError> {
        repo.sum_quantity(scope, window).await
    }

    /// Sums per bucket covering every bucket the range touches, in order.
    ///
    /// Buckets without sales are present with 0.
    ///
    /// # Errors
    ///
    /// Returns `FactError` if the repository fails.
    pub async fn bucketed_sums<R: FactRepository + ?Sized>(
        repo: &R,
        scope: &ProvinceScope,
        range: &DateRange,
        granularity: Granularity,
    ) -> Result<Vec<Bucket>, FactError> {
        let sums = repo
            .sum_grouped_by(scope, range.window(), granularity)
            .await?;
        Ok(Self::dense(range, granularity, &sums))
    }

    /// Expands sparse sums into one bucket per period of the range.
    #[must_use]
    pub fn dense(
        range: &DateRange,
        granularity: Granularity,
        sums: &BTreeMap<BucketKey, i64>,
    ) -> Vec<Bucket> {
        let mut buckets: Vec<Bucket> = Vec::new();
        for day in range.days() {
            let key = granularity.key_of(day);
            if buckets.last().is_some_and(|b| b.key == key) {
                continue;
            }
            buckets.push(Bucket {
                key,
                value: sums.get(&key).copied().unwrap_or(0),
            });
        }
        buckets
    }

    /// Groups daily rows by (province, bucket).
    #[must_use]
    pub fn bucket_by_province(
        rows: &[DailyTotal],
        granularity: Granularity,
    ) -> BTreeMap<ProvinceId, BTreeMap<BucketKey, i64>> {
        let mut grouped: BTreeMap<ProvinceId, BTreeMap<BucketKey, i64>> = BTreeMap::new();
        for row in rows {
            *grouped
                .entry(row.province_id)
                .or_default()
                .entry(granularity.key_of(row.day))
                .or_insert(0) += row.quantity;
        }
        grouped
    }

    /// Running sum; value `i` is the sum of `values[..=i]`.
    #[must_use]
    pub fn cumulative(values: &[i64]) -> Vec<i64> {
        values
            .iter()
            .scan(0_i64, |running, value| {
                *running += value;
                Some(*running)
            })
            .collect()
    }

    /// Sorts descending by the criterion; ties keep their input order.
    pub fn rank<T: Rankable>(items: &mut [T], by: RankBy) {
        match by {
            RankBy::Total => items.sort_by(|a, b| b.total().cmp(&a.total())),
            RankBy::Achievement => items.sort_by(|a, b| b.achievement().cmp(&a.achievement())),
        }
    }
}
