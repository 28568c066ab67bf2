//! Read-side query contract over sale events and target records.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use salesdash_shared::ProvinceScope;
use salesdash_shared::types::{ProductId, ProvinceId, UserId, YearTargetId};

use super::error::FactError;
use super::types::{DailyTotal, HourlyTotal, MonthTarget, Province, SaleEvent, WeekTarget, YearTarget};
use crate::calendar::{BucketKey, Granularity, TimeWindow};

/// Read-only access to facts and targets.
///
/// Every window is half-open and expressed in local time. An
/// [`ProvinceScope::All`] scope means every province; an explicit scope is
/// applied as given and never widened.
#[async_trait]
pub trait FactRepository: Send + Sync {
    /// Sum of quantities in the window.
    async fn sum_quantity(&self, scope: &ProvinceScope, window: TimeWindow)
    -> Result<i64, FactError>;

    /// Number of sale events in the window.
    async fn count_events(&self, scope: &ProvinceScope, window: TimeWindow)
    -> Result<i64, FactError>;

    /// Per province and local day totals, ordered by day then province.
    async fn daily_totals(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<Vec<DailyTotal>, FactError>;

    /// Per province, local day and hour totals, ordered chronologically.
    async fn hourly_totals(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<Vec<HourlyTotal>, FactError>;

    /// Provinces in scope, ordered by name.
    async fn list_provinces(&self, scope: &ProvinceScope) -> Result<Vec<Province>, FactError>;

    /// Yearly objective record, if one exists.
    async fn find_year_target(&self, year: i32) -> Result<Option<YearTarget>, FactError>;

    /// Month targets of a year record for the provinces in scope.
    async fn find_month_targets(
        &self,
        year_id: YearTargetId,
        scope: &ProvinceScope,
    ) -> Result<Vec<MonthTarget>, FactError>;

    /// Week targets of a year record for the provinces in scope.
    async fn find_week_targets(
        &self,
        year_id: YearTargetId,
        scope: &ProvinceScope,
    ) -> Result<Vec<WeekTarget>, FactError>;

    /// Sums grouped by calendar bucket, in chronological order.
    async fn sum_grouped_by(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
        granularity: Granularity,
    ) -> Result<BTreeMap<BucketKey, i64>, FactError> {
        let rows = self.daily_totals(scope, window).await?;
        let mut buckets = BTreeMap::new();
        for row in rows {
            *buckets.entry(granularity.key_of(row.day)).or_insert(0) += row.quantity;
        }
        Ok(buckets)
    }

    /// Sums grouped by day.
    async fn sum_by_day(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<BTreeMap<BucketKey, i64>, FactError> {
        self.sum_grouped_by(scope, window, Granularity::Daily).await
    }

    /// Sums grouped by ISO week.
    async fn sum_by_week(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<BTreeMap<BucketKey, i64>, FactError> {
        self.sum_grouped_by(scope, window, Granularity::Weekly).await
    }

    /// Sums grouped by calendar month.
    async fn sum_by_month(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<BTreeMap<BucketKey, i64>, FactError> {
        self.sum_grouped_by(scope, window, Granularity::Monthly).await
    }

    /// Sums grouped by province; provinces without sales are absent.
    async fn sum_by_province(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<BTreeMap<ProvinceId, i64>, FactError> {
        let rows = self.daily_totals(scope, window).await?;
        let mut totals = BTreeMap::new();
        for row in rows {
            *totals.entry(row.province_id).or_insert(0) += row.quantity;
        }
        Ok(totals)
    }
}

/// A sale to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    /// Province.
    pub province_id: ProvinceId,
    /// Product.
    pub product_id: ProductId,
    /// Entering user.
    pub user_id: UserId,
    /// Quantity, never negative.
    pub quantity: i64,
    /// Instant of the sale.
    pub occurred_at: DateTime<Utc>,
}

/// The single write path into the fact store.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Stores a sale and returns it as recorded.
    async fn record_sale(&self, sale: NewSale) -> Result<SaleEvent, FactError>;
}
