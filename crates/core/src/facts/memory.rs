//! In-memory fact store.
//!
//! Backs engine and API tests and local experiments. Event times are local
//! wall-clock times; recorded sales are converted from UTC with the store's
//! timezone (UTC unless set).

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use chrono_tz::Tz;
use salesdash_shared::ProvinceScope;
use salesdash_shared::types::{ProductId, ProvinceId, SaleId, UserId, YearTargetId};

use super::error::FactError;
use super::quantity::parse_quantity;
use super::repository::{FactRepository, NewSale, SaleStore};
use super::types::{DailyTotal, HourlyTotal, MonthTarget, Province, SaleEvent, WeekTarget, YearTarget};
use crate::calendar::{TimeWindow, parse_month_name, parse_week_number};

/// Fact store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryFactRepository {
    provinces: Vec<Province>,
    sales: RwLock<Vec<SaleEvent>>,
    years: Vec<YearTarget>,
    months: Vec<MonthTarget>,
    weeks: Vec<WeekTarget>,
    failure: Option<FactError>,
    latency: Option<Duration>,
    tz: Option<Tz>,
}

impl InMemoryFactRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a province.
    #[must_use]
    pub fn with_province(mut self, id: ProvinceId, name: &str) -> Self {
        self.provinces.push(Province {
            id,
            name: name.to_string(),
            country_id: None,
        });
        self
    }

    /// Adds a sale entered at a local time.
    #[must_use]
    pub fn with_sale(mut self, province_id: ProvinceId, quantity: i64, at: NaiveDateTime) -> Self {
        self.sales
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .push(SaleEvent {
                id: SaleId::new(),
                province_id,
                product_id: ProductId::new(),
                user_id: UserId::new(),
                quantity,
                occurred_at: at,
            });
        self
    }

    /// Adds a yearly objective stored as text.
    #[must_use]
    pub fn with_year_target(mut self, id: YearTargetId, year: i32, quantity: &str) -> Self {
        self.years.push(YearTarget {
            id,
            year,
            quantity: parse_quantity(quantity),
        });
        self
    }

    /// Adds a month objective stored as (month name, text quantity).
    #[must_use]
    pub fn with_month_target(
        mut self,
        year_id: YearTargetId,
        province_id: ProvinceId,
        month: &str,
        quantity: &str,
    ) -> Self {
        self.months.push(MonthTarget {
            year_id,
            province_id,
            month: parse_month_name(month),
            quantity: parse_quantity(quantity),
        });
        self
    }

    /// Adds a week objective stored as (week text, text quantity).
    #[must_use]
    pub fn with_week_target(
        mut self,
        year_id: YearTargetId,
        province_id: ProvinceId,
        week: &str,
        quantity: &str,
    ) -> Self {
        self.weeks.push(WeekTarget {
            year_id,
            province_id,
            week: parse_week_number(week),
            quantity: parse_quantity(quantity),
        });
        self
    }

    /// Makes every query fail with `error`.
    #[must_use]
    pub fn failing(mut self, error: FactError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Reporting timezone used to localise recorded sales.
    #[must_use]
    pub const fn with_timezone(mut self, tz: Tz) -> Self {
        self.tz = Some(tz);
        self
    }

    /// Delays every query by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    async fn checkpoint(&self) -> Result<(), FactError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn sales_in(&self, scope: &ProvinceScope, window: TimeWindow) -> Result<Vec<SaleEvent>, FactError> {
        let sales = self
            .sales
            .read()
            .map_err(|e| FactError::Unavailable(e.to_string()))?;
        Ok(sales
            .iter()
            .filter(|s| scope.contains(s.province_id) && window.contains(s.occurred_at))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FactRepository for InMemoryFactRepository {
    async fn sum_quantity(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<i64, FactError> {
        self.checkpoint().await?;
        Ok(self.sales_in(scope, window)?.iter().map(|s| s.quantity).sum())
    }

    async fn count_events(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<i64, FactError> {
        self.checkpoint().await?;
        let count = self.sales_in(scope, window)?.len();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn daily_totals(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<Vec<DailyTotal>, FactError> {
        self.checkpoint().await?;
        let mut grouped: BTreeMap<(NaiveDate, ProvinceId), (i64, i64)> = BTreeMap::new();
        for sale in self.sales_in(scope, window)? {
            let entry = grouped
                .entry((sale.occurred_at.date(), sale.province_id))
                .or_default();
            entry.0 += sale.quantity;
            entry.1 += 1;
        }
        Ok(grouped
            .into_iter()
            .map(|((day, province_id), (quantity, events))| DailyTotal {
                province_id,
                day,
                quantity,
                events,
            })
            .collect())
    }

    async fn hourly_totals(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<Vec<HourlyTotal>, FactError> {
        self.checkpoint().await?;
        let mut grouped: BTreeMap<(NaiveDate, u32, ProvinceId), HourlyTotal> = BTreeMap::new();
        for sale in self.sales_in(scope, window)? {
            let day = sale.occurred_at.date();
            let hour = sale.occurred_at.hour();
            let entry = grouped
                .entry((day, hour, sale.province_id))
                .or_insert(HourlyTotal {
                    province_id: sale.province_id,
                    day,
                    hour,
                    quantity: 0,
                    events: 0,
                    last_event_at: sale.occurred_at,
                });
            entry.quantity += sale.quantity;
            entry.events += 1;
            entry.last_event_at = entry.last_event_at.max(sale.occurred_at);
        }
        Ok(grouped.into_values().collect())
    }

    async fn list_provinces(&self, scope: &ProvinceScope) -> Result<Vec<Province>, FactError> {
        self.checkpoint().await?;
        let mut provinces: Vec<Province> = self
            .provinces
            .iter()
            .filter(|p| scope.contains(p.id))
            .cloned()
            .collect();
        provinces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(provinces)
    }

    async fn find_year_target(&self, year: i32) -> Result<Option<YearTarget>, FactError> {
        self.checkpoint().await?;
        Ok(self.years.iter().find(|y| y.year == year).copied())
    }

    async fn find_month_targets(
        &self,
        year_id: YearTargetId,
        scope: &ProvinceScope,
    ) -> Result<Vec<MonthTarget>, FactError> {
        self.checkpoint().await?;
        Ok(self
            .months
            .iter()
            .filter(|m| m.year_id == year_id && scope.contains(m.province_id))
            .copied()
            .collect())
    }

    async fn find_week_targets(
        &self,
        year_id: YearTargetId,
        scope: &ProvinceScope,
    ) -> Result<Vec<WeekTarget>, FactError> {
        self.checkpoint().await?;
        Ok(self
            .weeks
            .iter()
            .filter(|w| w.year_id == year_id && scope.contains(w.province_id))
            .copied()
            .collect())
    }
}

#[async_trait]
impl SaleStore for InMemoryFactRepository {
    async fn record_sale(&self, sale: NewSale) -> Result<SaleEvent, FactError> {
        self.checkpoint().await?;
        if sale.quantity < 0 {
            return Err(FactError::Rejected(format!(
                "quantity must not be negative, got {}",
                sale.quantity
            )));
        }
        if !self.provinces.iter().any(|p| p.id == sale.province_id) {
            return Err(FactError::Rejected(format!(
                "unknown province {}",
                sale.province_id
            )));
        }
        let event = SaleEvent {
            id: SaleId::new(),
            province_id: sale.province_id,
            product_id: sale.product_id,
            user_id: sale.user_id,
            quantity: sale.quantity,
            occurred_at: sale
                .occurred_at
                .with_timezone(&self.tz.unwrap_or(Tz::UTC))
                .naive_local(),
        };
        self.sales
            .write()
            .map_err(|e| FactError::Unavailable(e.to_string()))?
            .push(event.clone());
        Ok(event)
    }
}
