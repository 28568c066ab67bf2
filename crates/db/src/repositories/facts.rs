//! PostgreSQL implementation of the fact repository.
//!
//! Sales are stored as UTC instants. Local windows become UTC bounds for
//! filtering, while day and hour grouping runs on `occurred_at AT TIME ZONE`
//! so buckets follow the reporting timezone.

use async_trait::async_trait;
use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use salesdash_core::calendar::{TimeWindow, parse_month_name, parse_week_number};
use salesdash_core::facts::{
    DailyTotal, FactError, FactRepository, HourlyTotal, MonthTarget, Province, WeekTarget,
    YearTarget, parse_quantity,
};
use salesdash_shared::ProvinceScope;
use salesdash_shared::types::{ProvinceId, YearTargetId};
use sea_orm::sea_query::{Expr, Order};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use tracing::{debug, error};
use uuid::Uuid;

use crate::entities::{months, provinces, sales, weeks, years};

#[derive(Debug, FromQueryResult)]
struct DailyRow {
    province_id: Uuid,
    day: NaiveDate,
    quantity: i64,
    events: i64,
}

#[derive(Debug, FromQueryResult)]
struct HourlyRow {
    province_id: Uuid,
    day: NaiveDate,
    hour: i32,
    quantity: i64,
    events: i64,
    last_event_at: NaiveDateTime,
}

/// Fact repository over the `sales`, `provinces` and target tables.
#[derive(Debug, Clone)]
pub struct SeaOrmFactRepository {
    db: DatabaseConnection,
    tz: Tz,
}

impl SeaOrmFactRepository {
    /// Creates a repository that buckets by local time in `tz`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, tz: Tz) -> Self {
        Self { db, tz }
    }

    /// Returns the reporting timezone.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    /// SQL expression for the local wall-clock time of a sale.
    ///
    /// IANA names never contain quotes, so the literal is safe to inline.
    fn local_time(&self) -> String {
        format!("(sales.occurred_at AT TIME ZONE '{}')", self.tz.name())
    }

    fn sales_in(&self, scope: &ProvinceScope, window: TimeWindow) -> Select<sales::Entity> {
        let query = sales::Entity::find()
            .filter(sales::Column::DeletedAt.is_null())
            .filter(sales::Column::OccurredAt.gte(to_utc(self.tz, window.start)))
            .filter(sales::Column::OccurredAt.lt(to_utc(self.tz, window.end)));
        scoped(query, sales::Column::ProvinceId, scope)
    }
}

/// Maps a local wall-clock time to the UTC instant it denotes.
///
/// An ambiguous time (clocks turned back) resolves to the earlier instant.
/// A time inside a forward gap is read with the offset in force the day
/// before, which moves it forward by the length of the gap.
fn to_utc(tz: Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => at.with_timezone(&Utc),
        LocalResult::None => {
            let offset = tz.offset_from_utc_datetime(&(local - TimeDelta::days(1))).fix();
            Utc.from_utc_datetime(&(local - offset))
        }
    }
}

fn scoped<E>(query: Select<E>, column: E::Column, scope: &ProvinceScope) -> Select<E>
where
    E: EntityTrait,
{
    match scope.ids() {
        None => query,
        Some(ids) => query.filter(column.is_in(ids.iter().map(|id| id.into_inner()))),
    }
}

pub(super) fn fact_error(err: DbErr) -> FactError {
    error!(error = %err, "Fact query failed");
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => FactError::Unavailable(err.to_string()),
        _ => FactError::Query(err.to_string()),
    }
}

fn out_of_range(what: &str, value: impl std::fmt::Display) -> FactError {
    FactError::Query(format!("{what} out of range: {value}"))
}

#[async_trait]
impl FactRepository for SeaOrmFactRepository {
    async fn sum_quantity(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<i64, FactError> {
        let total: Option<i64> = self
            .sales_in(scope, window)
            .select_only()
            .column_as(Expr::cust("COALESCE(SUM(sales.quantity), 0)::BIGINT"), "total")
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(fact_error)?;
        Ok(total.unwrap_or(0))
    }

    async fn count_events(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<i64, FactError> {
        let count = self
            .sales_in(scope, window)
            .count(&self.db)
            .await
            .map_err(fact_error)?;
        i64::try_from(count).map_err(|_| out_of_range("event count", count))
    }

    async fn daily_totals(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<Vec<DailyTotal>, FactError> {
        let day = format!("({})::date", self.local_time());
        let rows = self
            .sales_in(scope, window)
            .select_only()
            .column(sales::Column::ProvinceId)
            .column_as(Expr::cust(day.clone()), "day")
            .column_as(Expr::cust("SUM(sales.quantity)::BIGINT"), "quantity")
            .column_as(Expr::cust("COUNT(*)::BIGINT"), "events")
            .group_by(sales::Column::ProvinceId)
            .group_by(Expr::cust(day.clone()))
            .order_by(Expr::cust(day), Order::Asc)
            .order_by_asc(sales::Column::ProvinceId)
            .into_model::<DailyRow>()
            .all(&self.db)
            .await
            .map_err(fact_error)?;

        debug!(rows = rows.len(), "Loaded daily totals");
        Ok(rows
            .into_iter()
            .map(|row| DailyTotal {
                province_id: ProvinceId::from_uuid(row.province_id),
                day: row.day,
                quantity: row.quantity,
                events: row.events,
            })
            .collect())
    }

    async fn hourly_totals(
        &self,
        scope: &ProvinceScope,
        window: TimeWindow,
    ) -> Result<Vec<HourlyTotal>, FactError> {
        let local = self.local_time();
        let day = format!("({local})::date");
        let hour = format!("EXTRACT(HOUR FROM {local})::INT");
        let rows = self
            .sales_in(scope, window)
            .select_only()
            .column(sales::Column::ProvinceId)
            .column_as(Expr::cust(day.clone()), "day")
            .column_as(Expr::cust(hour.clone()), "hour")
            .column_as(Expr::cust("SUM(sales.quantity)::BIGINT"), "quantity")
            .column_as(Expr::cust("COUNT(*)::BIGINT"), "events")
            .column_as(Expr::cust(format!("MAX({local})")), "last_event_at")
            .group_by(sales::Column::ProvinceId)
            .group_by(Expr::cust(day.clone()))
            .group_by(Expr::cust(hour.clone()))
            .order_by(Expr::cust(day), Order::Asc)
            .order_by(Expr::cust(hour), Order::Asc)
            .order_by_asc(sales::Column::ProvinceId)
            .into_model::<HourlyRow>()
            .all(&self.db)
            .await
            .map_err(fact_error)?;

        debug!(rows = rows.len(), "Loaded hourly totals");
        rows.into_iter()
            .map(|row| {
                Ok(HourlyTotal {
                    province_id: ProvinceId::from_uuid(row.province_id),
                    day: row.day,
                    hour: u32::try_from(row.hour).map_err(|_| out_of_range("hour", row.hour))?,
                    quantity: row.quantity,
                    events: row.events,
                    last_event_at: row.last_event_at,
                })
            })
            .collect()
    }

    async fn list_provinces(&self, scope: &ProvinceScope) -> Result<Vec<Province>, FactError> {
        let query = provinces::Entity::find().filter(provinces::Column::DeletedAt.is_null());
        let rows = scoped(query, provinces::Column::Id, scope)
            .order_by_asc(provinces::Column::Name)
            .order_by_asc(provinces::Column::Id)
            .all(&self.db)
            .await
            .map_err(fact_error)?;

        Ok(rows
            .into_iter()
            .map(|row| Province {
                id: ProvinceId::from_uuid(row.id),
                name: row.name,
                country_id: row.country_id,
            })
            .collect())
    }

    async fn find_year_target(&self, year: i32) -> Result<Option<YearTarget>, FactError> {
        let row = years::Entity::find()
            .filter(years::Column::Year.eq(year))
            .one(&self.db)
            .await
            .map_err(fact_error)?;

        Ok(row.map(|row| YearTarget {
            id: YearTargetId::from_uuid(row.id),
            year: row.year,
            quantity: parse_quantity(&row.quantity),
        }))
    }

    async fn find_month_targets(
        &self,
        year_id: YearTargetId,
        scope: &ProvinceScope,
    ) -> Result<Vec<MonthTarget>, FactError> {
        let query = months::Entity::find().filter(months::Column::YearId.eq(year_id.into_inner()));
        let rows = scoped(query, months::Column::ProvinceId, scope)
            .all(&self.db)
            .await
            .map_err(fact_error)?;

        Ok(rows
            .into_iter()
            .map(|row| MonthTarget {
                year_id: YearTargetId::from_uuid(row.year_id),
                province_id: ProvinceId::from_uuid(row.province_id),
                month: parse_month_name(&row.month),
                quantity: parse_quantity(&row.quantity),
            })
            .collect())
    }

    async fn find_week_targets(
        &self,
        year_id: YearTargetId,
        scope: &ProvinceScope,
    ) -> Result<Vec<WeekTarget>, FactError> {
        let query = weeks::Entity::find().filter(weeks::Column::YearId.eq(year_id.into_inner()));
        let rows = scoped(query, weeks::Column::ProvinceId, scope)
            .all(&self.db)
            .await
            .map_err(fact_error)?;

        Ok(rows
            .into_iter()
            .map(|row| WeekTarget {
                year_id: YearTargetId::from_uuid(row.year_id),
                province_id: ProvinceId::from_uuid(row.province_id),
                week: parse_week_number(&row.week),
                quantity: parse_quantity(&row.quantity),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[rstest]
    #[case(chrono_tz::UTC, local(2025, 3, 1, 0, 0), "2025-03-01T00:00:00Z")]
    #[case(chrono_tz::Africa::Kinshasa, local(2025, 3, 1, 0, 0), "2025-02-28T23:00:00Z")]
    #[case(chrono_tz::Asia::Kolkata, local(2025, 3, 1, 8, 0), "2025-03-01T02:30:00Z")]
    fn test_local_midnight_maps_to_utc(
        #[case] tz: Tz,
        #[case] at: NaiveDateTime,
        #[case] expected: &str,
    ) {
        assert_eq!(to_utc(tz, at).to_rfc3339_opts(chrono::SecondsFormat::Secs, true), expected);
    }

    #[test]
    fn test_ambiguous_time_takes_earlier_instant() {
        // 02:30 happens twice in Berlin on 2025-10-26.
        let at = to_utc(chrono_tz::Europe::Berlin, local(2025, 10, 26, 2, 30));
        assert_eq!(at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true), "2025-10-26T00:30:00Z");
    }

    #[test]
    fn test_time_in_gap_moves_forward() {
        // 02:30 never happens in Berlin on 2025-03-30; it reads as 03:30.
        let gap = to_utc(chrono_tz::Europe::Berlin, local(2025, 3, 30, 2, 30));
        assert_eq!(gap.to_rfc3339_opts(chrono::SecondsFormat::Secs, true), "2025-03-30T01:30:00Z");
        let before = to_utc(chrono_tz::Europe::Berlin, local(2025, 3, 30, 1, 59));
        assert!(before < gap);
    }

    #[test]
    fn test_connection_errors_are_unavailable() {
        let err = fact_error(DbErr::ConnectionAcquire(sea_orm::ConnAcquireErr::Timeout));
        assert!(matches!(err, FactError::Unavailable(_)));
        let err = fact_error(DbErr::Custom("syntax".into()));
        assert!(matches!(err, FactError::Query(_)));
    }
}
