//! Typed rows returned by a fact repository.

use chrono::{NaiveDate, NaiveDateTime};
use salesdash_shared::types::{ProductId, ProvinceId, SaleId, UserId, YearTargetId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Province reference entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    /// Province ID.
    pub id: ProvinceId,
    /// Display name.
    pub name: String,
    /// Owning country.
    pub country_id: Option<Uuid>,
}

/// One recorded sale. Times are local to the reporting timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleEvent {
    /// Sale ID.
    pub id: SaleId,
    /// Province the sale belongs to.
    pub province_id: ProvinceId,
    /// Product sold.
    pub product_id: ProductId,
    /// User who entered the sale.
    pub user_id: UserId,
    /// Quantity sold, never negative.
    pub quantity: i64,
    /// When the sale happened.
    pub occurred_at: NaiveDateTime,
}

/// Sales of one province on one local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyTotal {
    /// Province.
    pub province_id: ProvinceId,
    /// Local day.
    pub day: NaiveDate,
    /// Sum of quantities.
    pub quantity: i64,
    /// Number of sale events.
    pub events: i64,
}

/// Sales of one province in one local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyTotal {
    /// Province.
    pub province_id: ProvinceId,
    /// Local day.
    pub day: NaiveDate,
    /// Local hour 0..=23.
    pub hour: u32,
    /// Sum of quantities.
    pub quantity: i64,
    /// Number of sale events.
    pub events: i64,
    /// Latest event inside the hour.
    pub last_event_at: NaiveDateTime,
}

/// Global yearly objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearTarget {
    /// Record ID, referenced by month and week targets.
    pub id: YearTargetId,
    /// Calendar year.
    pub year: i32,
    /// Yearly quantity.
    pub quantity: i64,
}

/// Per-province objective for a named month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthTarget {
    /// Owning year record.
    pub year_id: YearTargetId,
    /// Province.
    pub province_id: ProvinceId,
    /// Month 1..=12, `None` when the stored name is not a month.
    pub month: Option<u32>,
    /// Monthly quantity.
    pub quantity: i64,
}

/// Per-province objective for an ISO week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekTarget {
    /// Owning year record.
    pub year_id: YearTargetId,
    /// Province.
    pub province_id: ProvinceId,
    /// ISO week 1..=53, `None` when the stored text is not a week number.
    pub week: Option<u32>,
    /// Weekly quantity.
    pub quantity: i64,
}
