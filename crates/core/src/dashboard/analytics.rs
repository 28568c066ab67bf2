//! Sales analytics over a day, ISO week or month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use salesdash_shared::types::ProvinceId;

use super::assembler::{DashboardAssembler, Directory};
use super::error::DashboardError;
use super::query::AnalyticsQuery;
use super::types::{
    AnalyticsRange, PeriodSales, SalesAnalytics, StockMovement, TopProvince, TrendAnalysis,
};
use crate::aggregation::{Aggregator, GrowthDirection};
use crate::calendar::{DateRange, Granularity, TimeSlot};
use crate::facts::{DailyTotal, FactRepository, HourlyTotal};

/// Years the analytics report accepts.
pub const ANALYTICS_YEARS: std::ops::RangeInclusive<i32> = 2000..=2100;

impl AnalyticsQuery {
    /// Anchor used when no date is given: today within the current year,
    /// the last day of `year` otherwise.
    #[must_use]
    pub fn default_anchor(year: i32, today: NaiveDate) -> Option<NaiveDate> {
        if year == today.year() {
            Some(today)
        } else {
            NaiveDate::from_ymd_opt(year, 12, 31)
        }
    }

    /// Window of the report: the anchor's day, ISO week or month, clipped to
    /// the year.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError::InvalidInput` for an unsupported period or
    /// year, or when the window does not touch the year.
    pub fn window(&self) -> Result<DateRange, DashboardError> {
        if !ANALYTICS_YEARS.contains(&self.year) {
            return Err(DashboardError::InvalidInput(format!(
                "year must be between {} and {}, got {}",
                ANALYTICS_YEARS.start(),
                ANALYTICS_YEARS.end(),
                self.year
            )));
        }
        let window = match self.period {
            Granularity::Daily => DateRange::single(self.anchor)?,
            Granularity::Weekly => DateRange::iso_week_of(self.anchor)?,
            Granularity::Monthly => DateRange::month(self.anchor.year(), self.anchor.month())?,
            other => {
                return Err(DashboardError::InvalidInput(format!(
                    "period must be daily, weekly or monthly, got '{other}'"
                )));
            }
        };
        window
            .intersect(&DateRange::year(self.year)?)
            .ok_or_else(|| {
                DashboardError::InvalidInput(format!(
                    "date {} is outside year {}",
                    self.anchor, self.year
                ))
            })
    }
}

impl<R: FactRepository + ?Sized> DashboardAssembler<R> {
    pub(super) async fn build_sales_analytics(
        &self,
        query: &AnalyticsQuery,
    ) -> Result<SalesAnalytics, DashboardError> {
        let range = query.window()?;
        let scope = &query.scope;
        let intraday = query.period == Granularity::Daily;

        let (rows, hours, previous_total, provinces) = futures::try_join!(
            self.repo.daily_totals(scope, range.window()),
            async {
                if intraday {
                    self.repo.hourly_totals(scope, range.window()).await
                } else {
                    Ok(Vec::new())
                }
            },
            self.repo.sum_quantity(scope, range.previous().window()),
            self.repo.list_provinces(scope),
        )?;

        let days = per_day(&rows);
        let total: i64 = rows.iter().map(|row| row.quantity).sum();
        let transactions: i64 = rows.iter().map(|row| row.events).sum();
        let peak = peak_day(&days);
        let growth = Aggregator::period_over_period_change(total, previous_total);

        Ok(SalesAnalytics {
            period: query.period,
            date_range: AnalyticsRange {
                start_date: range.start,
                end_date: range.end,
                days: range.day_count(),
            },
            stock_movement: StockMovement {
                total_quantity_sold: total,
                total_sales_transactions: transactions,
                average_quantity_per_sale: Aggregator::average(total, transactions),
                daily_average_quantity: Aggregator::average(total, range.day_count()),
                peak_sales_date: peak.map(|(day, _)| day),
                peak_sales_quantity: peak.map_or(0, |(_, quantity)| quantity),
            },
            trend_analysis: TrendAnalysis {
                current_period_total: total,
                previous_period_total: previous_total,
                growth_percentage: growth,
                trend_direction: GrowthDirection::from_growth(growth),
                best_performing_day: peak.map(|(day, _)| day),
                worst_performing_day: low_day(&days),
            },
            sales_by_period: if intraday {
                by_slot(&hours)
            } else {
                by_day(&range, query.period, &days)
            },
            top_province: top_province(&Directory::new(&provinces), &rows),
        })
    }
}

/// (quantity, events) per day.
fn per_day(rows: &[DailyTotal]) -> BTreeMap<NaiveDate, (i64, i64)> {
    let mut days: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    for row in rows {
        let entry = days.entry(row.day).or_insert((0, 0));
        entry.0 += row.quantity;
        entry.1 += row.events;
    }
    days
}

/// Day with the most sales; the earliest wins a tie.
fn peak_day(days: &BTreeMap<NaiveDate, (i64, i64)>) -> Option<(NaiveDate, i64)> {
    let mut peak: Option<(NaiveDate, i64)> = None;
    for (day, (quantity, _)) in days {
        if *quantity > 0 && peak.is_none_or(|(_, top)| *quantity > top) {
            peak = Some((*day, *quantity));
        }
    }
    peak
}

/// Day with the fewest non-zero sales; the earliest wins a tie.
fn low_day(days: &BTreeMap<NaiveDate, (i64, i64)>) -> Option<NaiveDate> {
    let mut low: Option<(NaiveDate, i64)> = None;
    for (day, (quantity, _)) in days {
        if *quantity > 0 && low.is_none_or(|(_, least)| *quantity < least) {
            low = Some((*day, *quantity));
        }
    }
    low.map(|(day, _)| day)
}

fn by_slot(hours: &[HourlyTotal]) -> Vec<PeriodSales> {
    let slots = Aggregator::slots_overall(hours);
    TimeSlot::ALL
        .iter()
        .map(|slot| PeriodSales {
            period: slot.label().to_string(),
            label: format!("{:02}:00-{:02}:00", slot.start_hour(), slot.end_hour()),
            quantity: slots.quantity(*slot),
            transactions: slots.events(*slot),
        })
        .collect()
}

fn by_day(
    range: &DateRange,
    period: Granularity,
    days: &BTreeMap<NaiveDate, (i64, i64)>,
) -> Vec<PeriodSales> {
    let format = if period == Granularity::Weekly { "%A" } else { "%b %d" };
    range
        .days()
        .map(|day| {
            let (quantity, transactions) = days.get(&day).copied().unwrap_or((0, 0));
            PeriodSales {
                period: day.to_string(),
                label: day.format(format).to_string(),
                quantity,
                transactions,
            }
        })
        .collect()
}

/// Largest seller; name order breaks ties.
fn top_province(directory: &Directory<'_>, rows: &[DailyTotal]) -> Option<TopProvince> {
    let mut totals: BTreeMap<ProvinceId, i64> = BTreeMap::new();
    let mut events: BTreeMap<ProvinceId, i64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.province_id).or_insert(0) += row.quantity;
        *events.entry(row.province_id).or_insert(0) += row.events;
    }
    let mut top: Option<(ProvinceId, String, i64)> = None;
    for candidate in directory.with_sales(&totals) {
        if top.as_ref().is_none_or(|(_, _, best)| candidate.2 > *best) {
            top = Some(candidate);
        }
    }
    top.map(|(id, name, total_quantity)| TopProvince {
        province_uuid: id,
        province_name: name,
        total_quantity,
        sales_count: events.get(&id).copied().unwrap_or(0),
    })
}
