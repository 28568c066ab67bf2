//! Daily monitor.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use salesdash_shared::types::ProvinceId;

use super::assembler::{DashboardAssembler, Directory};
use super::error::DashboardError;
use super::query::DailyQuery;
use super::types::{
    ComplianceStatus, CumulativeSalesChart, DailyEntryRow, DailyMonitor, LastEntryStatus,
    ProvinceSales, ProvinceShare, SlotSales, SlotShare,
};
use crate::aggregation::{Aggregator, SlotBreakdown};
use crate::calendar::{DateRange, TimeSlot, TimeWindow};
use crate::facts::{FactRepository, Province};

/// Days averaged for the reference curve.
const AVERAGE_DAYS: i64 = 7;

impl<R: FactRepository + ?Sized> DashboardAssembler<R> {
    pub(super) async fn build_daily_monitor(
        &self,
        query: &DailyQuery,
    ) -> Result<DailyMonitor, DashboardError> {
        let day = DateRange::single(query.day)?.start;
        let yesterday = day - TimeDelta::days(1);
        let preceding_week = TimeWindow::new(
            (day - TimeDelta::days(AVERAGE_DAYS)).and_time(NaiveTime::MIN),
            day.and_time(NaiveTime::MIN),
        );
        let (pace_now, pace_then) = pace_windows(day, query.now);
        let scope = &query.scope;

        let (provinces, today, yesterday_rows, week_rows, target, current, previous) = futures::try_join!(
            self.repo.list_provinces(scope),
            self.repo.hourly_totals(scope, TimeWindow::of_day(day)),
            self.repo.hourly_totals(scope, TimeWindow::of_day(yesterday)),
            self.repo.hourly_totals(scope, preceding_week),
            self.targets.daily_target(day, scope),
            self.repo.sum_quantity(scope, pace_now),
            self.repo.sum_quantity(scope, pace_then),
        )?;

        let directory = Directory::new(&provinces);
        let total_sales_today: i64 = today.iter().map(|row| row.quantity).sum();
        let slots = Aggregator::slots_by_province(&today);
        let breakdown_of = |id: ProvinceId| slots.get(&id).copied().unwrap_or_default();

        let last_entry_status = provinces
            .iter()
            .map(|p| entry_status(p, &breakdown_of(p.id), day, query.now))
            .collect();
        let daily_entry_table = provinces
            .iter()
            .map(|p| entry_row(p, &breakdown_of(p.id)))
            .collect();

        let mut totals: BTreeMap<ProvinceId, i64> = BTreeMap::new();
        for row in &today {
            *totals.entry(row.province_id).or_insert(0) += row.quantity;
        }
        let mut ranked = directory.with_sales(&totals);
        ranked.sort_by(|a, b| b.2.cmp(&a.2));

        let province_bar_chart = ranked
            .iter()
            .map(|(id, name, total)| ProvinceSales {
                province_uuid: *id,
                province_name: name.clone(),
                total_sales: *total,
            })
            .collect();
        let province_pie_chart = ranked
            .into_iter()
            .map(|(id, name, total)| ProvinceShare {
                province_uuid: id,
                province_name: name,
                total_sales: total,
                percentage: Aggregator::contribution_share(total, total_sales_today),
            })
            .collect();

        let overall = Aggregator::slots_overall(&today);
        let time_slot_bar_chart = TimeSlot::ALL
            .iter()
            .map(|slot| SlotSales {
                time_slot: slot.label().to_string(),
                total_sales: overall.quantity(*slot),
            })
            .collect();
        let time_slot_pie_chart = TimeSlot::ALL
            .iter()
            .map(|slot| SlotShare {
                time_slot: slot.label().to_string(),
                sales: overall.quantity(*slot),
                percentage: Aggregator::contribution_share(overall.quantity(*slot), overall.total()),
            })
            .collect();

        let cumulative_sales_chart = CumulativeSalesChart {
            time_slots: TimeSlot::ALL.iter().map(|s| s.label().to_string()).collect(),
            today_sales: Aggregator::cumulative_by_slot(&today).to_vec(),
            yesterday_sales: Aggregator::cumulative_by_slot(&yesterday_rows).to_vec(),
            average_sales: Aggregator::cumulative_by_slot(&week_rows)
                .iter()
                .map(|sum| sum / AVERAGE_DAYS)
                .collect(),
        };

        Ok(DailyMonitor {
            total_sales_today,
            target_for_today: target,
            achievement_percent: Aggregator::achievement(total_sales_today, target),
            pace_vs_yesterday: Aggregator::period_over_period_change(current, previous),
            last_entry_status,
            cumulative_sales_chart,
            daily_entry_table,
            province_bar_chart,
            time_slot_bar_chart,
            province_pie_chart,
            time_slot_pie_chart,
        })
    }
}

/// Windows compared for the pace figure.
///
/// Viewing the current day compares midnight-to-now with the same stretch
/// of yesterday; any other day compares two full days.
pub(super) fn pace_windows(day: NaiveDate, now: NaiveDateTime) -> (TimeWindow, TimeWindow) {
    let start = day.and_time(NaiveTime::MIN);
    let yesterday_start = start - TimeDelta::days(1);
    if now.date() == day {
        let elapsed = now - start;
        (
            TimeWindow::new(start, now),
            TimeWindow::new(yesterday_start, yesterday_start + elapsed),
        )
    } else {
        (
            TimeWindow::of_day(day),
            TimeWindow::of_day(yesterday_start.date()),
        )
    }
}

fn entry_status(
    province: &Province,
    slots: &SlotBreakdown,
    day: NaiveDate,
    now: NaiveDateTime,
) -> LastEntryStatus {
    let latest = slots.latest();
    let missing = slots.missing(day, now);
    let compliance_status = match (latest.is_some(), missing.is_empty()) {
        (false, _) => ComplianceStatus::Missing,
        (true, true) => ComplianceStatus::Complete,
        (true, false) => ComplianceStatus::Partial,
    };
    LastEntryStatus {
        province_uuid: province.id,
        province_name: province.name.clone(),
        last_entry_time: latest
            .map(|(slot, _)| slot.label().to_string())
            .unwrap_or_default(),
        last_entry_at: latest.map(|(_, at)| at),
        missing_entries: missing.iter().map(|s| s.label().to_string()).collect(),
        compliance_status,
    }
}

fn entry_row(province: &Province, slots: &SlotBreakdown) -> DailyEntryRow {
    DailyEntryRow {
        province_uuid: province.id,
        province_name: province.name.clone(),
        entry_8am: slots.quantity(TimeSlot::Morning),
        entry_12pm: slots.quantity(TimeSlot::Midday),
        entry_3pm: slots.quantity(TimeSlot::Afternoon),
        entry_8pm: slots.quantity(TimeSlot::Evening),
        daily_total: slots.total(),
    }
}
