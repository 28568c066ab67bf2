//! Intraday slot breakdowns.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use salesdash_shared::types::ProvinceId;

use super::Aggregator;
use crate::calendar::TimeSlot;
use crate::facts::HourlyTotal;

/// Sales of one day split across the four reporting slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotBreakdown {
    quantity: [i64; 4],
    events: [i64; 4],
    last_event_at: [Option<NaiveDateTime>; 4],
}

impl SlotBreakdown {
    /// Adds an hourly row; hours outside every slot are ignored.
    pub fn add(&mut self, row: &HourlyTotal) {
        let Some(slot) = TimeSlot::of_hour(row.hour) else {
            return;
        };
        let i = slot.index();
        self.quantity[i] += row.quantity;
        self.events[i] += row.events;
        self.last_event_at[i] = self.last_event_at[i].max(Some(row.last_event_at));
    }

    /// Quantity sold in the slot.
    #[must_use]
    pub const fn quantity(&self, slot: TimeSlot) -> i64 {
        self.quantity[slot.index()]
    }

    /// Number of sale events in the slot.
    #[must_use]
    pub const fn events(&self, slot: TimeSlot) -> i64 {
        self.events[slot.index()]
    }

    /// Sum of the four slots.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.quantity.iter().sum()
    }

    /// Average quantity per sale event in the slot.
    #[must_use]
    pub fn average_per_event(&self, slot: TimeSlot) -> Decimal {
        Aggregator::average(self.quantity(slot), self.events(slot))
    }

    /// Latest slot with an entry and the time of that entry.
    #[must_use]
    pub fn latest(&self) -> Option<(TimeSlot, NaiveDateTime)> {
        TimeSlot::ALL
            .iter()
            .rev()
            .find_map(|slot| self.last_event_at[slot.index()].map(|at| (*slot, at)))
    }

    /// Slots without entries whose window ended before `now`.
    #[must_use]
    pub fn missing(&self, day: NaiveDate, now: NaiveDateTime) -> Vec<TimeSlot> {
        TimeSlot::ALL
            .into_iter()
            .filter(|slot| slot.is_missing(day, self.events(*slot), now))
            .collect()
    }
}

impl Aggregator {
    /// Slot breakdown per province.
    #[must_use]
    pub fn slots_by_province(rows: &[HourlyTotal]) -> BTreeMap<ProvinceId, SlotBreakdown> {
        let mut slots: BTreeMap<ProvinceId, SlotBreakdown> = BTreeMap::new();
        for row in rows {
            slots.entry(row.province_id).or_default().add(row);
        }
        slots
    }

    /// Slot breakdown over every row.
    #[must_use]
    pub fn slots_overall(rows: &[HourlyTotal]) -> SlotBreakdown {
        let mut slots = SlotBreakdown::default();
        for row in rows {
            slots.add(row);
        }
        slots
    }

    /// Sales from midnight up to the end of each slot, for one day's rows.
    #[must_use]
    pub fn cumulative_by_slot(rows: &[HourlyTotal]) -> [i64; 4] {
        TimeSlot::ALL.map(|slot| {
            rows.iter()
                .filter(|row| row.hour < slot.end_hour())
                .map(|row| row.quantity)
                .sum()
        })
    }
}
