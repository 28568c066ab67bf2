//! Yearly objectives broken down by month and quarter.

use std::collections::BTreeMap;

use salesdash_shared::types::ProvinceId;

use crate::facts::Province;

/// Objective of one province for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvincePlan {
    /// Province.
    pub province_id: ProvinceId,
    months: [Option<i64>; 12],
    fallback_share: i64,
}

impl ProvincePlan {
    /// Plan with no stored month targets.
    #[must_use]
    pub const fn new(province_id: ProvinceId, fallback_share: i64) -> Self {
        Self {
            province_id,
            months: [None; 12],
            fallback_share,
        }
    }

    /// Adds a stored month target; duplicates accumulate.
    pub fn add_month(&mut self, month: u32, quantity: i64) {
        let slot = month
            .checked_sub(1)
            .and_then(|i| self.months.get_mut(i as usize));
        if let Some(slot) = slot {
            *slot = Some(slot.unwrap_or(0) + quantity);
        }
    }

    /// Stored target for a month, if any.
    #[must_use]
    pub fn stored_month(&self, month: u32) -> Option<i64> {
        month
            .checked_sub(1)
            .and_then(|i| self.months.get(i as usize))
            .copied()
            .flatten()
    }

    /// Returns true if any month target is stored.
    #[must_use]
    pub fn has_month_targets(&self) -> bool {
        self.months.iter().any(Option::is_some)
    }

    /// Year objective: the stored months summed, else the yearly share.
    #[must_use]
    pub fn objective(&self) -> i64 {
        if self.has_month_targets() {
            self.months.iter().flatten().sum()
        } else {
            self.fallback_share
        }
    }

    /// Month target, falling back to a twelfth of the objective.
    #[must_use]
    pub fn month_target(&self, month: u32) -> i64 {
        self.stored_month(month)
            .unwrap_or_else(|| self.objective() / 12)
    }

    /// Quarter target: the stored months of the quarter, else a quarter of the objective.
    #[must_use]
    pub fn quarter_target(&self, quarter: u32) -> i64 {
        let first = quarter.saturating_sub(1) * 3 + 1;
        let stored: Vec<i64> = (first..first + 3)
            .filter_map(|m| self.stored_month(m))
            .collect();
        if stored.is_empty() {
            self.objective() / 4
        } else {
            stored.iter().sum()
        }
    }
}

/// Objectives of every province in a scope for one year.
#[derive(Debug, Clone)]
pub struct YearPlan {
    /// Calendar year.
    pub year: i32,
    provinces: Vec<Province>,
    plans: BTreeMap<ProvinceId, ProvincePlan>,
}

impl YearPlan {
    /// Builds a plan; `provinces` keeps its order for reporting.
    #[must_use]
    pub const fn new(
        year: i32,
        provinces: Vec<Province>,
        plans: BTreeMap<ProvinceId, ProvincePlan>,
    ) -> Self {
        Self {
            year,
            provinces,
            plans,
        }
    }

    /// Provinces covered, ordered by name.
    #[must_use]
    pub fn provinces(&self) -> &[Province] {
        &self.provinces
    }

    /// Plan of a province; an unknown province has a zero objective.
    #[must_use]
    pub fn plan(&self, province_id: ProvinceId) -> ProvincePlan {
        self.plans
            .get(&province_id)
            .copied()
            .unwrap_or_else(|| ProvincePlan::new(province_id, 0))
    }

    /// Sum of every province objective.
    #[must_use]
    pub fn total_objective(&self) -> i64 {
        self.plans.values().map(ProvincePlan::objective).sum()
    }
}
