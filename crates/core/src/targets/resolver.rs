//! Per-province target totals for arbitrary date ranges.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use futures::future::try_join_all;
use salesdash_shared::ProvinceScope;
use salesdash_shared::types::ProvinceId;

use super::plan::{ProvincePlan, YearPlan};
use crate::calendar::DateRange;
use crate::facts::{FactError, FactRepository, YearTarget};

/// Which stored granularity a range resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPath {
    /// Month targets, for ranges spanning more than 90 days.
    Monthly,
    /// Week targets, for everything shorter.
    Weekly,
}

impl TargetPath {
    /// Path for a range span in days.
    #[must_use]
    pub const fn for_span(span_days: i64) -> Self {
        if span_days > 90 {
            Self::Monthly
        } else {
            Self::Weekly
        }
    }
}

/// Resolves stored targets into per-province figures.
#[derive(Debug)]
pub struct TargetResolver<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> Clone for TargetResolver<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R: FactRepository + ?Sized> TargetResolver<R> {
    /// Creates a resolver over a repository.
    #[must_use]
    pub const fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Target per province for `range`.
    ///
    /// Ranges longer than 90 days sum month targets, shorter ones sum every
    /// week target of the matching years. Month targets are filtered to the
    /// range's months only when the range stays inside one calendar year; a
    /// multi-year range takes every month target of each year.
    ///
    /// Provinces in scope (all provinces when unscoped) without any record on
    /// the chosen path receive `yearly / k` for that year, with `k` the size
    /// of the scope. Integer division; the remainder is dropped.
    ///
    /// # Errors
    ///
    /// Returns `FactError` if the repository fails.
    pub async fn resolve_targets(
        &self,
        range: &DateRange,
        scope: &ProvinceScope,
    ) -> Result<BTreeMap<ProvinceId, i64>, FactError> {
        let path = TargetPath::for_span(range.span_days());
        let years = self.years_of(range).await?;
        let members = self.scope_members(scope).await?;

        let per_year = try_join_all(
            years
                .iter()
                .map(|year| self.resolve_year(year, range, scope, path, &members)),
        )
        .await?;

        let mut totals: BTreeMap<ProvinceId, i64> =
            members.iter().map(|id| (*id, 0)).collect();
        for resolved in per_year {
            for (province_id, quantity) in resolved {
                *totals.entry(province_id).or_insert(0) += quantity;
            }
        }
        Ok(totals)
    }

    async fn resolve_year(
        &self,
        year: &YearTarget,
        range: &DateRange,
        scope: &ProvinceScope,
        path: TargetPath,
        members: &BTreeSet<ProvinceId>,
    ) -> Result<BTreeMap<ProvinceId, i64>, FactError> {
        let mut found: BTreeMap<ProvinceId, i64> = BTreeMap::new();
        match path {
            TargetPath::Monthly => {
                let single_year = range.start.year() == range.end.year();
                let months = range.start.month()..=range.end.month();
                for row in self.repo.find_month_targets(year.id, scope).await? {
                    let in_range = !single_year || row.month.is_some_and(|m| months.contains(&m));
                    if in_range {
                        *found.entry(row.province_id).or_insert(0) += row.quantity;
                    }
                }
            }
            TargetPath::Weekly => {
                for row in self.repo.find_week_targets(year.id, scope).await? {
                    *found.entry(row.province_id).or_insert(0) += row.quantity;
                }
            }
        }

        let share = Self::yearly_share(year.quantity, members.len());
        for province_id in members {
            found.entry(*province_id).or_insert(share);
        }
        Ok(found)
    }

    /// Stored month target of one province, 0 when the year or row is absent.
    ///
    /// # Errors
    ///
    /// Returns `FactError` if the repository fails.
    pub async fn monthly_target_for(
        &self,
        province_id: ProvinceId,
        year: i32,
        month: u32,
    ) -> Result<i64, FactError> {
        let Some(year) = self.repo.find_year_target(year).await? else {
            return Ok(0);
        };
        let rows = self
            .repo
            .find_month_targets(year.id, &ProvinceScope::single(province_id))
            .await?;
        Ok(rows
            .iter()
            .find(|row| row.month == Some(month))
            .map_or(0, |row| row.quantity))
    }

    /// Stored week target of one province, 0 when the year or row is absent.
    ///
    /// # Errors
    ///
    /// Returns `FactError` if the repository fails.
    pub async fn weekly_target_for(
        &self,
        province_id: ProvinceId,
        year: i32,
        week: u32,
    ) -> Result<i64, FactError> {
        let Some(year) = self.repo.find_year_target(year).await? else {
            return Ok(0);
        };
        let rows = self
            .repo
            .find_week_targets(year.id, &ProvinceScope::single(province_id))
            .await?;
        Ok(rows
            .iter()
            .find(|row| row.week == Some(week))
            .map_or(0, |row| row.quantity))
    }

    /// Week targets per province for an ISO year, keyed by week number.
    ///
    /// # Errors
    ///
    /// Returns `FactError` if the repository fails.
    pub async fn week_targets_by_province(
        &self,
        iso_year: i32,
        scope: &ProvinceScope,
    ) -> Result<BTreeMap<(ProvinceId, u32), i64>, FactError> {
        let Some(year) = self.repo.find_year_target(iso_year).await? else {
            return Ok(BTreeMap::new());
        };
        let mut weeks = BTreeMap::new();
        for row in self.repo.find_week_targets(year.id, scope).await? {
            if let Some(week) = row.week {
                weeks.entry((row.province_id, week)).or_insert(row.quantity);
            }
        }
        Ok(weeks)
    }

    /// Month targets per province for a year, keyed by month number.
    ///
    /// # Errors
    ///
    /// Returns `FactError` if the repository fails.
    pub async fn month_targets_by_province(
        &self,
        year: i32,
        scope: &ProvinceScope,
    ) -> Result<BTreeMap<(ProvinceId, u32), i64>, FactError> {
        let Some(year) = self.repo.find_year_target(year).await? else {
            return Ok(BTreeMap::new());
        };
        let mut months = BTreeMap::new();
        for row in self.repo.find_month_targets(year.id, scope).await? {
            if let Some(month) = row.month {
                months.entry((row.province_id, month)).or_insert(row.quantity);
            }
        }
        Ok(months)
    }

    /// Daily target for `day`: the sum of `week / 7` over the week rows of
    /// the ISO week containing it.
    ///
    /// # Errors
    ///
    /// Returns `FactError` if the repository fails.
    pub async fn daily_target(
        &self,
        day: NaiveDate,
        scope: &ProvinceScope,
    ) -> Result<i64, FactError> {
        let iso = day.iso_week();
        let Some(year) = self.repo.find_year_target(iso.year()).await? else {
            return Ok(0);
        };
        Ok(self
            .repo
            .find_week_targets(year.id, scope)
            .await?
            .iter()
            .filter(|row| row.week == Some(iso.week()))
            .map(|row| row.quantity / 7)
            .sum())
    }

    /// Year objectives of every province in scope.
    ///
    /// The fallback share divides the yearly figure across every province in
    /// the store, whatever the scope.
    ///
    /// # Errors
    ///
    /// Returns `FactError` if the repository fails.
    pub async fn year_plan(&self, year: i32, scope: &ProvinceScope) -> Result<YearPlan, FactError> {
        let (record, all, scoped) = futures::try_join!(
            self.repo.find_year_target(year),
            self.repo.list_provinces(&ProvinceScope::All),
            self.repo.list_provinces(scope),
        )?;

        let mut plans: BTreeMap<ProvinceId, ProvincePlan> = BTreeMap::new();
        let share = record.map_or(0, |r| Self::yearly_share(r.quantity, all.len()));
        for province in &scoped {
            plans.insert(province.id, ProvincePlan::new(province.id, share));
        }
        if let Some(record) = record {
            for row in self.repo.find_month_targets(record.id, scope).await? {
                if let (Some(plan), Some(month)) = (plans.get_mut(&row.province_id), row.month) {
                    plan.add_month(month, row.quantity);
                }
            }
        }
        Ok(YearPlan::new(year, scoped, plans))
    }

    async fn years_of(&self, range: &DateRange) -> Result<Vec<YearTarget>, FactError> {
        let lookups = (range.start.year()..=range.end.year())
            .map(|year| self.repo.find_year_target(year));
        Ok(try_join_all(lookups).await?.into_iter().flatten().collect())
    }

    async fn scope_members(&self, scope: &ProvinceScope) -> Result<BTreeSet<ProvinceId>, FactError> {
        match scope.ids() {
            Some(ids) => Ok(ids.clone()),
            None => Ok(self
                .repo
                .list_provinces(&ProvinceScope::All)
                .await?
                .into_iter()
                .map(|p| p.id)
                .collect()),
        }
    }

    fn yearly_share(yearly: i64, provinces: usize) -> i64 {
        match i64::try_from(provinces) {
            Ok(k) if k > 0 => yearly / k,
            _ => 0,
        }
    }
}
