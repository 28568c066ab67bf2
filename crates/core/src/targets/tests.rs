//! Target resolution tests.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use salesdash_shared::ProvinceScope;
use salesdash_shared::types::{ProvinceId, YearTargetId};

use super::*;
use crate::calendar::DateRange;
use crate::facts::InMemoryFactRepository;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, end).unwrap()
}

fn resolver(repo: InMemoryFactRepository) -> TargetResolver<InMemoryFactRepository> {
    TargetResolver::new(Arc::new(repo))
}

#[tokio::test]
async fn test_whole_year_fallback_for_single_province_in_january() {
    let p = ProvinceId::new();
    let repo = InMemoryFactRepository::new()
        .with_province(p, "Kinshasa")
        .with_province(ProvinceId::new(), "Kongo Central")
        .with_year_target(YearTargetId::new(), 2025, "3650");

    let targets = resolver(repo)
        .resolve_targets(
            &range(date(2025, 1, 1), date(2025, 1, 31)),
            &ProvinceScope::single(p),
        )
        .await
        .unwrap();

    assert_eq!(TargetPath::for_span(30), TargetPath::Weekly);
    assert_eq!(targets.get(&p), Some(&3650));
    assert_eq!(targets.len(), 1);
}

#[tokio::test]
async fn test_yearly_remainder_is_dropped() {
    let ids = [ProvinceId::new(), ProvinceId::new(), ProvinceId::new()];
    let mut repo = InMemoryFactRepository::new().with_year_target(YearTargetId::new(), 2025, "100");
    for (i, id) in ids.iter().enumerate() {
        repo = repo.with_province(*id, &format!("P{i}"));
    }

    let targets = resolver(repo)
        .resolve_targets(&range(date(2025, 3, 1), date(2025, 3, 7)), &ProvinceScope::All)
        .await
        .unwrap();

    assert!(ids.iter().all(|id| targets[id] == 33));
    assert_eq!(targets.values().sum::<i64>(), 99);
}

#[tokio::test]
async fn test_monthly_path_filters_months_within_one_year() {
    let year = YearTargetId::new();
    let p = ProvinceId::new();
    let repo = InMemoryFactRepository::new()
        .with_province(p, "Kinshasa")
        .with_year_target(year, 2025, "12000")
        .with_month_target(year, p, "January", "100")
        .with_month_target(year, p, "February", "100")
        .with_month_target(year, p, "May", "100");

    let targets = resolver(repo)
        .resolve_targets(&range(date(2025, 1, 1), date(2025, 4, 30)), &ProvinceScope::All)
        .await
        .unwrap();

    assert_eq!(targets[&p], 200);
}

#[tokio::test]
async fn test_multi_year_monthly_path_takes_every_month() {
    let y2024 = YearTargetId::new();
    let y2025 = YearTargetId::new();
    let p = ProvinceId::new();
    let repo = InMemoryFactRepository::new()
        .with_province(p, "Kinshasa")
        .with_year_target(y2024, 2024, "0")
        .with_year_target(y2025, 2025, "0")
        .with_month_target(y2024, p, "March", "10")
        .with_month_target(y2024, p, "December", "20")
        .with_month_target(y2025, p, "January", "30")
        .with_month_target(y2025, p, "July", "40");

    let targets = resolver(repo)
        .resolve_targets(&range(date(2024, 11, 1), date(2025, 2, 28)), &ProvinceScope::All)
        .await
        .unwrap();

    assert_eq!(targets[&p], 100);
}

#[tokio::test]
async fn test_weekly_path_sums_every_week_and_falls_back_per_province() {
    let year = YearTargetId::new();
    let with_weeks = ProvinceId::new();
    let without = ProvinceId::new();
    let repo = InMemoryFactRepository::new()
        .with_province(with_weeks, "Kinshasa")
        .with_province(without, "Kwilu")
        .with_year_target(year, 2025, "5200")
        .with_week_target(year, with_weeks, "1", "70")
        .with_week_target(year, with_weeks, "W40", "140");

    let targets = resolver(repo)
        .resolve_targets(&range(date(2025, 9, 1), date(2025, 9, 14)), &ProvinceScope::All)
        .await
        .unwrap();

    assert_eq!(targets[&with_weeks], 210);
    assert_eq!(targets[&without], 2600);
}

#[tokio::test]
async fn test_missing_year_resolves_to_zero() {
    let p = ProvinceId::new();
    let resolver = resolver(InMemoryFactRepository::new().with_province(p, "Kinshasa"));

    let targets = resolver
        .resolve_targets(&range(date(2025, 1, 1), date(2025, 1, 31)), &ProvinceScope::All)
        .await
        .unwrap();
    assert_eq!(targets[&p], 0);
    assert_eq!(resolver.monthly_target_for(p, 2025, 1).await.unwrap(), 0);
    assert_eq!(resolver.weekly_target_for(p, 2025, 1).await.unwrap(), 0);
    assert_eq!(resolver.daily_target(date(2025, 1, 1), &ProvinceScope::All).await.unwrap(), 0);
}

#[tokio::test]
async fn test_single_period_lookups() {
    let year = YearTargetId::new();
    let p = ProvinceId::new();
    let resolver = resolver(
        InMemoryFactRepository::new()
            .with_province(p, "Kinshasa")
            .with_year_target(year, 2025, "1000")
            .with_month_target(year, p, "September", "310")
            .with_week_target(year, p, "Week 39", "77"),
    );

    assert_eq!(resolver.monthly_target_for(p, 2025, 9).await.unwrap(), 310);
    assert_eq!(resolver.monthly_target_for(p, 2025, 10).await.unwrap(), 0);
    assert_eq!(resolver.weekly_target_for(p, 2025, 39).await.unwrap(), 77);
    assert_eq!(resolver.weekly_target_for(ProvinceId::new(), 2025, 39).await.unwrap(), 0);
}

#[tokio::test]
async fn test_daily_target_divides_each_week_row_by_seven() {
    let year = YearTargetId::new();
    let a = ProvinceId::new();
    let b = ProvinceId::new();
    let resolver = resolver(
        InMemoryFactRepository::new()
            .with_year_target(year, 2025, "0")
            .with_week_target(year, a, "39", "70")
            .with_week_target(year, b, "39", "76")
            .with_week_target(year, b, "40", "700"),
    );

    let day = date(2025, 9, 24);
    assert_eq!(resolver.daily_target(day, &ProvinceScope::All).await.unwrap(), 20);
    assert_eq!(resolver.daily_target(day, &ProvinceScope::single(b)).await.unwrap(), 10);
}

#[tokio::test]
async fn test_daily_target_uses_iso_week_year() {
    let y2025 = YearTargetId::new();
    let p = ProvinceId::new();
    let resolver = resolver(
        InMemoryFactRepository::new()
            .with_year_target(y2025, 2025, "0")
            .with_week_target(y2025, p, "1", "14"),
    );

    // Monday 2024-12-30 opens ISO week 1 of 2025.
    let target = resolver
        .daily_target(date(2024, 12, 30), &ProvinceScope::All)
        .await
        .unwrap();
    assert_eq!(target, 2);
}

#[tokio::test]
async fn test_year_plan_objectives() {
    let year = YearTargetId::new();
    let planned = ProvinceId::new();
    let unplanned = ProvinceId::new();
    let resolver = resolver(
        InMemoryFactRepository::new()
            .with_province(planned, "Kinshasa")
            .with_province(unplanned, "Kwilu")
            .with_year_target(year, 2025, "2400")
            .with_month_target(year, planned, "January", "100")
            .with_month_target(year, planned, "February", "200"),
    );

    let plan = resolver.year_plan(2025, &ProvinceScope::All).await.unwrap();
    assert_eq!(plan.provinces().len(), 2);

    let stored = plan.plan(planned);
    assert_eq!(stored.objective(), 300);
    assert_eq!(stored.month_target(1), 100);
    assert_eq!(stored.month_target(3), 25);
    assert_eq!(stored.quarter_target(1), 300);
    assert_eq!(stored.quarter_target(2), 75);

    let fallback = plan.plan(unplanned);
    assert_eq!(fallback.objective(), 1200);
    assert_eq!(fallback.month_target(6), 100);
    assert_eq!(fallback.quarter_target(4), 300);
    assert_eq!(plan.total_objective(), 1500);
}

#[tokio::test]
async fn test_year_plan_share_ignores_scope() {
    let a = ProvinceId::new();
    let b = ProvinceId::new();
    let resolver = resolver(
        InMemoryFactRepository::new()
            .with_province(a, "A")
            .with_province(b, "B")
            .with_year_target(YearTargetId::new(), 2025, "1000"),
    );

    let plan = resolver.year_plan(2025, &ProvinceScope::single(a)).await.unwrap();
    assert_eq!(plan.provinces().len(), 1);
    assert_eq!(plan.plan(a).objective(), 500);
}

proptest! {
    /// Equal distribution drops exactly the remainder.
    #[test]
    fn test_distribution_drops_only_remainder(yearly in 0i64..10_000_000, k in 1usize..12) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let mut repo = InMemoryFactRepository::new()
            .with_year_target(YearTargetId::new(), 2025, &yearly.to_string());
        for i in 0..k {
            repo = repo.with_province(ProvinceId::new(), &format!("P{i}"));
        }
        let targets = runtime
            .block_on(resolver(repo).resolve_targets(
                &range(date(2025, 6, 1), date(2025, 6, 30)),
                &ProvinceScope::All,
            ))
            .unwrap();

        let k = i64::try_from(k).unwrap();
        prop_assert_eq!(targets.values().sum::<i64>(), yearly - yearly % k);
    }
}
