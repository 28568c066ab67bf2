//! Repository contract tests against the in-memory store.

use chrono::{NaiveDate, NaiveDateTime};
use chrono::{TimeZone, Utc};
use salesdash_shared::ProvinceScope;
use salesdash_shared::types::{ProductId, ProvinceId, UserId, YearTargetId};

use super::*;
use crate::calendar::{DateRange, Granularity};

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 15, 0)
        .unwrap()
}

fn two_provinces() -> (InMemoryFactRepository, ProvinceId, ProvinceId) {
    let kin = ProvinceId::new();
    let kat = ProvinceId::new();
    let repo = InMemoryFactRepository::new()
        .with_province(kin, "Kinshasa")
        .with_province(kat, "Haut-Katanga")
        .with_sale(kin, 10, at(2025, 1, 5, 9))
        .with_sale(kin, 5, at(2025, 1, 20, 15))
        .with_sale(kat, 7, at(2025, 2, 2, 19))
        .with_sale(kat, 3, at(2025, 2, 2, 20));
    (repo, kin, kat)
}

#[tokio::test]
async fn test_empty_range_sums_to_zero() {
    let (repo, _, _) = two_provinces();
    let window = DateRange::month(2024, 6).unwrap().window();
    assert_eq!(repo.sum_quantity(&ProvinceScope::All, window).await.unwrap(), 0);
    assert_eq!(repo.count_events(&ProvinceScope::All, window).await.unwrap(), 0);
    assert!(repo.sum_by_day(&ProvinceScope::All, window).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_monthly_grouping_is_chronological() {
    let (repo, _, _) = two_provinces();
    let window = DateRange::year(2025).unwrap().window();
    let buckets = repo.sum_by_month(&ProvinceScope::All, window).await.unwrap();
    let labels: Vec<(String, i64)> = buckets.iter().map(|(k, v)| (k.label(), *v)).collect();
    assert_eq!(
        labels,
        [("January 2025".to_string(), 15), ("February 2025".to_string(), 10)]
    );
}

#[tokio::test]
async fn test_explicit_scope_is_never_widened() {
    let (repo, kin, kat) = two_provinces();
    let window = DateRange::year(2025).unwrap().window();
    let scope = ProvinceScope::single(kin);

    assert_eq!(repo.sum_quantity(&scope, window).await.unwrap(), 15);
    let by_province = repo.sum_by_province(&scope, window).await.unwrap();
    assert!(by_province.contains_key(&kin));
    assert!(!by_province.contains_key(&kat));

    let provinces = repo.list_provinces(&scope).await.unwrap();
    assert_eq!(provinces.len(), 1);
    assert_eq!(provinces[0].name, "Kinshasa");
}

#[tokio::test]
async fn test_provinces_ordered_by_name() {
    let (repo, _, _) = two_provinces();
    let names: Vec<String> = repo
        .list_provinces(&ProvinceScope::All)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Haut-Katanga", "Kinshasa"]);
}

#[tokio::test]
async fn test_hourly_totals_track_last_event() {
    let (repo, _, kat) = two_provinces();
    let window = DateRange::single(NaiveDate::from_ymd_opt(2025, 2, 2).unwrap())
        .unwrap()
        .window();
    let hours = repo.hourly_totals(&ProvinceScope::All, window).await.unwrap();
    assert_eq!(hours.len(), 2);
    assert!(hours.iter().all(|h| h.province_id == kat));
    assert_eq!(hours[0].hour, 19);
    assert_eq!(hours[1].last_event_at, at(2025, 2, 2, 20));
}

#[tokio::test]
async fn test_weekly_grouping_sums_across_days() {
    let (repo, _, _) = two_provinces();
    let window = DateRange::year(2025).unwrap().window();
    let weeks = repo
        .sum_grouped_by(&ProvinceScope::All, window, Granularity::Weekly)
        .await
        .unwrap();
    assert_eq!(weeks.values().sum::<i64>(), 25);
    assert_eq!(weeks.len(), 3);
}

#[tokio::test]
async fn test_text_targets_parse_at_boundary() {
    let year_id = YearTargetId::new();
    let kin = ProvinceId::new();
    let repo = InMemoryFactRepository::new()
        .with_year_target(year_id, 2025, " 3650 ")
        .with_month_target(year_id, kin, "january", "300")
        .with_month_target(year_id, kin, "Febtober", "oops")
        .with_week_target(year_id, kin, "Week 2", "70");

    let year = repo.find_year_target(2025).await.unwrap().unwrap();
    assert_eq!(year.quantity, 3650);
    assert!(repo.find_year_target(2024).await.unwrap().is_none());

    let months = repo.find_month_targets(year_id, &ProvinceScope::All).await.unwrap();
    assert_eq!(months[0].month, Some(1));
    assert_eq!(months[1].month, None);
    assert_eq!(months[1].quantity, 0);

    let weeks = repo.find_week_targets(year_id, &ProvinceScope::All).await.unwrap();
    assert_eq!(weeks[0].week, Some(2));
}

#[tokio::test]
async fn test_failure_propagates() {
    let repo = InMemoryFactRepository::new().failing(FactError::Unavailable("down".into()));
    let window = DateRange::year(2025).unwrap().window();
    let err = repo.sum_quantity(&ProvinceScope::All, window).await.unwrap_err();
    assert_eq!(err, FactError::Unavailable("down".into()));
}

#[tokio::test]
async fn test_recorded_sale_is_visible() {
    let kin = ProvinceId::new();
    let repo = InMemoryFactRepository::new().with_province(kin, "Kinshasa");
    let occurred_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    let event = repo
        .record_sale(NewSale {
            province_id: kin,
            product_id: ProductId::new(),
            user_id: UserId::new(),
            quantity: 4,
            occurred_at,
        })
        .await
        .unwrap();
    assert_eq!(event.quantity, 4);

    let window = DateRange::month(2025, 3).unwrap().window();
    assert_eq!(repo.sum_quantity(&ProvinceScope::All, window).await.unwrap(), 4);
}

#[tokio::test]
async fn test_recording_rejects_bad_sales() {
    let kin = ProvinceId::new();
    let repo = InMemoryFactRepository::new().with_province(kin, "Kinshasa");
    let sale = NewSale {
        province_id: kin,
        product_id: ProductId::new(),
        user_id: UserId::new(),
        quantity: -1,
        occurred_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
    };
    assert!(matches!(
        repo.record_sale(sale.clone()).await,
        Err(FactError::Rejected(_))
    ));
    let foreign = NewSale {
        province_id: ProvinceId::new(),
        quantity: 1,
        ..sale
    };
    assert!(matches!(
        repo.record_sale(foreign).await,
        Err(FactError::Rejected(_))
    ));
}

#[tokio::test]
async fn test_recorded_sales_are_localised() {
    let lubumbashi = ProvinceId::new();
    let repo = InMemoryFactRepository::new()
        .with_province(lubumbashi, "Haut-Katanga")
        .with_timezone(chrono_tz::Africa::Lubumbashi);
    let event = repo
        .record_sale(NewSale {
            province_id: lubumbashi,
            product_id: ProductId::new(),
            user_id: UserId::new(),
            quantity: 4,
            occurred_at: Utc.with_ymd_and_hms(2025, 1, 20, 23, 0, 0).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(
        event.occurred_at,
        NaiveDate::from_ymd_opt(2025, 1, 21)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap()
    );

    let scope = ProvinceScope::single(lubumbashi);
    let january_21 = DateRange::single(NaiveDate::from_ymd_opt(2025, 1, 21).unwrap())
        .unwrap()
        .window();
    assert_eq!(repo.sum_quantity(&scope, january_21).await.unwrap(), 4);
}
