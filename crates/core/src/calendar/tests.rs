//! Calendar tests.

use chrono::{Datelike, NaiveDate, NaiveTime};
use proptest::prelude::*;
use rstest::rstest;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[rstest]
#[case(0, Granularity::Daily)]
#[case(30, Granularity::Daily)]
#[case(31, Granularity::Daily)]
#[case(32, Granularity::Weekly)]
#[case(90, Granularity::Weekly)]
#[case(91, Granularity::Monthly)]
#[case(364, Granularity::Monthly)]
fn test_granularity_thresholds(#[case] span: i64, #[case] expected: Granularity) {
    assert_eq!(Granularity::for_span(span), expected);
}

#[test]
fn test_january_has_span_thirty() {
    let january = DateRange::month(2025, 1).unwrap();
    assert_eq!(january.span_days(), 30);
    assert_eq!(january.day_count(), 31);
    assert_eq!(january.auto_granularity(), Granularity::Daily);
}

#[test]
fn test_end_before_start_is_rejected() {
    let err = DateRange::new(date(2025, 2, 1), date(2025, 1, 31)).unwrap_err();
    assert!(matches!(err, CalendarError::InvalidRange { .. }));
}

#[test]
fn test_window_is_half_open_over_whole_days() {
    let range = DateRange::new(date(2025, 1, 5), date(2025, 1, 6)).unwrap();
    let window = range.window();
    assert_eq!(window.start, date(2025, 1, 5).and_time(NaiveTime::MIN));
    assert_eq!(window.end, date(2025, 1, 7).and_time(NaiveTime::MIN));
    assert!(window.contains(date(2025, 1, 6).and_hms_opt(23, 59, 59).unwrap()));
    assert!(!window.contains(window.end));
}

#[test]
fn test_previous_range_has_equal_length() {
    let range = DateRange::new(date(2025, 3, 1), date(2025, 3, 10)).unwrap();
    let previous = range.previous();
    assert_eq!(previous.start, date(2025, 2, 19));
    assert_eq!(previous.end, date(2025, 2, 28));
    assert_eq!(previous.day_count(), range.day_count());
}

#[test]
fn test_month_to_date_and_iso_week() {
    let mtd = DateRange::month_to_date(date(2025, 9, 24)).unwrap();
    assert_eq!(mtd.start, date(2025, 9, 1));

    let week = DateRange::iso_week_of(date(2025, 9, 24)).unwrap();
    assert_eq!(week.start, date(2025, 9, 22));
    assert_eq!(week.end, date(2025, 9, 28));
}

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("2025-09-24").unwrap(), date(2025, 9, 24));
    assert!(matches!(parse_date("24/09/2025"), Err(CalendarError::InvalidDate(_))));
}

#[rstest]
#[case(Granularity::Daily, "2025-09-24")]
#[case(Granularity::Weekly, "Week 39")]
#[case(Granularity::Monthly, "September 2025")]
#[case(Granularity::Quarterly, "Q3 2025")]
#[case(Granularity::Yearly, "2025")]
fn test_bucket_labels(#[case] granularity: Granularity, #[case] label: &str) {
    assert_eq!(granularity.key_of(date(2025, 9, 24)).label(), label);
}

#[test]
fn test_month_keys_sort_chronologically_not_by_name() {
    let mut keys = vec![
        Granularity::Monthly.key_of(date(2025, 2, 2)),
        Granularity::Monthly.key_of(date(2025, 1, 20)),
        Granularity::Monthly.key_of(date(2024, 12, 1)),
    ];
    keys.sort();
    let labels: Vec<String> = keys.iter().map(BucketKey::label).collect();
    assert_eq!(labels, ["December 2024", "January 2025", "February 2025"]);
    assert_eq!(keys[1].short_label(), "Jan 2025");
}

#[test]
fn test_cross_year_iso_week_key() {
    // 2024-12-30 is Monday of ISO week 1 of 2025.
    let key = Granularity::Weekly.key_of(date(2025, 1, 2));
    assert_eq!(key.start(), date(2024, 12, 30));
    assert_eq!(key.label(), "Week 1");
}

#[rstest]
#[case(5, None)]
#[case(6, Some(TimeSlot::Morning))]
#[case(13, Some(TimeSlot::Midday))]
#[case(14, Some(TimeSlot::Afternoon))]
#[case(21, Some(TimeSlot::Evening))]
#[case(22, None)]
fn test_slot_of_hour(#[case] hour: u32, #[case] slot: Option<TimeSlot>) {
    assert_eq!(TimeSlot::of_hour(hour), slot);
}

#[test]
fn test_evening_slot_not_missing_before_it_ends() {
    let today = date(2025, 9, 24);
    let before_end = today.and_hms_opt(21, 30, 0).unwrap();
    assert!(!TimeSlot::Evening.is_missing(today, 0, before_end));
    assert!(!TimeSlot::Evening.is_missing(today, 0, TimeSlot::Evening.end_on(today)));

    let after_end = today.and_hms_opt(22, 0, 1).unwrap();
    assert!(TimeSlot::Evening.is_missing(today, 0, after_end));
    assert!(!TimeSlot::Evening.is_missing(today, 3, after_end));
}

proptest! {
    /// Every day of a range falls in exactly one bucket whose start is not after it.
    #[test]
    fn test_bucket_contains_its_day(
        offset in 0i64..20_000,
        granularity in prop_oneof![
            Just(Granularity::Daily),
            Just(Granularity::Weekly),
            Just(Granularity::Monthly),
            Just(Granularity::Quarterly),
            Just(Granularity::Yearly),
        ],
    ) {
        let day = date(2000, 1, 1) + chrono::TimeDelta::days(offset);
        let key = granularity.key_of(day);
        prop_assert!(key.start() <= day);
        prop_assert_eq!(granularity.key_of(key.start()), key);
        if granularity == Granularity::Monthly {
            prop_assert_eq!(key.start().month(), day.month());
        }
    }

    /// Range windows tile: a range and its predecessor touch without overlap.
    #[test]
    fn test_previous_window_abuts(offset in 0i64..10_000, len in 0i64..400) {
        let start = date(2001, 1, 1) + chrono::TimeDelta::days(offset);
        let range = DateRange::new(start, start + chrono::TimeDelta::days(len)).unwrap();
        prop_assert_eq!(range.previous().window().end, range.window().start);
        prop_assert_eq!(range.days().count() as i64, range.day_count());
    }
}
