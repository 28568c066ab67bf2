//! Dashboard query parameters.
//!
//! Every parameter arrives as raw text so a malformed value surfaces as a
//! 400 in the standard envelope instead of an extractor rejection.

use chrono::{Datelike, NaiveDate};
use salesdash_core::calendar::{DateRange, Granularity, check_year, parse_date};
use salesdash_core::dashboard::ViewBy;
use salesdash_shared::types::ProvinceId;
use salesdash_shared::{AppError, ProvinceScope};
use serde::Deserialize;

/// Query string accepted by every dashboard route.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DashboardParams {
    /// First day, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Single day for the daily monitor and analytics anchor.
    pub date: Option<String>,
    /// One province.
    pub province_uuid: Option<String>,
    /// Comma-separated provinces; wins over `province_uuid`.
    pub provinces: Option<String>,
    /// Calendar year.
    pub year: Option<String>,
    /// Comma-separated years for historical trends.
    pub years: Option<String>,
    /// `monthly` or `quarterly`.
    pub view_by: Option<String>,
    /// `daily`, `weekly` or `monthly`.
    pub period: Option<String>,
    /// Explicit bucket size, overriding the span-based choice.
    pub granularity: Option<String>,
}

fn present(raw: Option<&String>) -> Option<&str> {
    raw.map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn invalid(msg: String) -> AppError {
    AppError::Validation(msg)
}

fn parse_day(raw: &str) -> Result<NaiveDate, AppError> {
    parse_date(raw).map_err(|e| invalid(e.to_string()))
}

fn parse_year(raw: &str) -> Result<i32, AppError> {
    let year = raw
        .trim()
        .parse::<i32>()
        .map_err(|_| invalid(format!("Invalid year '{raw}'")))?;
    check_year(year).map_err(|e| invalid(e.to_string()))?;
    Ok(year)
}

impl DashboardParams {
    /// Provinces the caller asked for, before role scoping.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if a province id is not a UUID.
    pub fn requested_scope(&self) -> Result<ProvinceScope, AppError> {
        let raw = present(self.provinces.as_ref()).or_else(|| present(self.province_uuid.as_ref()));
        let Some(raw) = raw else {
            return Ok(ProvinceScope::All);
        };
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<ProvinceId>()
                    .map_err(|_| invalid(format!("Invalid province id '{s}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ProvinceScope::from_ids(ids))
    }

    /// Date range, defaulting to month-to-date.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a malformed date or an end before
    /// the start.
    pub fn range(&self, today: NaiveDate) -> Result<DateRange, AppError> {
        let start = match present(self.start_date.as_ref()) {
            Some(raw) => parse_day(raw)?,
            None => today.with_day(1).unwrap_or(today),
        };
        let end = match present(self.end_date.as_ref()) {
            Some(raw) => parse_day(raw)?,
            None => today,
        };
        DateRange::new(start, end).map_err(|e| invalid(e.to_string()))
    }

    /// Single day, defaulting to `today`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a malformed date.
    pub fn date(&self, today: NaiveDate) -> Result<NaiveDate, AppError> {
        present(self.date.as_ref()).map_or(Ok(today), parse_day)
    }

    /// Optional day, for callers with their own default.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a malformed date.
    pub fn date_opt(&self) -> Result<Option<NaiveDate>, AppError> {
        present(self.date.as_ref()).map(parse_day).transpose()
    }

    /// Explicit granularity, if any.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an unknown name.
    pub fn granularity(&self) -> Result<Option<Granularity>, AppError> {
        present(self.granularity.as_ref())
            .map(|raw| raw.parse::<Granularity>().map_err(|e| invalid(e.to_string())))
            .transpose()
    }

    /// Year, defaulting to the current one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the year is not an integer or is
    /// outside the supported calendar.
    pub fn year(&self, today: NaiveDate) -> Result<i32, AppError> {
        present(self.year.as_ref()).map_or(Ok(today.year()), parse_year)
    }

    /// Years for historical trends, defaulting to the current and two
    /// previous years.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if any year is not an integer.
    pub fn years(&self, today: NaiveDate) -> Result<Vec<i32>, AppError> {
        let Some(raw) = present(self.years.as_ref()) else {
            let current = today.year();
            return Ok(vec![current, current - 1, current - 2]);
        };
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_year)
            .collect()
    }

    /// Historical view, monthly unless asked otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an unknown view.
    pub fn view_by(&self) -> Result<ViewBy, AppError> {
        present(self.view_by.as_ref()).map_or(Ok(ViewBy::default()), |raw| {
            raw.parse::<ViewBy>().map_err(invalid)
        })
    }

    /// Analytics period, monthly unless asked otherwise.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an unknown period.
    pub fn period(&self) -> Result<Granularity, AppError> {
        present(self.period.as_ref()).map_or(Ok(Granularity::Monthly), |raw| {
            raw.parse::<Granularity>().map_err(|e| invalid(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 24).unwrap()
    }

    #[test]
    fn test_defaults() {
        let params = DashboardParams::default();
        assert_eq!(params.requested_scope().unwrap(), ProvinceScope::All);
        let range = params.range(today()).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(range.end, today());
        assert_eq!(params.year(today()).unwrap(), 2025);
        assert_eq!(params.years(today()).unwrap(), vec![2025, 2024, 2023]);
        assert_eq!(params.view_by().unwrap(), ViewBy::Monthly);
        assert_eq!(params.period().unwrap(), Granularity::Monthly);
        assert_eq!(params.granularity().unwrap(), None);
    }

    #[test]
    fn test_provinces_win_over_province_uuid() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let params = DashboardParams {
            provinces: Some(format!("{a}, {b}")),
            province_uuid: Some(Uuid::from_u128(3).to_string()),
            ..DashboardParams::default()
        };
        assert_eq!(
            params.requested_scope().unwrap(),
            ProvinceScope::from_ids([ProvinceId::from_uuid(a), ProvinceId::from_uuid(b)])
        );
    }

    #[test]
    fn test_empty_provinces_falls_back_to_province_uuid() {
        let a = Uuid::from_u128(7);
        let params = DashboardParams {
            provinces: Some(String::new()),
            province_uuid: Some(a.to_string()),
            ..DashboardParams::default()
        };
        assert_eq!(
            params.requested_scope().unwrap(),
            ProvinceScope::single(ProvinceId::from_uuid(a))
        );
    }

    #[rstest]
    #[case(DashboardParams { province_uuid: Some("kinshasa".into()), ..DashboardParams::default() })]
    #[case(DashboardParams { provinces: Some("not-a-uuid,also-bad".into()), ..DashboardParams::default() })]
    fn test_malformed_province_is_invalid(#[case] params: DashboardParams) {
        assert!(matches!(params.requested_scope(), Err(AppError::Validation(_))));
    }

    #[rstest]
    #[case(Some("2025-13-01"), None)]
    #[case(Some("yesterday"), None)]
    #[case(Some("2025-09-10"), Some("2025-09-01"))]
    fn test_bad_ranges_are_invalid(#[case] start: Option<&str>, #[case] end: Option<&str>) {
        let params = DashboardParams {
            start_date: start.map(String::from),
            end_date: end.map(String::from),
            ..DashboardParams::default()
        };
        assert!(matches!(params.range(today()), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_years_and_enums_parse() {
        let params = DashboardParams {
            years: Some("2025, 2023".into()),
            view_by: Some("Quarterly".into()),
            period: Some("weekly".into()),
            granularity: Some("daily".into()),
            ..DashboardParams::default()
        };
        assert_eq!(params.years(today()).unwrap(), vec![2025, 2023]);
        assert_eq!(params.view_by().unwrap(), ViewBy::Quarterly);
        assert_eq!(params.period().unwrap(), Granularity::Weekly);
        assert_eq!(params.granularity().unwrap(), Some(Granularity::Daily));
    }

    #[rstest]
    #[case(DashboardParams { year: Some("twenty".into()), ..DashboardParams::default() })]
    #[case(DashboardParams { year: Some("-2147483648".into()), ..DashboardParams::default() })]
    #[case(DashboardParams { years: Some("2025,0".into()), ..DashboardParams::default() })]
    #[case(DashboardParams { year: Some("10000".into()), ..DashboardParams::default() })]
    #[case(DashboardParams { years: Some("2025,x".into()), ..DashboardParams::default() })]
    #[case(DashboardParams { view_by: Some("weekly".into()), ..DashboardParams::default() })]
    #[case(DashboardParams { period: Some("hourly".into()), ..DashboardParams::default() })]
    fn test_malformed_values_are_invalid(#[case] params: DashboardParams) {
        let failed = params.year(today()).is_err()
            || params.years(today()).is_err()
            || params.view_by().is_err()
            || params.period().is_err();
        assert!(failed);
    }
}
