//! Multi-year historical trends.

use std::collections::BTreeMap;

use futures::future::try_join_all;
use salesdash_shared::types::ProvinceId;

use super::assembler::{DashboardAssembler, months_by_province};
use super::error::DashboardError;
use super::query::HistoricalQuery;
use super::types::{
    AnnualProvinceSales, CumulativePoint, GrowthCell, GrowthRow, HistoricalTrends, ViewBy,
    YearSeries, YearTotal,
};
use crate::aggregation::Aggregator;
use crate::calendar::{DateRange, month_abbrev};
use crate::facts::FactRepository;

/// Month sums of one year per province.
type YearMonths = BTreeMap<ProvinceId, [i64; 12]>;

impl<R: FactRepository + ?Sized> DashboardAssembler<R> {
    pub(super) async fn build_historical_trends(
        &self,
        query: &HistoricalQuery,
    ) -> Result<HistoricalTrends, DashboardError> {
        if query.years.is_empty() {
            return Err(DashboardError::InvalidInput(
                "at least one year is required".to_string(),
            ));
        }
        let ranges = query
            .years
            .iter()
            .map(|year| DateRange::year(*year))
            .collect::<Result<Vec<_>, _>>()?;
        let scope = &query.scope;

        let (provinces, per_year) = futures::try_join!(
            self.repo.list_provinces(scope),
            try_join_all(
                ranges
                    .iter()
                    .map(|range| self.repo.daily_totals(scope, range.window()))
            ),
        )?;
        let months: Vec<YearMonths> = per_year.iter().map(|rows| months_by_province(rows)).collect();

        let cumulative_yearly_sales = query
            .years
            .iter()
            .zip(&months)
            .map(|(year, by_province)| {
                let periods = periods(query.view_by, &overall(by_province));
                let values: Vec<i64> = periods.iter().map(|p| p.2).collect();
                YearSeries {
                    year: *year,
                    data_points: periods
                        .into_iter()
                        .zip(Aggregator::cumulative(&values))
                        .map(|((period, month_index, _), value)| CumulativePoint {
                            period,
                            month_index,
                            value,
                        })
                        .collect(),
                }
            })
            .collect();

        let annual_sales_by_province = provinces
            .iter()
            .map(|p| AnnualProvinceSales {
                province_uuid: p.id,
                province_name: p.name.clone(),
                yearly_data: query
                    .years
                    .iter()
                    .zip(&months)
                    .map(|(year, by_province)| YearTotal {
                        year: *year,
                        total_sales: months_of(by_province, p.id).iter().sum(),
                    })
                    .collect(),
            })
            .collect();

        let yoy_growth_heatmap = match (query.years.first(), query.years.get(1)) {
            (Some(first), Some(second)) => {
                let (current, previous) = if first >= second {
                    (&months[0], &months[1])
                } else {
                    (&months[1], &months[0])
                };
                provinces
                    .iter()
                    .map(|p| GrowthRow {
                        province_uuid: p.id,
                        province_name: p.name.clone(),
                        periods: periods(query.view_by, &months_of(current, p.id))
                            .into_iter()
                            .zip(periods(query.view_by, &months_of(previous, p.id)))
                            .map(|((period, month_index, current_sales), (_, _, previous_sales))| {
                                GrowthCell {
                                    period,
                                    month_index,
                                    current_sales,
                                    previous_sales,
                                    growth_percent: Aggregator::period_over_period_change(
                                        current_sales,
                                        previous_sales,
                                    ),
                                }
                            })
                            .collect(),
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        Ok(HistoricalTrends {
            cumulative_yearly_sales,
            annual_sales_by_province,
            yoy_growth_heatmap,
            selected_years: query.years.clone(),
            view_by: query.view_by,
        })
    }
}

fn months_of(months: &YearMonths, id: ProvinceId) -> [i64; 12] {
    months.get(&id).copied().unwrap_or([0; 12])
}

fn overall(months: &YearMonths) -> [i64; 12] {
    let mut sum = [0_i64; 12];
    for row in months.values() {
        for (slot, value) in sum.iter_mut().zip(row) {
            *slot += value;
        }
    }
    sum
}

/// (label, last month, quantity) per month or quarter.
fn periods(view_by: ViewBy, months: &[i64; 12]) -> Vec<(String, u32, i64)> {
    match view_by {
        ViewBy::Monthly => (1..=12_u32)
            .zip(months)
            .map(|(month, value)| (month_abbrev(month).to_string(), month, *value))
            .collect(),
        ViewBy::Quarterly => (1..=4_u32)
            .zip(months.chunks(3))
            .map(|(quarter, chunk)| (format!("Q{quarter}"), quarter * 3, chunk.iter().sum()))
            .collect(),
    }
}
