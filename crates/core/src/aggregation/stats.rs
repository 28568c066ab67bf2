//! Descriptive statistics over percentages.

use rust_decimal::{Decimal, MathematicalOps};

use super::Aggregator;

impl Aggregator {
    /// Arithmetic mean rounded to 2 places; 0 for no values.
    #[must_use]
    pub fn mean(values: &[Decimal]) -> Decimal {
        Self::raw_mean(values).round_dp(2)
    }

    /// Median rounded to 2 places; 0 for no values.
    #[must_use]
    pub fn median(values: &[Decimal]) -> Decimal {
        let mut sorted = values.to_vec();
        sorted.sort();
        let mid = sorted.len() / 2;
        let median = match sorted.len() {
            0 => Decimal::ZERO,
            n if n % 2 == 0 => {
                let (low, high) = (sorted[mid - 1], sorted[mid]);
                low.checked_add(high).map_or_else(
                    || low / Decimal::TWO + high / Decimal::TWO,
                    |sum| sum / Decimal::TWO,
                )
            }
            _ => sorted[mid],
        };
        median.round_dp(2)
    }

    /// Population standard deviation rounded to 2 places; 0 for no values
    /// or when the squared deviations leave `Decimal`'s range.
    #[must_use]
    pub fn std_dev(values: &[Decimal]) -> Decimal {
        if values.is_empty() {
            return Decimal::ZERO;
        }
        let mean = Self::raw_mean(values);
        let squares = values.iter().try_fold(Decimal::ZERO, |acc, v| {
            let delta = v.checked_sub(mean)?;
            acc.checked_add(delta.checked_mul(delta)?)
        });
        let Some(squares) = squares else {
            return Decimal::ZERO;
        };
        let variance = squares / Decimal::from(values.len());
        variance.sqrt().unwrap_or(Decimal::ZERO).round_dp(2)
    }

    fn raw_mean(values: &[Decimal]) -> Decimal {
        if values.is_empty() {
            return Decimal::ZERO;
        }
        let count = Decimal::from(values.len());
        // Dividing first keeps the running sum inside Decimal's range.
        values
            .iter()
            .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(*v))
            .map_or_else(
                || values.iter().map(|v| *v / count).sum(),
                |sum| sum / count,
            )
    }
}
