//! Percentages and averages.

use rust_decimal::Decimal;

use super::Aggregator;

impl Aggregator {
    /// `num / den * 100` rounded to 2 places; 0 when `den` is 0.
    #[must_use]
    pub fn percent_of(num: Decimal, den: Decimal) -> Decimal {
        if den.is_zero() {
            Decimal::ZERO
        } else {
            (num / den * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }

    /// Achievement: `actual / target * 100`, 0 when the target is 0.
    #[must_use]
    pub fn achievement(actual: i64, target: i64) -> Decimal {
        Self::percent_of(Decimal::from(actual), Decimal::from(target))
    }

    /// Change against the previous figure in percent, 0 when it was 0.
    #[must_use]
    pub fn period_over_period_change(current: i64, previous: i64) -> Decimal {
        Self::percent_of(Decimal::from(current) - Decimal::from(previous), Decimal::from(previous))
    }

    /// Share of `part` in `whole` in percent, 0 when the whole is 0.
    #[must_use]
    pub fn contribution_share(part: i64, whole: i64) -> Decimal {
        Self::percent_of(Decimal::from(part), Decimal::from(whole))
    }

    /// Deviation of sales from a target in percent, 0 when the target is 0.
    #[must_use]
    pub fn deviation(actual: i64, target: i64) -> Decimal {
        Self::period_over_period_change(actual, target)
    }

    /// `total / count` rounded to 2 places, 0 when `count` is 0.
    #[must_use]
    pub fn average(total: i64, count: i64) -> Decimal {
        if count == 0 {
            Decimal::ZERO
        } else {
            (Decimal::from(total) / Decimal::from(count)).round_dp(2)
        }
    }
}
