//! Achievement bands and status classifications.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Achievement band of a progress percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementLevel {
    /// At or above 100%.
    #[serde(rename = "Excellent - Target Achieved")]
    Excellent,
    /// 90% to 100%.
    #[serde(rename = "Very Good - Near Target")]
    VeryGood,
    /// 75% to 90%.
    #[serde(rename = "Good - On Track")]
    Good,
    /// 50% to 75%.
    #[serde(rename = "Fair - Behind Schedule")]
    Fair,
    /// 25% to 50%.
    #[serde(rename = "Poor - Significantly Behind")]
    Poor,
    /// Below 25%.
    #[serde(rename = "Critical - Far Behind Target")]
    Critical,
}

impl AchievementLevel {
    /// Band for a percentage.
    #[must_use]
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage >= Decimal::ONE_HUNDRED {
            Self::Excellent
        } else if percentage >= Decimal::from(90) {
            Self::VeryGood
        } else if percentage >= Decimal::from(75) {
            Self::Good
        } else if percentage >= Decimal::from(50) {
            Self::Fair
        } else if percentage >= Decimal::from(25) {
            Self::Poor
        } else {
            Self::Critical
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent - Target Achieved",
            Self::VeryGood => "Very Good - Near Target",
            Self::Good => "Good - On Track",
            Self::Fair => "Fair - Behind Schedule",
            Self::Poor => "Poor - Significantly Behind",
            Self::Critical => "Critical - Far Behind Target",
        }
    }

    /// Chart colour of the band.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Excellent => "#28a745",
            Self::VeryGood => "#6f42c1",
            Self::Good => "#007bff",
            Self::Fair => "#ffc107",
            Self::Poor => "#fd7e14",
            Self::Critical => "#dc3545",
        }
    }

    /// Returns true from 75% upwards.
    #[must_use]
    pub const fn is_on_track(self) -> bool {
        matches!(self, Self::Excellent | Self::VeryGood | Self::Good)
    }
}

impl std::fmt::Display for AchievementLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Year-objective status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveStatus {
    /// Below 50%.
    Behind,
    /// 50% to 100%.
    #[serde(rename = "On Track")]
    OnTrack,
    /// Above 100%.
    Exceeded,
}

impl ObjectiveStatus {
    /// Status for a progress percentage.
    #[must_use]
    pub fn from_percentage(percentage: Decimal) -> Self {
        if percentage < Decimal::from(50) {
            Self::Behind
        } else if percentage > Decimal::ONE_HUNDRED {
            Self::Exceeded
        } else {
            Self::OnTrack
        }
    }
}

/// Movement of a province's progress against the previous year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceTrend {
    /// More than five points better.
    Improving,
    /// More than five points worse.
    Declining,
    /// Within five points.
    Stable,
}

impl PerformanceTrend {
    /// Compares two progress percentages.
    #[must_use]
    pub fn between(current: Decimal, previous: Decimal) -> Self {
        let delta = current - previous;
        if delta > Decimal::from(5) {
            Self::Improving
        } else if delta < Decimal::from(-5) {
            Self::Declining
        } else {
            Self::Stable
        }
    }
}

/// Direction of period-over-period growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowthDirection {
    /// Growth above 5%.
    Up,
    /// Growth below -5%.
    Down,
    /// Anything in between.
    Stable,
}

impl GrowthDirection {
    /// Direction of a growth percentage.
    #[must_use]
    pub fn from_growth(growth: Decimal) -> Self {
        if growth > Decimal::from(5) {
            Self::Up
        } else if growth < Decimal::from(-5) {
            Self::Down
        } else {
            Self::Stable
        }
    }
}

/// Month-to-month movement of sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthTrend {
    /// More than the previous month.
    Increasing,
    /// Less than the previous month.
    Decreasing,
    /// Same as the previous month, or the first month.
    Stable,
}

impl MonthTrend {
    /// Movement from `previous` to `current`.
    #[must_use]
    pub fn between(current: i64, previous: Option<i64>) -> Self {
        match previous {
            Some(previous) if current > previous => Self::Increasing,
            Some(previous) if current < previous => Self::Decreasing,
            _ => Self::Stable,
        }
    }
}
