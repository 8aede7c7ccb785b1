//! Calendar unit a period is measured in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar unit for billing and membership cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl PeriodUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodUnit::Days => "days",
            PeriodUnit::Weeks => "weeks",
            PeriodUnit::Months => "months",
            PeriodUnit::Years => "years",
        }
    }

    /// Inclusive range of start points accepted for this unit.
    ///
    /// - Days: offset in days from the anchor
    /// - Weeks: ISO weekday, 1 = Monday
    /// - Months: day of month, clamped to short months
    /// - Years: months the cycle opens before the anchor month
    pub fn start_point_range(&self) -> (u32, u32) {
        match self {
            PeriodUnit::Days => (0, 366),
            PeriodUnit::Weeks => (1, 7),
            PeriodUnit::Months => (1, 31),
            PeriodUnit::Years => (0, 11),
        }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a unit name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown period unit: {0}")]
pub struct UnknownPeriodUnit(pub String);

impl FromStr for PeriodUnit {
    type Err = UnknownPeriodUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "days" | "day" => Ok(PeriodUnit::Days),
            "weeks" | "week" => Ok(PeriodUnit::Weeks),
            "months" | "month" => Ok(PeriodUnit::Months),
            "years" | "year" => Ok(PeriodUnit::Years),
            _ => Err(UnknownPeriodUnit(s.to_string())),
        }
    }
}
