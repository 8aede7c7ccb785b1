//! One-time payment expiration policy.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::configuration::PeriodSettings;
use crate::domain::period::{add_units, PeriodError};

/// How ONE_TIME credits expire, configured under `payment.one-time-expiration`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationPolicy {
    /// One-time payments are not offered.
    Disabled,
    /// Credits never expire and accumulate in a single row.
    Perpetual,
    /// Credits expire at the end of the configured period grid.
    Periodical,
    /// Credits expire a fixed number of units after issue.
    Durational,
}

impl ExpirationPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpirationPolicy::Disabled => "disabled",
            ExpirationPolicy::Perpetual => "perpetual",
            ExpirationPolicy::Periodical => "periodical",
            ExpirationPolicy::Durational => "durational",
        }
    }

    /// Validity window of a credit issued on `issued_on`.
    ///
    /// Returns `None` for `Disabled`.
    pub fn window(
        &self,
        issued_on: NaiveDate,
        grid: &PeriodSettings,
    ) -> Result<Option<PaymentWindow>, PeriodError> {
        let window = match self {
            ExpirationPolicy::Disabled => return Ok(None),
            ExpirationPolicy::Perpetual => PaymentWindow {
                start_date: issued_on,
                end_date: None,
            },
            ExpirationPolicy::Periodical => {
                let period = grid.period_containing(issued_on)?;
                PaymentWindow {
                    start_date: period.start_date,
                    end_date: Some(period.end_date),
                }
            }
            ExpirationPolicy::Durational => PaymentWindow {
                start_date: issued_on,
                end_date: Some(add_units(issued_on, grid.unit, grid.length)?),
            },
        };
        Ok(Some(window))
    }
}

impl fmt::Display for ExpirationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown expiration policy: {0}")]
pub struct UnknownExpirationPolicy(pub String);

impl FromStr for ExpirationPolicy {
    type Err = UnknownExpirationPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "disabled" => Ok(ExpirationPolicy::Disabled),
            "perpetual" => Ok(ExpirationPolicy::Perpetual),
            "periodical" => Ok(ExpirationPolicy::Periodical),
            "durational" => Ok(ExpirationPolicy::Durational),
            _ => Err(UnknownExpirationPolicy(s.to_string())),
        }
    }
}

/// Start and optional end of a payment's validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentWindow {
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}
