//! Period domain module.
//!
//! Pure calendar arithmetic shared by payments and memberships.
//!
//! - `unit` - PeriodUnit (days, weeks, months, years)
//! - `calculator` - Anchored period tiling and durational adds

mod calculator;
mod unit;

pub use calculator::{add_units, calculate_period, days_in_month, PeriodError, PeriodResult};
pub use unit::{PeriodUnit, UnknownPeriodUnit};
