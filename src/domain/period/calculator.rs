//! Repeating-period arithmetic.
//!
//! Periods are tiled forward and backward from a grid origin derived from the
//! anchor date and the start point. Every period is half-open: the start date
//! belongs to it, the end date belongs to the next one.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use thiserror::Error;

use super::PeriodUnit;

/// Errors raised by period arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("Start point {start_point} is not valid for unit {unit} (expected {min}..={max})")]
    InvalidStartPoint {
        unit: PeriodUnit,
        start_point: u32,
        min: u32,
        max: u32,
    },

    #[error("Date arithmetic overflowed the supported calendar range")]
    OutOfRange,
}

/// A computed period `[start_date, end_date)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodResult {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl PeriodResult {
    /// True if `date` falls inside the half-open interval.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date < self.end_date
    }
}

/// Computes the period containing `reference`.
///
/// `period_length` counts units per period; a Years period of length 3 spans
/// 36 months.
pub fn calculate_period(
    reference: NaiveDate,
    anchor: NaiveDate,
    unit: PeriodUnit,
    start_point: u32,
    period_length: NonZeroU32,
) -> Result<PeriodResult, PeriodError> {
    validate_start_point(unit, start_point)?;
    let length = i64::from(period_length.get());

    match unit {
        PeriodUnit::Days => {
            let origin = anchor
                .checked_add_days(Days::new(u64::from(start_point)))
                .ok_or(PeriodError::OutOfRange)?;
            day_grid(reference, origin, length)
        }
        PeriodUnit::Weeks => {
            let back = (anchor.weekday().number_from_monday() + 7 - start_point) % 7;
            let origin = anchor
                .checked_sub_days(Days::new(u64::from(back)))
                .ok_or(PeriodError::OutOfRange)?;
            day_grid(reference, origin, length * 7)
        }
        PeriodUnit::Months => {
            let mut origin = month_index(anchor);
            if anchor.day() < clamped_day(anchor.year(), anchor.month(), start_point) {
                origin -= 1;
            }
            month_grid(reference, origin, start_point, length)
        }
        PeriodUnit::Years => {
            let origin = month_index(anchor) - i64::from(start_point);
            month_grid(reference, origin, 1, length * 12)
        }
    }
}

/// Adds `count` units to `date`.
///
/// Month and year steps clamp to the last day of the target month, so
/// 2024-02-29 plus one year is 2025-02-28.
pub fn add_units(
    date: NaiveDate,
    unit: PeriodUnit,
    count: NonZeroU32,
) -> Result<NaiveDate, PeriodError> {
    let count = count.get();
    let result = match unit {
        PeriodUnit::Days => date.checked_add_days(Days::new(u64::from(count))),
        PeriodUnit::Weeks => date.checked_add_days(Days::new(u64::from(count) * 7)),
        PeriodUnit::Months => date.checked_add_months(Months::new(count)),
        PeriodUnit::Years => count
            .checked_mul(12)
            .and_then(|months| date.checked_add_months(Months::new(months))),
    };
    result.ok_or(PeriodError::OutOfRange)
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(year, month, 1),
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
    ) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 28,
    }
}

fn validate_start_point(unit: PeriodUnit, start_point: u32) -> Result<(), PeriodError> {
    let (min, max) = unit.start_point_range();
    if (min..=max).contains(&start_point) {
        Ok(())
    } else {
        Err(PeriodError::InvalidStartPoint {
            unit,
            start_point,
            min,
            max,
        })
    }
}

fn day_grid(reference: NaiveDate, origin: NaiveDate, step: i64) -> Result<PeriodResult, PeriodError> {
    let elapsed = (reference - origin).num_days();
    let periods = elapsed.div_euclid(step);
    let start = shift_days(origin, periods * step)?;
    let end = shift_days(start, step)?;
    Ok(PeriodResult {
        start_date: start,
        end_date: end,
    })
}

fn month_grid(
    reference: NaiveDate,
    origin: i64,
    day: u32,
    step: i64,
) -> Result<PeriodResult, PeriodError> {
    // Latest month whose boundary is on or before the reference.
    let mut current = month_index(reference);
    if reference.day() < clamped_day(reference.year(), reference.month(), day) {
        current -= 1;
    }
    let periods = (current - origin).div_euclid(step);
    let start = origin + periods * step;
    Ok(PeriodResult {
        start_date: boundary(start, day)?,
        end_date: boundary(start + step, day)?,
    })
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn boundary(month_index: i64, day: u32) -> Result<NaiveDate, PeriodError> {
    let year = i32::try_from(month_index.div_euclid(12)).map_err(|_| PeriodError::OutOfRange)?;
    let month = month_index.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, clamped_day(year, month, day)).ok_or(PeriodError::OutOfRange)
}

fn clamped_day(year: i32, month: u32, day: u32) -> u32 {
    day.min(days_in_month(year, month))
}

fn shift_days(date: NaiveDate, days: i64) -> Result<NaiveDate, PeriodError> {
    let magnitude = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.ok_or(PeriodError::OutOfRange)
}
