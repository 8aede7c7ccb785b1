//! Payment aggregate.
//!
//! A payment is either a consumable ONE_TIME credit balance or a PERIODICAL
//! date-range entitlement.
//!
//! # Invariants
//!
//! - For a given `(user_id, payment_type)` at most one row is active at a time
//! - `end_date == None` means perpetual (never expires)
//! - `payment_count` is only meaningful for ONE_TIME payments

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{PaymentId, Timestamp, UserId};
use crate::domain::period::PeriodResult;

use super::{PaymentError, PaymentStatus};

/// Kind of payment a row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    OneTime,
    Periodical,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::OneTime => "one_time",
            PaymentType::Periodical => "periodical",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = PaymentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "one_time" => Ok(PaymentType::OneTime),
            "periodical" => Ok(PaymentType::Periodical),
            other => Err(PaymentError::validation(
                "payment_type",
                format!("unknown payment type '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub user_id: UserId,
    pub payment_type: PaymentType,
    pub created: Timestamp,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub payment_count: i32,
}

impl Payment {
    /// New ONE_TIME credit row. `end_date == None` makes it perpetual.
    pub fn one_time(
        user_id: UserId,
        count: i32,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: PaymentId::new(),
            user_id,
            payment_type: PaymentType::OneTime,
            created: Timestamp::now(),
            start_date: Some(start_date),
            end_date,
            payment_count: count,
        }
    }

    /// New PERIODICAL row covering `period`.
    pub fn periodical(user_id: UserId, period: PeriodResult) -> Self {
        Self {
            id: PaymentId::new(),
            user_id,
            payment_type: PaymentType::Periodical,
            created: Timestamp::now(),
            start_date: Some(period.start_date),
            end_date: Some(period.end_date),
            payment_count: 0,
        }
    }

    pub fn is_perpetual(&self) -> bool {
        self.end_date.is_none()
    }

    /// Active on `date`: started on or before it and not yet ended.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        let started = self.start_date.map_or(true, |start| start <= date);
        started && self.overlaps_from(date)
    }

    /// Still running at `start`, i.e. would collide with a row beginning then.
    pub fn overlaps_from(&self, start: NaiveDate) -> bool {
        self.end_date.map_or(true, |end| end > start)
    }

    /// Closed before it ever started, e.g. a folded row that lay in the future.
    pub fn is_void(&self) -> bool {
        !starts_before(self.start_date, self.end_date)
    }

    /// Whether the `[start, end)` spans of both rows share a day.
    pub fn collides_with(&self, other: &Payment) -> bool {
        !self.is_void()
            && !other.is_void()
            && starts_before(self.start_date, other.end_date)
            && starts_before(other.start_date, self.end_date)
    }

    pub fn add_credits(&mut self, count: i32) {
        self.payment_count = self.payment_count.saturating_add(count);
    }

    /// Uses one credit.
    ///
    /// # Errors
    ///
    /// `InsufficientBalance` if the balance is already zero or negative.
    pub fn consume_credit(&mut self) -> Result<(), PaymentError> {
        if self.payment_count <= 0 {
            return Err(PaymentError::insufficient_balance(self.id));
        }
        self.payment_count -= 1;
        Ok(())
    }

    /// Closes a duplicate one-time row after its credits were moved away.
    pub fn close_as_merged(&mut self, today: NaiveDate) {
        self.end_date = Some(today);
        self.payment_count = 0;
    }

    /// Ends this row the day before `start`, so that a periodical window
    /// beginning at `start` takes over.
    pub fn supersede_from(&mut self, start: NaiveDate) {
        self.end_date = Some(start.checked_sub_days(Days::new(1)).unwrap_or(start));
    }

    pub fn status(&self) -> PaymentStatus {
        PaymentStatus {
            payment_id: self.id,
            payment_type: self.payment_type,
            remaining: self.payment_count,
            expires_on: self.end_date,
        }
    }
}

fn starts_before(start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => start < end,
        _ => true,
    }
}
