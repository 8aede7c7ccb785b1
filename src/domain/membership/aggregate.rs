//! Membership aggregate entity.
//!
//! A club membership covering one period of the membership grid.
//!
//! # Design Decisions
//!
//! - **Single active row**: a user holds at most one non-expired membership
//!   whose period overlaps a given date
//! - **Grid periods**: start and end come from the `membership` period grid
//! - **Cancel keeps access**: a cancelled membership stays usable until its end

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MembershipId, StateMachine, Timestamp, UserId};
use crate::domain::period::PeriodResult;

use super::{MembershipError, MembershipStatus, MembershipType};

/// # Invariants
///
/// - `start_date < end_date`
/// - Status transitions follow `MembershipStatus`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub user_id: UserId,
    pub membership_type: MembershipType,
    pub status: MembershipStatus,
    pub start_date: NaiveDate,
    /// Exclusive.
    pub end_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub cancelled_at: Option<Timestamp>,
}

impl Membership {
    /// Creates an active membership for `period`.
    pub fn create(user_id: UserId, membership_type: MembershipType, period: PeriodResult) -> Self {
        let now = Timestamp::now();
        Self {
            id: MembershipId::new(),
            user_id,
            membership_type,
            status: MembershipStatus::Active,
            start_date: period.start_date,
            end_date: period.end_date,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        }
    }

    /// Grants access on `date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.status.has_access() && self.start_date <= date && date < self.end_date
    }

    /// Would collide with a membership starting at `start`.
    pub fn overlaps_from(&self, start: NaiveDate) -> bool {
        self.status.has_access() && self.end_date > start
    }

    /// Period is over but the row has not been expired yet.
    pub fn is_due_for_expiry(&self, today: NaiveDate) -> bool {
        self.status != MembershipStatus::Expired && self.end_date <= today
    }

    /// Cancel this membership (effective at period end).
    ///
    /// # Errors
    ///
    /// `InvalidState` unless the membership is active.
    pub fn cancel(&mut self) -> Result<(), MembershipError> {
        self.transition_to(MembershipStatus::Cancelled, "cancel")?;
        self.cancelled_at = Some(Timestamp::now());
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub fn expire(&mut self) -> Result<(), MembershipError> {
        self.transition_to(MembershipStatus::Expired, "expire")?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn transition_to(
        &mut self,
        target: MembershipStatus,
        attempted: &str,
    ) -> Result<(), MembershipError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| MembershipError::invalid_state(self.status.as_str(), attempted))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn membership() -> Membership {
        Membership::create(
            UserId::new("user-123").unwrap(),
            MembershipType::Regular,
            PeriodResult {
                start_date: date(2024, 1, 1),
                end_date: date(2025, 1, 1),
            },
        )
    }

    #[test]
    fn create_starts_active() {
        let m = membership();
        assert_eq!(m.status, MembershipStatus::Active);
        assert!(m.cancelled_at.is_none());
    }

    #[test]
    fn active_window_is_half_open() {
        let m = membership();
        assert!(m.is_active_on(date(2024, 1, 1)));
        assert!(m.is_active_on(date(2024, 12, 31)));
        assert!(!m.is_active_on(date(2025, 1, 1)));
    }

    #[test]
    fn cancelled_keeps_access_until_end() {
        let mut m = membership();
        m.cancel().unwrap();
        assert!(m.cancelled_at.is_some());
        assert!(m.is_active_on(date(2024, 6, 1)));
    }

    #[test]
    fn cancel_twice_fails() {
        let mut m = membership();
        m.cancel().unwrap();
        assert!(matches!(m.cancel(), Err(MembershipError::InvalidState { .. })));
    }

    #[test]
    fn expired_neither_overlaps_nor_grants_access() {
        let mut m = membership();
        m.expire().unwrap();
        assert!(!m.overlaps_from(date(2024, 6, 1)));
        assert!(!m.is_active_on(date(2024, 6, 1)));
        assert!(!m.is_due_for_expiry(date(2026, 1, 1)));
    }

    #[test]
    fn due_for_expiry_at_end_date() {
        let m = membership();
        assert!(!m.is_due_for_expiry(date(2024, 12, 31)));
        assert!(m.is_due_for_expiry(date(2025, 1, 1)));
    }
}
