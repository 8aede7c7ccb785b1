//! Payment repository port.
//!
//! Persists ONE_TIME and PERIODICAL payment rows.
//!
//! # Design
//!
//! - **Write sets**: every multi-row change of one ledger operation arrives as
//!   a single `PaymentWriteSet` and must be applied atomically
//! - **No uniqueness constraint**: the single-active-row rule is enforced by
//!   the ledger handlers, not by storage

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, PaymentId, UserId};
use crate::domain::payment::{Payment, PaymentType, PaymentWriteSet};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError>;

    /// Rows of the user and type active on `on`, oldest first.
    async fn find_active(
        &self,
        user_id: &UserId,
        payment_type: PaymentType,
        on: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError>;

    /// Rows of the user and type still running at `start`
    /// (`end_date` null or after `start`), oldest first. Void rows, closed
    /// before they started, are left out.
    async fn find_overlapping(
        &self,
        user_id: &UserId,
        payment_type: PaymentType,
        start: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError>;

    /// PERIODICAL rows of the user ending exactly on `end`.
    async fn find_periodical_ending_on(
        &self,
        user_id: &UserId,
        end: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError>;

    /// Applies inserts and updates atomically.
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` if an updated row does not exist
    /// - `DatabaseError` on persistence failure
    async fn apply(&self, changes: &PaymentWriteSet) -> Result<(), DomainError>;

    /// Bulk rollover for every row of `payment_type`.
    ///
    /// ONE_TIME rows get `payment_count = 0`; PERIODICAL rows that are still
    /// running get `end_date = today`. Returns the number of rows touched.
    async fn reset_by_type(
        &self,
        payment_type: PaymentType,
        today: NaiveDate,
    ) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn PaymentRepository) {}
    }
}
