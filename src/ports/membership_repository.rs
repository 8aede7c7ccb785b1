//! Membership repository port.
//!
//! Defines the contract for persisting and retrieving Membership aggregates.
//!
//! # Example
//!
//! ```ignore
//! async fn current(
//!     repo: &dyn MembershipRepository,
//!     user_id: &UserId,
//!     today: NaiveDate,
//! ) -> Result<Option<Membership>, DomainError> {
//!     let rows = repo.find_by_user_id(user_id).await?;
//!     Ok(rows.into_iter().find(|m| m.is_active_on(today)))
//! }
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, MembershipId, UserId};
use crate::domain::membership::Membership;

/// Repository port for Membership aggregate persistence.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Save a new membership.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Update an existing membership.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if membership doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, membership: &Membership) -> Result<(), DomainError>;

    /// Update several memberships atomically: all rows are written or none.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if any membership doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_all(&self, memberships: &[Membership]) -> Result<(), DomainError>;

    /// Find a membership by its ID.
    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError>;

    /// All memberships of a user, newest period first.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Membership>, DomainError>;

    /// Memberships of the user still granting access at `start`
    /// (not expired, ending after `start`), oldest period first.
    async fn find_overlapping(
        &self,
        user_id: &UserId,
        start: NaiveDate,
    ) -> Result<Vec<Membership>, DomainError>;

    /// Non-expired memberships whose end date is on or before `today`.
    async fn find_due_for_expiry(&self, today: NaiveDate) -> Result<Vec<Membership>, DomainError>;
}
