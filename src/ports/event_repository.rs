//! Event repository port.
//!
//! Persists events together with their participant rows.

use async_trait::async_trait;

use crate::domain::event::{Event, EventParticipant, ParticipantChanges};
use crate::domain::foundation::{DomainError, EventId, Timestamp, UserId};
use crate::domain::payment::PaymentType;

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts a new event and its organizer row in one transaction.
    async fn create(&self, event: &Event, organizer: &EventParticipant)
        -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError>;

    /// Participant rows of the event ordered by `created_at`.
    async fn find_participants(&self, id: &EventId) -> Result<Vec<EventParticipant>, DomainError>;

    /// Updates the event row and applies `changes` in one transaction.
    ///
    /// # Errors
    ///
    /// - `EventNotFound` if the event does not exist
    /// - `DatabaseError` on persistence failure
    async fn save(&self, event: &Event, changes: &ParticipantChanges) -> Result<(), DomainError>;

    async fn add_participant(&self, participant: &EventParticipant) -> Result<(), DomainError>;

    /// Deletes the USER row of `user_id`. Returns false if there was none.
    async fn remove_participant(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// Returns false if the user is not a participant.
    async fn update_dive_count(
        &self,
        event_id: &EventId,
        user_id: &UserId,
        dive_count: u32,
    ) -> Result<bool, DomainError>;

    /// Non-cancelled events starting after `after` in which the user holds a
    /// row snapshotted with `payment_type`, ordered by start time.
    async fn find_future_events_for_participant(
        &self,
        user_id: &UserId,
        payment_type: PaymentType,
        after: Timestamp,
    ) -> Result<Vec<Event>, DomainError>;
}
