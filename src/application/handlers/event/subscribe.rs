//! SubscribeToEventHandler - Command handler adding a user to an event.
//!
//! The resolved payment type is stored as a snapshot on the participant row.
//! No payment balance is touched.

use std::sync::Arc;

use crate::application::handlers::payment::{ResolvePaymentTypeHandler, ResolvePaymentTypeQuery};
use crate::application::KeyedLocks;
use crate::domain::event::{seats_taken, EventError, EventParticipant, EventStatus};
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::ports::EventRepository;

use super::EventView;

#[derive(Debug, Clone)]
pub struct SubscribeToEventCommand {
    pub event_id: EventId,
    pub user_id: UserId,
}

pub struct SubscribeToEventHandler {
    events: Arc<dyn EventRepository>,
    payment_types: Arc<ResolvePaymentTypeHandler>,
    locks: Arc<KeyedLocks<EventId>>,
}

impl SubscribeToEventHandler {
    pub fn new(
        events: Arc<dyn EventRepository>,
        payment_types: Arc<ResolvePaymentTypeHandler>,
        locks: Arc<KeyedLocks<EventId>>,
    ) -> Self {
        Self {
            events,
            payment_types,
            locks,
        }
    }

    pub async fn handle(&self, cmd: SubscribeToEventCommand) -> Result<EventView, EventError> {
        let _guard = self.locks.lock(&cmd.event_id).await;

        let event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or_else(|| EventError::not_found(cmd.event_id))?;
        if event.status == EventStatus::Cancelled {
            return Err(EventError::invalid_state(event.status, "subscribe to"));
        }

        let mut participants = self.events.find_participants(&cmd.event_id).await?;
        if participants.iter().any(|p| p.user_id == cmd.user_id) {
            return Err(EventError::already_participant(cmd.event_id, cmd.user_id));
        }
        if seats_taken(&participants) >= event.details.max_participants as usize {
            return Err(EventError::event_full(
                cmd.event_id,
                event.details.max_participants,
            ));
        }

        let payment_type = self
            .payment_types
            .handle(ResolvePaymentTypeQuery {
                user_id: cmd.user_id.clone(),
                on: None,
            })
            .await?;
        let row = EventParticipant::user(cmd.event_id, cmd.user_id, payment_type, Timestamp::now());
        self.events.add_participant(&row).await?;

        tracing::info!(
            "User {} subscribed to event {} with payment type {:?}",
            row.user_id,
            cmd.event_id,
            payment_type
        );
        participants.push(row);

        Ok(EventView {
            event,
            participants,
        })
    }
}
