//! UpdateEventHandler - Bulk event update with participant reconciliation.
//!
//! The requested participant list replaces the stored USER rows as a set
//! difference: retained users keep their original row and `created_at`,
//! removed users lose theirs, and added users get a fresh row with a newly
//! resolved payment type. The organizer row is recreated on every update.
//! All row changes are persisted together with the event.

use std::sync::Arc;

use crate::application::handlers::payment::{ResolvePaymentTypeHandler, ResolvePaymentTypeQuery};
use crate::application::{ConfigurationStore, KeyedLocks};
use crate::domain::event::{
    diff_participants, notification_for, EventDetails, EventError, EventParticipant,
    EventStatus, ParticipantChanges,
};
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::ports::{EventRepository, NotificationQueue};

use super::{enqueue, EventView};

#[derive(Debug, Clone)]
pub struct UpdateEventCommand {
    pub event_id: EventId,
    pub organizer_id: UserId,
    pub details: EventDetails,
    pub status: EventStatus,
    /// Full requested USER participant set.
    pub participants: Vec<UserId>,
}

pub struct UpdateEventHandler {
    events: Arc<dyn EventRepository>,
    config: Arc<ConfigurationStore>,
    notifications: Arc<dyn NotificationQueue>,
    payment_types: Arc<ResolvePaymentTypeHandler>,
    locks: Arc<KeyedLocks<EventId>>,
}

impl UpdateEventHandler {
    pub fn new(
        events: Arc<dyn EventRepository>,
        config: Arc<ConfigurationStore>,
        notifications: Arc<dyn NotificationQueue>,
        payment_types: Arc<ResolvePaymentTypeHandler>,
        locks: Arc<KeyedLocks<EventId>>,
    ) -> Self {
        Self {
            events,
            config,
            notifications,
            payment_types,
            locks,
        }
    }

    pub async fn handle(&self, cmd: UpdateEventCommand) -> Result<EventView, EventError> {
        let _guard = self.locks.lock(&cmd.event_id).await;

        // 1. Load current state
        let mut event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or_else(|| EventError::not_found(cmd.event_id))?;
        let existing = self.events.find_participants(&cmd.event_id).await?;

        // 2. Diff and capacity check against the new limit
        let diff = diff_participants(&existing, &cmd.participants, &cmd.organizer_id);
        if diff.resulting_seats() > cmd.details.max_participants as usize {
            return Err(EventError::event_full(
                cmd.event_id,
                cmd.details.max_participants,
            ));
        }

        // 3. Apply fields and transition
        let previous = event.apply_update(cmd.organizer_id.clone(), cmd.details, cmd.status)?;

        // 4. Build row changes
        let now = Timestamp::now();
        let mut inserted = Vec::with_capacity(diff.added.len());
        for user_id in diff.added {
            let payment_type = self
                .payment_types
                .handle(ResolvePaymentTypeQuery {
                    user_id: user_id.clone(),
                    on: None,
                })
                .await?;
            inserted.push(EventParticipant::user(event.id, user_id, payment_type, now));
        }
        let organizer = EventParticipant::organizer(event.id, cmd.organizer_id, now);
        tracing::debug!(
            "Event {} participants: {} retained, {} removed, {} added",
            event.id,
            diff.retained.len(),
            diff.removed.len(),
            inserted.len()
        );

        let changes = ParticipantChanges {
            removed: diff.removed,
            inserted,
            organizer: Some(organizer),
        };
        self.events.save(&event, &changes).await?;
        tracing::info!("Updated event {} ({} -> {})", event.id, previous, event.status);

        // 5. Side effects
        if let Some(detail) = notification_for(previous, event.status, &self.config.snapshot()) {
            enqueue(self.notifications.as_ref(), event.id, detail).await;
        }

        let participants = self.events.find_participants(&event.id).await?;
        Ok(EventView {
            event,
            participants,
        })
    }
}
