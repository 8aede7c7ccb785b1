//! RecordDiveCountHandler - Post-event dive count update.

use std::sync::Arc;

use crate::domain::event::EventError;
use crate::domain::foundation::{EventId, UserId};
use crate::ports::EventRepository;

#[derive(Debug, Clone)]
pub struct RecordDiveCountCommand {
    pub event_id: EventId,
    pub user_id: UserId,
    pub dive_count: u32,
}

pub struct RecordDiveCountHandler {
    events: Arc<dyn EventRepository>,
}

impl RecordDiveCountHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    pub async fn handle(&self, cmd: RecordDiveCountCommand) -> Result<(), EventError> {
        if self.events.find_by_id(&cmd.event_id).await?.is_none() {
            return Err(EventError::not_found(cmd.event_id));
        }

        let updated = self
            .events
            .update_dive_count(&cmd.event_id, &cmd.user_id, cmd.dive_count)
            .await?;
        if !updated {
            return Err(EventError::participant_not_found(cmd.event_id, cmd.user_id));
        }

        tracing::info!(
            "Recorded {} dives for user {} on event {}",
            cmd.dive_count,
            cmd.user_id,
            cmd.event_id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryEventRepository;
    use crate::application::handlers::event::test_support::{details, uid};
    use crate::domain::event::{Event, EventParticipant, EventStatus};
    use crate::domain::foundation::Timestamp;

    #[tokio::test]
    async fn updates_existing_participant_only() {
        let events = InMemoryEventRepository::new();
        let event = Event::new(uid("org"), details(4), EventStatus::Published).unwrap();
        events
            .create(&event, &EventParticipant::organizer(event.id, uid("org"), Timestamp::now()))
            .await
            .unwrap();
        events
            .add_participant(&EventParticipant::user(event.id, uid("ann"), None, Timestamp::now()))
            .await
            .unwrap();
        let handler = RecordDiveCountHandler::new(Arc::new(events.clone()));

        handler
            .handle(RecordDiveCountCommand {
                event_id: event.id,
                user_id: uid("ann"),
                dive_count: 3,
            })
            .await
            .unwrap();
        let rows = events.find_participants(&event.id).await.unwrap();
        assert_eq!(rows.iter().find(|p| p.user_id == uid("ann")).unwrap().dive_count, 3);

        assert_eq!(
            handler
                .handle(RecordDiveCountCommand {
                    event_id: event.id,
                    user_id: uid("zed"),
                    dive_count: 1,
                })
                .await,
            Err(EventError::participant_not_found(event.id, uid("zed")))
        );
    }
}
