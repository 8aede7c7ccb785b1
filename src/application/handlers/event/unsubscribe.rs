//! UnsubscribeFromEventHandler - Command handler removing a user from an event.

use std::sync::Arc;

use crate::application::KeyedLocks;
use crate::domain::event::EventError;
use crate::domain::foundation::{EventId, UserId};
use crate::ports::EventRepository;

use super::EventView;

#[derive(Debug, Clone)]
pub struct UnsubscribeFromEventCommand {
    pub event_id: EventId,
    pub user_id: UserId,
}

/// Deletes the caller's USER row. Payment balances are not restored.
pub struct UnsubscribeFromEventHandler {
    events: Arc<dyn EventRepository>,
    locks: Arc<KeyedLocks<EventId>>,
}

impl UnsubscribeFromEventHandler {
    pub fn new(events: Arc<dyn EventRepository>, locks: Arc<KeyedLocks<EventId>>) -> Self {
        Self { events, locks }
    }

    pub async fn handle(&self, cmd: UnsubscribeFromEventCommand) -> Result<EventView, EventError> {
        let _guard = self.locks.lock(&cmd.event_id).await;

        let event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or_else(|| EventError::not_found(cmd.event_id))?;
        let participants = self.events.find_participants(&cmd.event_id).await?;

        match participants.iter().find(|p| p.user_id == cmd.user_id) {
            None => {
                return Err(EventError::participant_not_found(cmd.event_id, cmd.user_id));
            }
            Some(row) if row.is_organizer() => {
                return Err(EventError::organizer_not_removable(cmd.event_id, cmd.user_id));
            }
            Some(_) => {}
        }

        self.events
            .remove_participant(&cmd.event_id, &cmd.user_id)
            .await?;
        tracing::info!("User {} left event {}", cmd.user_id, cmd.event_id);

        let participants = participants
            .into_iter()
            .filter(|p| p.user_id != cmd.user_id)
            .collect();
        Ok(EventView {
            event,
            participants,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::event::test_support::{details, fixture, uid};
    use crate::application::handlers::event::{CreateEventCommand, CreateEventHandler};
    use crate::domain::event::{EventParticipant, EventStatus};
    use crate::domain::foundation::Timestamp;

    #[tokio::test]
    async fn removes_only_the_callers_row() {
        let f = fixture("").await;
        let id = CreateEventHandler::new(
            Arc::new(f.events.clone()),
            f.config.clone(),
            Arc::new(f.queue.clone()),
        )
        .handle(CreateEventCommand {
            organizer_id: uid("org"),
            details: details(4),
            status: EventStatus::Published,
        })
        .await
        .unwrap()
        .event
        .id;
        for user in ["ann", "bob"] {
            f.events
                .add_participant(&EventParticipant::user(id, uid(user), None, Timestamp::now()))
                .await
                .unwrap();
        }
        let handler = UnsubscribeFromEventHandler::new(
            Arc::new(f.events.clone()),
            Arc::new(KeyedLocks::new()),
        );

        let view = handler
            .handle(UnsubscribeFromEventCommand {
                event_id: id,
                user_id: uid("ann"),
            })
            .await
            .unwrap();
        assert_eq!(view.participants.len(), 2);
        assert_eq!(f.events.find_participants(&id).await.unwrap().len(), 2);

        assert_eq!(
            handler
                .handle(UnsubscribeFromEventCommand {
                    event_id: id,
                    user_id: uid("ann"),
                })
                .await,
            Err(EventError::participant_not_found(id, uid("ann")))
        );
        assert_eq!(
            handler
                .handle(UnsubscribeFromEventCommand {
                    event_id: id,
                    user_id: uid("org"),
                })
                .await,
            Err(EventError::organizer_not_removable(id, uid("org")))
        );
    }
}
