//! CancelEventHandler - Command handler for the dedicated cancel operation.

use std::sync::Arc;

use crate::application::KeyedLocks;
use crate::domain::event::{Event, EventError, EventStatus, NotificationDetail, ParticipantChanges};
use crate::domain::foundation::EventId;
use crate::ports::{EventRepository, NotificationQueue};

use super::enqueue;

#[derive(Debug, Clone)]
pub struct CancelEventCommand {
    pub event_id: EventId,
}

/// Cancels an event.
///
/// Unlike a generic update, cancelling a Published event queues `Deleted`
/// regardless of the notification flags.
pub struct CancelEventHandler {
    events: Arc<dyn EventRepository>,
    notifications: Arc<dyn NotificationQueue>,
    locks: Arc<KeyedLocks<EventId>>,
}

impl CancelEventHandler {
    pub fn new(
        events: Arc<dyn EventRepository>,
        notifications: Arc<dyn NotificationQueue>,
        locks: Arc<KeyedLocks<EventId>>,
    ) -> Self {
        Self {
            events,
            notifications,
            locks,
        }
    }

    pub async fn handle(&self, cmd: CancelEventCommand) -> Result<Event, EventError> {
        let _guard = self.locks.lock(&cmd.event_id).await;

        let mut event = self
            .events
            .find_by_id(&cmd.event_id)
            .await?
            .ok_or_else(|| EventError::not_found(cmd.event_id))?;

        let previous = event.cancel()?;
        self.events
            .save(&event, &ParticipantChanges::default())
            .await?;
        tracing::info!("Cancelled event {} (was {})", event.id, previous);

        if previous == EventStatus::Published {
            enqueue(self.notifications.as_ref(), event.id, NotificationDetail::Deleted).await;
        }

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::event::test_support::{details, fixture, uid, Fixture};
    use crate::application::handlers::event::{CreateEventCommand, CreateEventHandler};

    async fn create(f: &Fixture, status: EventStatus) -> EventId {
        CreateEventHandler::new(
            Arc::new(f.events.clone()),
            f.config.clone(),
            Arc::new(f.queue.clone()),
        )
        .handle(CreateEventCommand {
            organizer_id: uid("org"),
            details: details(4),
            status,
        })
        .await
        .unwrap()
        .event
        .id
    }

    fn handler(f: &Fixture) -> CancelEventHandler {
        CancelEventHandler::new(
            Arc::new(f.events.clone()),
            Arc::new(f.queue.clone()),
            Arc::new(KeyedLocks::new()),
        )
    }

    #[tokio::test]
    async fn cancelling_published_event_queues_deleted() {
        let f = fixture("").await;
        let id = create(&f, EventStatus::Published).await;

        let event = handler(&f).handle(CancelEventCommand { event_id: id }).await.unwrap();

        assert_eq!(event.status, EventStatus::Cancelled);
        let entries = f.queue.entries().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].detail, NotificationDetail::Deleted);
    }

    #[tokio::test]
    async fn cancelling_draft_is_silent() {
        let f = fixture("event-removed").await;
        let id = create(&f, EventStatus::Drafted).await;
        handler(&f).handle(CancelEventCommand { event_id: id }).await.unwrap();
        assert!(f.queue.entries().await.is_empty());
    }

    #[tokio::test]
    async fn second_cancel_fails_without_notification() {
        let f = fixture("").await;
        let id = create(&f, EventStatus::Published).await;
        let handler = handler(&f);
        handler.handle(CancelEventCommand { event_id: id }).await.unwrap();

        assert_eq!(
            handler.handle(CancelEventCommand { event_id: id }).await,
            Err(EventError::already_cancelled(id))
        );
        assert_eq!(f.queue.entries().await.len(), 1);
    }

    #[tokio::test]
    async fn unknown_event_is_not_found() {
        let f = fixture("").await;
        let id = EventId::new();
        assert_eq!(
            handler(&f).handle(CancelEventCommand { event_id: id }).await,
            Err(EventError::not_found(id))
        );
    }
}
