//! CreateEventHandler - Command handler for creating events.

use std::sync::Arc;

use crate::application::ConfigurationStore;
use crate::domain::event::{
    notification_for, Event, EventDetails, EventError, EventParticipant, EventStatus,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{EventRepository, NotificationQueue};

use super::{enqueue, EventView};

#[derive(Debug, Clone)]
pub struct CreateEventCommand {
    pub organizer_id: UserId,
    pub details: EventDetails,
    /// `Drafted` or `Published`.
    pub status: EventStatus,
}

pub struct CreateEventHandler {
    events: Arc<dyn EventRepository>,
    config: Arc<ConfigurationStore>,
    notifications: Arc<dyn NotificationQueue>,
}

impl CreateEventHandler {
    pub fn new(
        events: Arc<dyn EventRepository>,
        config: Arc<ConfigurationStore>,
        notifications: Arc<dyn NotificationQueue>,
    ) -> Self {
        Self {
            events,
            config,
            notifications,
        }
    }

    pub async fn handle(&self, cmd: CreateEventCommand) -> Result<EventView, EventError> {
        let event = Event::new(cmd.organizer_id.clone(), cmd.details, cmd.status)?;
        let organizer = EventParticipant::organizer(event.id, cmd.organizer_id, Timestamp::now());

        self.events.create(&event, &organizer).await?;
        tracing::info!("Created event {} ({})", event.id, event.status);

        // Creation counts as leaving Drafted
        if let Some(detail) =
            notification_for(EventStatus::Drafted, event.status, &self.config.snapshot())
        {
            enqueue(self.notifications.as_ref(), event.id, detail).await;
        }

        Ok(EventView {
            event,
            participants: vec![organizer],
        })
    }
}
