//! GetEventHandler - Query handler for a single event.

use std::sync::Arc;

use crate::domain::event::EventError;
use crate::domain::foundation::EventId;
use crate::ports::EventRepository;

use super::EventView;

#[derive(Debug, Clone)]
pub struct GetEventQuery {
    pub event_id: EventId,
}

pub struct GetEventHandler {
    events: Arc<dyn EventRepository>,
}

impl GetEventHandler {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    pub async fn handle(&self, query: GetEventQuery) -> Result<EventView, EventError> {
        let event = self
            .events
            .find_by_id(&query.event_id)
            .await?
            .ok_or_else(|| EventError::not_found(query.event_id))?;
        let participants = self.events.find_participants(&query.event_id).await?;
        Ok(EventView {
            event,
            participants,
        })
    }
}
