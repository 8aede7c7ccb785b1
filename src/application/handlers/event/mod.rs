//! Event participation handlers.
//!
//! ## Commands
//! - Creating, updating and cancelling events
//! - Subscribing and unsubscribing participants
//! - Recording dive counts
//!
//! ## Queries
//! - Get event with participants

mod cancel_event;
mod create_event;
mod get_event;
mod record_dive_count;
mod subscribe;
mod unsubscribe;
mod update_event;

use serde::Serialize;

use crate::domain::event::{Event, EventParticipant, Notification, NotificationDetail};
use crate::domain::foundation::EventId;
use crate::ports::NotificationQueue;

// Commands
pub use cancel_event::{CancelEventCommand, CancelEventHandler};
pub use create_event::{CreateEventCommand, CreateEventHandler};
pub use record_dive_count::{RecordDiveCountCommand, RecordDiveCountHandler};
pub use subscribe::{SubscribeToEventCommand, SubscribeToEventHandler};
pub use unsubscribe::{UnsubscribeFromEventCommand, UnsubscribeFromEventHandler};
pub use update_event::{UpdateEventCommand, UpdateEventHandler};

// Queries
pub use get_event::{GetEventHandler, GetEventQuery};

/// An event with its participant rows, ordered by subscription time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    #[serde(flatten)]
    pub event: Event,
    pub participants: Vec<EventParticipant>,
}

/// Enqueues a notification. Failures are logged and swallowed.
pub(crate) async fn enqueue(
    queue: &dyn NotificationQueue,
    event_id: EventId,
    detail: NotificationDetail,
) {
    let notification = Notification::for_event(event_id, detail);
    match queue.add_notification(&notification).await {
        Ok(()) => tracing::debug!("Queued {} notification for event {}", detail, event_id),
        Err(e) => tracing::warn!(
            "Failed to queue {} notification for event {}: {}",
            detail,
            event_id,
            e
        ),
    }
}
