//! Event participation error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / ParticipantNotFound | 404 |
//! | AlreadyParticipant / EventFull / AlreadyCancelled | 409 |
//! | InvalidState / OrganizerNotRemovable | 409 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, EventId, UserId};
use crate::domain::payment::PaymentError;

use super::EventStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    NotFound(EventId),

    ParticipantNotFound { event_id: EventId, user_id: UserId },

    AlreadyParticipant { event_id: EventId, user_id: UserId },

    /// No seats left.
    EventFull { event_id: EventId, max_participants: u32 },

    AlreadyCancelled(EventId),

    /// Operation not allowed in the current status.
    InvalidState {
        current: EventStatus,
        attempted: String,
    },

    /// Organizers leave an event by handing it over, not by unsubscribing.
    OrganizerNotRemovable { event_id: EventId, user_id: UserId },

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl EventError {
    pub fn not_found(id: EventId) -> Self {
        EventError::NotFound(id)
    }

    pub fn participant_not_found(event_id: EventId, user_id: UserId) -> Self {
        EventError::ParticipantNotFound { event_id, user_id }
    }

    pub fn already_participant(event_id: EventId, user_id: UserId) -> Self {
        EventError::AlreadyParticipant { event_id, user_id }
    }

    pub fn event_full(event_id: EventId, max_participants: u32) -> Self {
        EventError::EventFull {
            event_id,
            max_participants,
        }
    }

    pub fn already_cancelled(id: EventId) -> Self {
        EventError::AlreadyCancelled(id)
    }

    pub fn invalid_state(current: EventStatus, attempted: impl Into<String>) -> Self {
        EventError::InvalidState {
            current,
            attempted: attempted.into(),
        }
    }

    pub fn organizer_not_removable(event_id: EventId, user_id: UserId) -> Self {
        EventError::OrganizerNotRemovable { event_id, user_id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        EventError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        EventError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EventError::NotFound(_) => ErrorCode::EventNotFound,
            EventError::ParticipantNotFound { .. } => ErrorCode::ParticipantNotFound,
            EventError::AlreadyParticipant { .. } => ErrorCode::AlreadyParticipant,
            EventError::EventFull { .. } => ErrorCode::EventFull,
            EventError::AlreadyCancelled(_)
            | EventError::InvalidState { .. }
            | EventError::OrganizerNotRemovable { .. } => ErrorCode::InvalidStateTransition,
            EventError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            EventError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            EventError::NotFound(id) => format!("Event not found: {}", id),
            EventError::ParticipantNotFound { event_id, user_id } => {
                format!("User {} is not a participant of event {}", user_id, event_id)
            }
            EventError::AlreadyParticipant { event_id, user_id } => {
                format!("User {} already participates in event {}", user_id, event_id)
            }
            EventError::EventFull {
                event_id,
                max_participants,
            } => format!(
                "Event {} is full ({} participants)",
                event_id, max_participants
            ),
            EventError::AlreadyCancelled(id) => format!("Event {} is already cancelled", id),
            EventError::InvalidState { current, attempted } => {
                format!("Cannot {} an event in {} state", attempted, current)
            }
            EventError::OrganizerNotRemovable { event_id, user_id } => format!(
                "User {} organizes event {} and cannot be removed",
                user_id, event_id
            ),
            EventError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            EventError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for EventError {}

impl From<DomainError> for EventError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => EventError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => EventError::Infrastructure(err.to_string()),
        }
    }
}

/// Payment type resolution failures surface as infrastructure errors.
impl From<PaymentError> for EventError {
    fn from(err: PaymentError) -> Self {
        EventError::Infrastructure(err.message())
    }
}

impl From<EventError> for DomainError {
    fn from(err: EventError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
