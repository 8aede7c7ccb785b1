//! Event participation domain module.
//!
//! Events, their participant rows, the status state machine and the
//! notifications status changes produce.

mod aggregate;
mod errors;
mod notification;
mod participant;
mod status;

pub use aggregate::{Event, EventDetails, EventType};
pub use errors::EventError;
pub use notification::{notification_for, Notification, NotificationDetail, NotificationType};
pub use participant::{
    diff_participants, seats_taken, EventParticipant, ParticipantChanges, ParticipantDiff,
    ParticipantType,
};
pub use status::EventStatus;
