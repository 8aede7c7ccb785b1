//! Event aggregate.
//!
//! # Invariants
//!
//! - Participant count (USER rows) never exceeds `max_participants`
//! - Status changes follow the `EventStatus` state machine
//! - `Cancelled` events accept no further edits or subscriptions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{EventId, StateMachine, Timestamp, UserId};

use super::{EventError, EventStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Dive,
    Course,
    Trip,
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Dive => "dive",
            EventType::Course => "course",
            EventType::Trip => "trip",
            EventType::Other => "other",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dive" => Ok(EventType::Dive),
            "course" => Ok(EventType::Course),
            "trip" => Ok(EventType::Trip),
            "other" => Ok(EventType::Other),
            other => Err(format!("unknown event type '{}'", other)),
        }
    }
}

/// Editable fields of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub title: String,
    pub description: String,
    pub start_time: Timestamp,
    /// Hours.
    pub event_duration: u32,
    /// Minutes per dive.
    pub max_duration: u32,
    /// Meters.
    pub max_depth: u32,
    pub max_participants: u32,
    pub event_type: EventType,
}

impl EventDetails {
    fn validate(&self) -> Result<(), EventError> {
        if self.title.trim().is_empty() {
            return Err(EventError::validation("title", "must not be empty"));
        }
        if self.max_participants == 0 {
            return Err(EventError::validation(
                "max_participants",
                "must be at least 1",
            ));
        }
        if self.event_duration == 0 {
            return Err(EventError::validation("event_duration", "must be at least 1 hour"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub organizer_id: UserId,
    pub status: EventStatus,
    #[serde(flatten)]
    pub details: EventDetails,
}

impl Event {
    /// Creates an event in `Drafted` or `Published` status.
    pub fn new(
        organizer_id: UserId,
        details: EventDetails,
        status: EventStatus,
    ) -> Result<Self, EventError> {
        details.validate()?;
        if status == EventStatus::Cancelled {
            return Err(EventError::invalid_state(status, "create"));
        }
        Ok(Self {
            id: EventId::new(),
            organizer_id,
            status,
            details,
        })
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == EventStatus::Cancelled
    }

    /// Replaces the editable fields and moves to `status`.
    ///
    /// Returns the status held before the update.
    pub fn apply_update(
        &mut self,
        organizer_id: UserId,
        details: EventDetails,
        status: EventStatus,
    ) -> Result<EventStatus, EventError> {
        details.validate()?;
        let previous = self.status;
        self.status = previous
            .transition_to(status)
            .map_err(|_| EventError::invalid_state(previous, format!("move to {}", status)))?;
        self.organizer_id = organizer_id;
        self.details = details;
        Ok(previous)
    }

    /// Moves to `Cancelled`, returning the previous status.
    pub fn cancel(&mut self) -> Result<EventStatus, EventError> {
        if self.is_cancelled() {
            return Err(EventError::already_cancelled(self.id));
        }
        let previous = self.status;
        self.status = EventStatus::Cancelled;
        Ok(previous)
    }
}
