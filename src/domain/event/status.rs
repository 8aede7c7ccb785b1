//! Event status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Visible to the organizer only.
    Drafted,

    /// Open for subscription.
    Published,

    /// Terminal. No subscriptions, no edits.
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Drafted => "drafted",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drafted" => Ok(EventStatus::Drafted),
            "published" => Ok(EventStatus::Published),
            "cancelled" => Ok(EventStatus::Cancelled),
            other => Err(format!("unknown event status '{}'", other)),
        }
    }
}

impl StateMachine for EventStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use EventStatus::*;
        matches!(
            (self, target),
            (Drafted, Drafted)
                | (Drafted, Published)
                | (Drafted, Cancelled)
                | (Published, Published) // Edit
                | (Published, Drafted) // Unpublish
                | (Published, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EventStatus::*;
        match self {
            Drafted => vec![Drafted, Published, Cancelled],
            Published => vec![Published, Drafted, Cancelled],
            Cancelled => vec![],
        }
    }
}
