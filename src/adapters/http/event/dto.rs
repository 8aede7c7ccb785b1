//! Request bodies for event endpoints.

use serde::Deserialize;

use crate::domain::event::{EventDetails, EventStatus};

fn drafted() -> EventStatus {
    EventStatus::Drafted
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    #[serde(flatten)]
    pub details: EventDetails,
    #[serde(default = "drafted")]
    pub status: EventStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEventRequest {
    pub organizer_id: String,
    #[serde(flatten)]
    pub details: EventDetails,
    pub status: EventStatus,
    /// Complete USER participant set after the update.
    #[serde(default)]
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DiveCountRequest {
    pub dive_count: u32,
}
