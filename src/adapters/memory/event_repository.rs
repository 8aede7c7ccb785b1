//! In-memory event repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::event::{Event, EventParticipant, ParticipantChanges, ParticipantType};
use crate::domain::foundation::{DomainError, ErrorCode, EventId, Timestamp, UserId};
use crate::domain::payment::PaymentType;
use crate::ports::EventRepository;

#[derive(Debug, Default)]
struct Store {
    events: HashMap<EventId, Event>,
    participants: HashMap<EventId, Vec<EventParticipant>>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryEventRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn event_count(&self) -> usize {
        self.store.read().await.events.len()
    }
}

fn not_found(id: &EventId) -> DomainError {
    DomainError::new(ErrorCode::EventNotFound, format!("Event not found: {}", id))
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn create(
        &self,
        event: &Event,
        organizer: &EventParticipant,
    ) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        store.events.insert(event.id, event.clone());
        store.participants.insert(event.id, vec![organizer.clone()]);
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        Ok(self.store.read().await.events.get(id).cloned())
    }

    async fn find_participants(&self, id: &EventId) -> Result<Vec<EventParticipant>, DomainError> {
        let store = self.store.read().await;
        let mut rows = store.participants.get(id).cloned().unwrap_or_default();
        rows.sort_by_key(|p| p.created_at);
        Ok(rows)
    }

    async fn save(&self, event: &Event, changes: &ParticipantChanges) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        if !store.events.contains_key(&event.id) {
            return Err(not_found(&event.id));
        }
        store.events.insert(event.id, event.clone());

        let rows = store.participants.entry(event.id).or_default();
        rows.retain(|p| {
            let removed = p.participant_type == ParticipantType::User
                && changes.removed.contains(&p.user_id);
            let replaced_organizer = changes.organizer.is_some() && p.is_organizer();
            !removed && !replaced_organizer
        });
        if let Some(organizer) = &changes.organizer {
            rows.push(organizer.clone());
        }
        rows.extend(changes.inserted.iter().cloned());
        Ok(())
    }

    async fn add_participant(&self, participant: &EventParticipant) -> Result<(), DomainError> {
        let mut store = self.store.write().await;
        if !store.events.contains_key(&participant.event_id) {
            return Err(not_found(&participant.event_id));
        }
        store
            .participants
            .entry(participant.event_id)
            .or_default()
            .push(participant.clone());
        Ok(())
    }

    async fn remove_participant(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        let Some(rows) = store.participants.get_mut(event_id) else {
            return Ok(false);
        };
        let before = rows.len();
        rows.retain(|p| !(p.participant_type == ParticipantType::User && &p.user_id == user_id));
        Ok(rows.len() != before)
    }

    async fn update_dive_count(
        &self,
        event_id: &EventId,
        user_id: &UserId,
        dive_count: u32,
    ) -> Result<bool, DomainError> {
        let mut store = self.store.write().await;
        let row = store
            .participants
            .get_mut(event_id)
            .and_then(|rows| rows.iter_mut().find(|p| &p.user_id == user_id));
        match row {
            Some(row) => {
                row.dive_count = dive_count;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_future_events_for_participant(
        &self,
        user_id: &UserId,
        payment_type: PaymentType,
        after: Timestamp,
    ) -> Result<Vec<Event>, DomainError> {
        let store = self.store.read().await;
        let mut events: Vec<Event> = store
            .events
            .values()
            .filter(|e| !e.is_cancelled() && e.details.start_time.is_after(&after))
            .filter(|e| {
                store.participants.get(&e.id).map_or(false, |rows| {
                    rows.iter().any(|p| {
                        &p.user_id == user_id && p.payment_type == Some(payment_type)
                    })
                })
            })
            .cloned()
            .collect();
        events.sort_by_key(|e| e.details.start_time);
        Ok(events)
    }
}
