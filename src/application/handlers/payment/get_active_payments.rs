//! GetActivePaymentsHandler - Query handler for a user's active payments.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::event::Event;
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentError, PaymentType};
use crate::ports::{EventRepository, PaymentRepository};

#[derive(Debug, Clone)]
pub struct GetActivePaymentsQuery {
    pub user_id: UserId,
    /// Defaults to today.
    pub on: Option<NaiveDate>,
}

/// An upcoming event the user joined on a one-time payment.
///
/// Informational only; nothing is reserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundEvent {
    pub event_id: EventId,
    pub title: String,
    pub start_time: Timestamp,
}

impl From<Event> for BoundEvent {
    fn from(event: Event) -> Self {
        Self {
            event_id: event.id,
            title: event.details.title,
            start_time: event.details.start_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentResponse {
    #[serde(flatten)]
    pub payment: Payment,
    pub bound_events: Vec<BoundEvent>,
}

pub struct GetActivePaymentsHandler {
    payments: Arc<dyn PaymentRepository>,
    events: Arc<dyn EventRepository>,
}

impl GetActivePaymentsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>, events: Arc<dyn EventRepository>) -> Self {
        Self { payments, events }
    }

    /// Active rows of both types, PERIODICAL first.
    pub async fn active_payments(
        &self,
        query: &GetActivePaymentsQuery,
    ) -> Result<Vec<Payment>, PaymentError> {
        let on = query.on.unwrap_or_else(|| Timestamp::now().date());
        let mut rows = self
            .payments
            .find_active(&query.user_id, PaymentType::Periodical, on)
            .await?;
        rows.extend(
            self.payments
                .find_active(&query.user_id, PaymentType::OneTime, on)
                .await?,
        );
        Ok(rows)
    }

    /// Active rows with the future events bound to one-time payments.
    pub async fn handle(
        &self,
        query: GetActivePaymentsQuery,
    ) -> Result<Vec<PaymentResponse>, PaymentError> {
        let rows = self.active_payments(&query).await?;

        let bound: Vec<BoundEvent> = if rows.iter().any(|p| p.payment_type == PaymentType::OneTime)
        {
            self.events
                .find_future_events_for_participant(
                    &query.user_id,
                    PaymentType::OneTime,
                    Timestamp::now(),
                )
                .await?
                .into_iter()
                .map(BoundEvent::from)
                .collect()
        } else {
            Vec::new()
        };

        Ok(rows
            .into_iter()
            .map(|payment| {
                let bound_events = match payment.payment_type {
                    PaymentType::OneTime => bound.clone(),
                    PaymentType::Periodical => Vec::new(),
                };
                PaymentResponse {
                    payment,
                    bound_events,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEventRepository, InMemoryPaymentRepository};
    use crate::domain::event::{EventDetails, EventParticipant, EventStatus, EventType};
    use crate::domain::period::PeriodResult;

    fn user() -> UserId {
        UserId::new("diver-1").unwrap()
    }

    fn details(title: &str, start_time: Timestamp) -> EventDetails {
        EventDetails {
            title: title.to_string(),
            description: String::new(),
            start_time,
            event_duration: 2,
            max_duration: 50,
            max_depth: 30,
            max_participants: 10,
            event_type: EventType::Dive,
        }
    }

    async fn join(
        events: &InMemoryEventRepository,
        title: &str,
        start_time: Timestamp,
        payment_type: PaymentType,
    ) -> Event {
        let organizer = UserId::new("org").unwrap();
        let event = Event::new(organizer.clone(), details(title, start_time), EventStatus::Published)
            .unwrap();
        events
            .create(&event, &EventParticipant::organizer(event.id, organizer, Timestamp::now()))
            .await
            .unwrap();
        events
            .add_participant(&EventParticipant::user(
                event.id,
                user(),
                Some(payment_type),
                Timestamp::now(),
            ))
            .await
            .unwrap();
        event
    }

    #[tokio::test]
    async fn one_time_rows_list_future_bound_events() {
        let payments = InMemoryPaymentRepository::new();
        let events = InMemoryEventRepository::new();
        let today = Timestamp::now().date();
        payments
            .insert(Payment::one_time(user(), 2, today, None))
            .await;
        payments
            .insert(Payment::periodical(
                user(),
                PeriodResult {
                    start_date: today,
                    end_date: today + chrono::Days::new(30),
                },
            ))
            .await;

        let upcoming = join(&events, "Wreck", Timestamp::now().add_days(3), PaymentType::OneTime).await;
        join(&events, "Past", Timestamp::now().add_days(-3), PaymentType::OneTime).await;
        join(&events, "Reef", Timestamp::now().add_days(4), PaymentType::Periodical).await;

        let handler = GetActivePaymentsHandler::new(Arc::new(payments), Arc::new(events));
        let responses = handler
            .handle(GetActivePaymentsQuery {
                user_id: user(),
                on: None,
            })
            .await
            .unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].payment.payment_type, PaymentType::Periodical);
        assert!(responses[0].bound_events.is_empty());
        assert_eq!(responses[1].bound_events.len(), 1);
        assert_eq!(responses[1].bound_events[0].event_id, upcoming.id);
    }

    #[tokio::test]
    async fn no_payments_yields_empty_list() {
        let handler = GetActivePaymentsHandler::new(
            Arc::new(InMemoryPaymentRepository::new()),
            Arc::new(InMemoryEventRepository::new()),
        );
        let responses = handler
            .handle(GetActivePaymentsQuery {
                user_id: user(),
                on: None,
            })
            .await
            .unwrap();
        assert!(responses.is_empty());
    }
}
