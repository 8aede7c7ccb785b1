//! PostgreSQL implementation of EventRepository.
//!
//! Events live in `events`; participant rows in `event_participants`.
//! `create` and `save` write both tables inside one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::event::{
    Event, EventDetails, EventParticipant, ParticipantChanges, ParticipantType,
};
use crate::domain::foundation::{DomainError, ErrorCode, EventId, Timestamp, UserId};
use crate::domain::payment::PaymentType;
use crate::ports::EventRepository;

use super::{db_error, parse_column, parse_user_id, to_i32, to_u32};

const SELECT_EVENTS: &str = r#"
    SELECT e.id, e.organizer_id, e.status, e.title, e.description, e.start_time,
           e.event_duration, e.max_duration, e.max_depth, e.max_participants, e.event_type
    FROM events e
"#;

pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EventRow {
    id: Uuid,
    organizer_id: String,
    status: String,
    title: String,
    description: String,
    start_time: DateTime<Utc>,
    event_duration: i32,
    max_duration: i32,
    max_depth: i32,
    max_participants: i32,
    event_type: String,
}

impl TryFrom<EventRow> for Event {
    type Error = DomainError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            id: EventId::from_uuid(row.id),
            organizer_id: parse_user_id("organizer_id", row.organizer_id)?,
            status: parse_column("status", &row.status)?,
            details: EventDetails {
                title: row.title,
                description: row.description,
                start_time: Timestamp::from_datetime(row.start_time),
                event_duration: to_u32("event_duration", row.event_duration)?,
                max_duration: to_u32("max_duration", row.max_duration)?,
                max_depth: to_u32("max_depth", row.max_depth)?,
                max_participants: to_u32("max_participants", row.max_participants)?,
                event_type: parse_column("event_type", &row.event_type)?,
            },
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ParticipantRow {
    event_id: Uuid,
    user_id: String,
    participant_type: String,
    payment_type: Option<String>,
    created_at: DateTime<Utc>,
    dive_count: i32,
}

impl TryFrom<ParticipantRow> for EventParticipant {
    type Error = DomainError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        let payment_type = row
            .payment_type
            .as_deref()
            .map(|v| parse_column::<PaymentType>("payment_type", v))
            .transpose()?;
        Ok(EventParticipant {
            event_id: EventId::from_uuid(row.event_id),
            user_id: parse_user_id("user_id", row.user_id)?,
            participant_type: parse_column("participant_type", &row.participant_type)?,
            payment_type,
            created_at: Timestamp::from_datetime(row.created_at),
            dive_count: to_u32("dive_count", row.dive_count)?,
        })
    }
}

async fn insert_participant(
    tx: &mut Transaction<'_, Postgres>,
    participant: &EventParticipant,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO event_participants (
            event_id, user_id, participant_type, payment_type, created_at, dive_count
        ) VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(participant.event_id.as_uuid())
    .bind(participant.user_id.as_str())
    .bind(participant.participant_type.as_str())
    .bind(participant.payment_type.map(|t| t.as_str()))
    .bind(participant.created_at.as_datetime())
    .bind(to_i32("dive_count", participant.dive_count)?)
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return DomainError::new(
                    ErrorCode::AlreadyParticipant,
                    format!("User {} already participates", participant.user_id),
                );
            }
        }
        DomainError::database(format!("Failed to insert participant: {}", e))
    })?;
    Ok(())
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn create(
        &self,
        event: &Event,
        organizer: &EventParticipant,
    ) -> Result<(), DomainError> {
        let d = &event.details;
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        sqlx::query(
            r#"
            INSERT INTO events (
                id, organizer_id, status, title, description, start_time,
                event_duration, max_duration, max_depth, max_participants, event_type
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(event.organizer_id.as_str())
        .bind(event.status.as_str())
        .bind(&d.title)
        .bind(&d.description)
        .bind(d.start_time.as_datetime())
        .bind(to_i32("event_duration", d.event_duration)?)
        .bind(to_i32("max_duration", d.max_duration)?)
        .bind(to_i32("max_depth", d.max_depth)?)
        .bind(to_i32("max_participants", d.max_participants)?)
        .bind(d.event_type.as_str())
        .execute(&mut *tx)
        .await
        .map_err(db_error("insert event"))?;

        insert_participant(&mut tx, organizer).await?;
        tx.commit().await.map_err(db_error("commit event"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        let row: Option<EventRow> = sqlx::query_as(&format!("{} WHERE e.id = $1", SELECT_EVENTS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch event"))?;
        row.map(Event::try_from).transpose()
    }

    async fn find_participants(&self, id: &EventId) -> Result<Vec<EventParticipant>, DomainError> {
        let rows: Vec<ParticipantRow> = sqlx::query_as(
            r#"
            SELECT event_id, user_id, participant_type, payment_type, created_at, dive_count
            FROM event_participants
            WHERE event_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch participants"))?;
        rows.into_iter().map(EventParticipant::try_from).collect()
    }

    async fn save(&self, event: &Event, changes: &ParticipantChanges) -> Result<(), DomainError> {
        let d = &event.details;
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let result = sqlx::query(
            r#"
            UPDATE events SET
                organizer_id = $2,
                status = $3,
                title = $4,
                description = $5,
                start_time = $6,
                event_duration = $7,
                max_duration = $8,
                max_depth = $9,
                max_participants = $10,
                event_type = $11
            WHERE id = $1
            "#,
        )
        .bind(event.id.as_uuid())
        .bind(event.organizer_id.as_str())
        .bind(event.status.as_str())
        .bind(&d.title)
        .bind(&d.description)
        .bind(d.start_time.as_datetime())
        .bind(to_i32("event_duration", d.event_duration)?)
        .bind(to_i32("max_duration", d.max_duration)?)
        .bind(to_i32("max_depth", d.max_depth)?)
        .bind(to_i32("max_participants", d.max_participants)?)
        .bind(d.event_type.as_str())
        .execute(&mut *tx)
        .await
        .map_err(db_error("update event"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::EventNotFound,
                format!("Event not found: {}", event.id),
            ));
        }

        if !changes.removed.is_empty() {
            let removed: Vec<&str> = changes.removed.iter().map(UserId::as_str).collect();
            sqlx::query(
                r#"
                DELETE FROM event_participants
                WHERE event_id = $1 AND participant_type = $2 AND user_id = ANY($3)
                "#,
            )
            .bind(event.id.as_uuid())
            .bind(ParticipantType::User.as_str())
            .bind(&removed)
            .execute(&mut *tx)
            .await
            .map_err(db_error("remove participants"))?;
        }

        if let Some(organizer) = &changes.organizer {
            sqlx::query(
                "DELETE FROM event_participants WHERE event_id = $1 AND participant_type = $2",
            )
            .bind(event.id.as_uuid())
            .bind(ParticipantType::Organizer.as_str())
            .execute(&mut *tx)
            .await
            .map_err(db_error("replace organizer"))?;
            insert_participant(&mut tx, organizer).await?;
        }

        for participant in &changes.inserted {
            insert_participant(&mut tx, participant).await?;
        }

        tx.commit().await.map_err(db_error("commit event"))?;
        Ok(())
    }

    async fn add_participant(&self, participant: &EventParticipant) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;
        insert_participant(&mut tx, participant).await?;
        tx.commit().await.map_err(db_error("commit participant"))?;
        Ok(())
    }

    async fn remove_participant(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM event_participants
            WHERE event_id = $1 AND user_id = $2 AND participant_type = $3
            "#,
        )
        .bind(event_id.as_uuid())
        .bind(user_id.as_str())
        .bind(ParticipantType::User.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error("remove participant"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_dive_count(
        &self,
        event_id: &EventId,
        user_id: &UserId,
        dive_count: u32,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE event_participants SET dive_count = $3 WHERE event_id = $1 AND user_id = $2",
        )
        .bind(event_id.as_uuid())
        .bind(user_id.as_str())
        .bind(to_i32("dive_count", dive_count)?)
        .execute(&self.pool)
        .await
        .map_err(db_error("update dive count"))?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_future_events_for_participant(
        &self,
        user_id: &UserId,
        payment_type: PaymentType,
        after: Timestamp,
    ) -> Result<Vec<Event>, DomainError> {
        let rows: Vec<EventRow> = sqlx::query_as(&format!(
            r#"{}
            JOIN event_participants p ON p.event_id = e.id
            WHERE p.user_id = $1 AND p.payment_type = $2
              AND e.status <> 'cancelled' AND e.start_time > $3
            ORDER BY e.start_time"#,
            SELECT_EVENTS
        ))
        .bind(user_id.as_str())
        .bind(payment_type.as_str())
        .bind(after.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch bound events"))?;
        rows.into_iter().map(Event::try_from).collect()
    }
}
