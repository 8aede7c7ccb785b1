//! PostgreSQL implementation of MembershipRepository.
//!
//! Provides persistent storage for Membership aggregates using PostgreSQL.

use crate::domain::foundation::{DomainError, ErrorCode, MembershipId, Timestamp, UserId};
use crate::domain::membership::{Membership, MembershipStatus};
use crate::ports::MembershipRepository;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use super::{db_error, parse_column, parse_user_id};

const SELECT_MEMBERSHIPS: &str = r#"
    SELECT id, user_id, membership_type, status, start_date, end_date,
           created_at, updated_at, cancelled_at
    FROM memberships
"#;

/// PostgreSQL implementation of the MembershipRepository port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    /// Creates a new PostgresMembershipRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a membership.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: Uuid,
    user_id: String,
    membership_type: String,
    status: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = DomainError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Membership {
            id: MembershipId::from_uuid(row.id),
            user_id: parse_user_id("user_id", row.user_id)?,
            membership_type: parse_column("membership_type", &row.membership_type)?,
            status: parse_column("status", &row.status)?,
            start_date: row.start_date,
            end_date: row.end_date,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            cancelled_at: row.cancelled_at.map(Timestamp::from_datetime),
        })
    }
}

async fn update_row<'e, E>(executor: E, membership: &Membership) -> Result<(), DomainError>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        r#"
        UPDATE memberships SET
            membership_type = $2,
            status = $3,
            start_date = $4,
            end_date = $5,
            updated_at = $6,
            cancelled_at = $7
        WHERE id = $1
        "#,
    )
    .bind(membership.id.as_uuid())
    .bind(membership.membership_type.as_str())
    .bind(membership.status.as_str())
    .bind(membership.start_date)
    .bind(membership.end_date)
    .bind(membership.updated_at.as_datetime())
    .bind(membership.cancelled_at.as_ref().map(Timestamp::as_datetime))
    .execute(executor)
    .await
    .map_err(db_error("update membership"))?;

    if result.rows_affected() == 0 {
        return Err(DomainError::new(
            ErrorCode::MembershipNotFound,
            format!("Membership not found: {}", membership.id),
        ));
    }

    Ok(())
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn save(&self, membership: &Membership) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO memberships (
                id, user_id, membership_type, status, start_date, end_date,
                created_at, updated_at, cancelled_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(membership.id.as_uuid())
        .bind(membership.user_id.as_str())
        .bind(membership.membership_type.as_str())
        .bind(membership.status.as_str())
        .bind(membership.start_date)
        .bind(membership.end_date)
        .bind(membership.created_at.as_datetime())
        .bind(membership.updated_at.as_datetime())
        .bind(membership.cancelled_at.as_ref().map(Timestamp::as_datetime))
        .execute(&self.pool)
        .await
        .map_err(db_error("save membership"))?;

        Ok(())
    }

    async fn update(&self, membership: &Membership) -> Result<(), DomainError> {
        update_row(&self.pool, membership).await
    }

    async fn update_all(&self, memberships: &[Membership]) -> Result<(), DomainError> {
        if memberships.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;
        for membership in memberships {
            update_row(&mut *tx, membership).await?;
        }
        tx.commit().await.map_err(db_error("commit membership updates"))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &MembershipId) -> Result<Option<Membership>, DomainError> {
        let row: Option<MembershipRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_MEMBERSHIPS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("find membership"))?;

        row.map(Membership::try_from).transpose()
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 ORDER BY start_date DESC",
            SELECT_MEMBERSHIPS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("find memberships"))?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn find_overlapping(
        &self,
        user_id: &UserId,
        start: NaiveDate,
    ) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 AND status <> $2 AND end_date > $3 ORDER BY start_date ASC",
            SELECT_MEMBERSHIPS
        ))
        .bind(user_id.as_str())
        .bind(MembershipStatus::Expired.as_str())
        .bind(start)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("find overlapping memberships"))?;

        rows.into_iter().map(Membership::try_from).collect()
    }

    async fn find_due_for_expiry(&self, today: NaiveDate) -> Result<Vec<Membership>, DomainError> {
        let rows: Vec<MembershipRow> = sqlx::query_as(&format!(
            "{} WHERE status <> $1 AND end_date <= $2 ORDER BY end_date ASC",
            SELECT_MEMBERSHIPS
        ))
        .bind(MembershipStatus::Expired.as_str())
        .bind(today)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("find memberships due for expiry"))?;

        rows.into_iter().map(Membership::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::MembershipType;

    fn row(status: &str) -> MembershipRow {
        let now = Utc::now();
        MembershipRow {
            id: Uuid::new_v4(),
            user_id: "diver-9".to_string(),
            membership_type: "family".to_string(),
            status: status.to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        }
    }

    #[test]
    fn row_converts_to_membership() {
        let membership = Membership::try_from(row("cancelled")).unwrap();
        assert_eq!(membership.membership_type, MembershipType::Family);
        assert_eq!(membership.status, MembershipStatus::Cancelled);
        assert_eq!(membership.user_id.as_str(), "diver-9");
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let err = Membership::try_from(row("past_due")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
