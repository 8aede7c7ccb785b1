//! PostgreSQL implementation of PaymentRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentType, PaymentWriteSet};
use crate::ports::PaymentRepository;

use super::{db_error, parse_column, parse_user_id};

const SELECT_PAYMENTS: &str = r#"
    SELECT id, user_id, payment_type, created, start_date, end_date, payment_count
    FROM payments
"#;

/// PostgreSQL implementation of the PaymentRepository port.
pub struct PostgresPaymentRepository {
    pool: PgPool,
}

impl PostgresPaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: Uuid,
    user_id: String,
    payment_type: String,
    created: DateTime<Utc>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    payment_count: i32,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Payment {
            id: PaymentId::from_uuid(row.id),
            user_id: parse_user_id("user_id", row.user_id)?,
            payment_type: parse_column("payment_type", &row.payment_type)?,
            created: Timestamp::from_datetime(row.created),
            start_date: row.start_date,
            end_date: row.end_date,
            payment_count: row.payment_count,
        })
    }
}

fn into_payments(rows: Vec<PaymentRow>) -> Result<Vec<Payment>, DomainError> {
    rows.into_iter().map(Payment::try_from).collect()
}

async fn insert_payment(
    tx: &mut Transaction<'_, Postgres>,
    payment: &Payment,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO payments (
            id, user_id, payment_type, created, start_date, end_date, payment_count
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(payment.id.as_uuid())
    .bind(payment.user_id.as_str())
    .bind(payment.payment_type.as_str())
    .bind(payment.created.as_datetime())
    .bind(payment.start_date)
    .bind(payment.end_date)
    .bind(payment.payment_count)
    .execute(&mut **tx)
    .await
    .map_err(db_error("insert payment"))?;
    Ok(())
}

async fn update_payment(
    tx: &mut Transaction<'_, Postgres>,
    payment: &Payment,
) -> Result<(), DomainError> {
    let result = sqlx::query(
        r#"
        UPDATE payments SET
            start_date = $2,
            end_date = $3,
            payment_count = $4
        WHERE id = $1
        "#,
    )
    .bind(payment.id.as_uuid())
    .bind(payment.start_date)
    .bind(payment.end_date)
    .bind(payment.payment_count)
    .execute(&mut **tx)
    .await
    .map_err(db_error("update payment"))?;

    if result.rows_affected() == 0 {
        return Err(DomainError::new(
            ErrorCode::PaymentNotFound,
            format!("Payment not found: {}", payment.id),
        ));
    }
    Ok(())
}

#[async_trait]
impl PaymentRepository for PostgresPaymentRepository {
    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        let row: Option<PaymentRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_PAYMENTS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch payment"))?;
        row.map(Payment::try_from).transpose()
    }

    async fn find_active(
        &self,
        user_id: &UserId,
        payment_type: PaymentType,
        on: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            r#"{}
            WHERE user_id = $1 AND payment_type = $2
              AND (start_date IS NULL OR start_date <= $3)
              AND (end_date IS NULL OR end_date > $3)
              AND (start_date IS NULL OR end_date IS NULL OR start_date < end_date)
            ORDER BY created"#,
            SELECT_PAYMENTS
        ))
        .bind(user_id.as_str())
        .bind(payment_type.as_str())
        .bind(on)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch active payments"))?;
        into_payments(rows)
    }

    async fn find_overlapping(
        &self,
        user_id: &UserId,
        payment_type: PaymentType,
        start: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            r#"{}
            WHERE user_id = $1 AND payment_type = $2
              AND (end_date IS NULL OR end_date > $3)
            ORDER BY created"#,
            SELECT_PAYMENTS
        ))
        .bind(user_id.as_str())
        .bind(payment_type.as_str())
        .bind(start)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch overlapping payments"))?;
        into_payments(rows)
    }

    async fn find_periodical_ending_on(
        &self,
        user_id: &UserId,
        end: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 AND payment_type = $2 AND end_date = $3 ORDER BY created",
            SELECT_PAYMENTS
        ))
        .bind(user_id.as_str())
        .bind(PaymentType::Periodical.as_str())
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch adjacent payments"))?;
        into_payments(rows)
    }

    async fn apply(&self, changes: &PaymentWriteSet) -> Result<(), DomainError> {
        if changes.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;
        for payment in &changes.updates {
            update_payment(&mut tx, payment).await?;
        }
        for payment in &changes.inserts {
            insert_payment(&mut tx, payment).await?;
        }
        tx.commit().await.map_err(db_error("commit payment changes"))?;
        Ok(())
    }

    async fn reset_by_type(
        &self,
        payment_type: PaymentType,
        today: NaiveDate,
    ) -> Result<u64, DomainError> {
        let result = match payment_type {
            PaymentType::OneTime => {
                sqlx::query("UPDATE payments SET payment_count = 0 WHERE payment_type = $1")
                    .bind(payment_type.as_str())
                    .execute(&self.pool)
                    .await
            }
            PaymentType::Periodical => {
                sqlx::query(
                    r#"
                    UPDATE payments SET end_date = $2
                    WHERE payment_type = $1 AND (end_date IS NULL OR end_date > $2)
                    "#,
                )
                .bind(payment_type.as_str())
                .bind(today)
                .execute(&self.pool)
                .await
            }
        }
        .map_err(db_error("reset payments"))?;
        Ok(result.rows_affected())
    }
}
