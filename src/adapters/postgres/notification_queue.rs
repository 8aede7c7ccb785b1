//! PostgreSQL-backed notification queue.
//!
//! Rows are picked up by the external delivery worker.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::event::Notification;
use crate::domain::foundation::DomainError;
use crate::ports::NotificationQueue;

use super::db_error;

pub struct PostgresNotificationQueue {
    pool: PgPool,
}

impl PostgresNotificationQueue {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationQueue for PostgresNotificationQueue {
    async fn add_notification(&self, notification: &Notification) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO notification_queue (id, notification_type, detail, subject_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(notification.id.as_uuid())
        .bind(notification.notification_type.as_str())
        .bind(notification.detail.as_str())
        .bind(notification.subject_id)
        .bind(notification.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("enqueue notification"))?;
        Ok(())
    }
}
