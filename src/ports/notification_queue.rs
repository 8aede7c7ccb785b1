//! Notification queue port.
//!
//! Fire-and-forget: callers never wait for delivery. A failed enqueue is
//! reported back but must not fail the operation that produced it.

use async_trait::async_trait;

use crate::domain::event::Notification;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait NotificationQueue: Send + Sync {
    async fn add_notification(&self, notification: &Notification) -> Result<(), DomainError>;
}
