//! In-memory notification queue.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::event::Notification;
use crate::domain::foundation::DomainError;
use crate::ports::NotificationQueue;

#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationQueue {
    entries: Arc<RwLock<Vec<Notification>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryNotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent enqueue fail (useful for tests).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn entries(&self) -> Vec<Notification> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl NotificationQueue for InMemoryNotificationQueue {
    async fn add_notification(&self, notification: &Notification) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::database("Notification queue unavailable"));
        }
        self.entries.write().await.push(notification.clone());
        Ok(())
    }
}
