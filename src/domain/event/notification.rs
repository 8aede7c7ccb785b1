//! Event lifecycle notifications.
//!
//! Status transitions map to at most one queued notification, gated by the
//! `notification.event` flags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::configuration::keys::{
    EVENT_NEW, EVENT_NOTIFICATIONS, EVENT_REMOVED, EVENT_UPDATED, NOTIFICATION_GROUP,
};
use crate::domain::configuration::ConfigurationSnapshot;
use crate::domain::foundation::{EventId, NotificationId, Timestamp};

use super::EventStatus;

/// Kind of subject a notification refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Event,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Event => "event",
        }
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "event" => Ok(NotificationType::Event),
            other => Err(format!("unknown notification type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationDetail {
    New,
    Updated,
    Deleted,
}

impl NotificationDetail {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationDetail::New => "new",
            NotificationDetail::Updated => "updated",
            NotificationDetail::Deleted => "deleted",
        }
    }
}

impl fmt::Display for NotificationDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationDetail {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(NotificationDetail::New),
            "updated" => Ok(NotificationDetail::Updated),
            "deleted" => Ok(NotificationDetail::Deleted),
            other => Err(format!("unknown notification detail '{}'", other)),
        }
    }
}

/// A queued notification entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub notification_type: NotificationType,
    pub detail: NotificationDetail,
    pub subject_id: Uuid,
    pub created_at: Timestamp,
}

impl Notification {
    pub fn for_event(event_id: EventId, detail: NotificationDetail) -> Self {
        Self {
            id: NotificationId::new(),
            notification_type: NotificationType::Event,
            detail,
            subject_id: *event_id.as_uuid(),
            created_at: Timestamp::now(),
        }
    }
}

/// Notification due for an `old -> new` status change, if any.
///
/// Creation is evaluated as a change from `Drafted`.
pub fn notification_for(
    old: EventStatus,
    new: EventStatus,
    config: &ConfigurationSnapshot,
) -> Option<NotificationDetail> {
    use EventStatus::*;
    let (detail, flag) = match (old, new) {
        (Drafted, Published) => (NotificationDetail::New, EVENT_NEW),
        (Published, Published) => (NotificationDetail::Updated, EVENT_UPDATED),
        (Published, Cancelled) | (Published, Drafted) => {
            (NotificationDetail::Deleted, EVENT_REMOVED)
        }
        _ => return None,
    };
    config
        .is_enabled(NOTIFICATION_GROUP, EVENT_NOTIFICATIONS, flag)
        .then_some(detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::configuration::ConfigurationSetting;

    fn flags(value: &str) -> ConfigurationSnapshot {
        ConfigurationSnapshot::new(
            1,
            vec![ConfigurationSetting::new(
                NOTIFICATION_GROUP,
                EVENT_NOTIFICATIONS,
                value,
            )],
        )
    }

    #[test]
    fn publish_fires_new_only_when_enabled() {
        use EventStatus::*;
        assert_eq!(
            notification_for(Drafted, Published, &flags("event-new")),
            Some(NotificationDetail::New)
        );
        assert_eq!(notification_for(Drafted, Published, &flags("event-updated")), None);
    }

    #[test]
    fn edit_of_published_fires_updated() {
        use EventStatus::*;
        assert_eq!(
            notification_for(Published, Published, &flags("event-new, event-updated")),
            Some(NotificationDetail::Updated)
        );
    }

    #[test]
    fn unpublish_and_cancel_fire_deleted() {
        use EventStatus::*;
        let config = flags("event-removed");
        assert_eq!(
            notification_for(Published, Drafted, &config),
            Some(NotificationDetail::Deleted)
        );
        assert_eq!(
            notification_for(Published, Cancelled, &config),
            Some(NotificationDetail::Deleted)
        );
    }

    #[test]
    fn draft_changes_are_silent() {
        use EventStatus::*;
        let config = flags("event-new,event-updated,event-removed");
        assert_eq!(notification_for(Drafted, Drafted, &config), None);
        assert_eq!(notification_for(Drafted, Cancelled, &config), None);
    }

    #[test]
    fn missing_flag_setting_disables_everything() {
        let config = ConfigurationSnapshot::new(1, Vec::new());
        assert_eq!(
            notification_for(EventStatus::Drafted, EventStatus::Published, &config),
            None
        );
    }
}
