//! Well-known configuration groups and keys, and typed readers over them.

use chrono::NaiveDate;
use std::num::NonZeroU32;

use super::{ConfigurationError, ConfigurationSetting, ConfigurationSnapshot};
use crate::domain::period::{calculate_period, PeriodError, PeriodResult, PeriodUnit};

pub const PAYMENT_GROUP: &str = "payment";
pub const MEMBERSHIP_GROUP: &str = "membership";
pub const NOTIFICATION_GROUP: &str = "notification";

pub const ONE_TIME_EXPIRATION: &str = "one-time-expiration";
pub const UNIT: &str = "unit";
pub const PERIOD_LENGTH: &str = "period-length";
pub const PERIOD_START_DATE: &str = "period-start-date";
pub const PERIOD_START_POINT: &str = "period-start-point";

pub const EVENT_NOTIFICATIONS: &str = "event";
pub const EVENT_NEW: &str = "event-new";
pub const EVENT_UPDATED: &str = "event-updated";
pub const EVENT_REMOVED: &str = "event-removed";

/// Default settings seeded by the initial migration.
pub fn portal_defaults() -> Vec<ConfigurationSetting> {
    [
        (PAYMENT_GROUP, ONE_TIME_EXPIRATION, "perpetual"),
        (PAYMENT_GROUP, UNIT, "years"),
        (PAYMENT_GROUP, PERIOD_LENGTH, "1"),
        (PAYMENT_GROUP, PERIOD_START_DATE, "2023-01-01"),
        (PAYMENT_GROUP, PERIOD_START_POINT, "0"),
        (MEMBERSHIP_GROUP, UNIT, "years"),
        (MEMBERSHIP_GROUP, PERIOD_LENGTH, "1"),
        (MEMBERSHIP_GROUP, PERIOD_START_DATE, "2023-01-01"),
        (MEMBERSHIP_GROUP, PERIOD_START_POINT, "0"),
        (NOTIFICATION_GROUP, EVENT_NOTIFICATIONS, "event-new,event-updated,event-removed"),
    ]
    .into_iter()
    .map(|(group, key, value)| ConfigurationSetting::new(group, key, value))
    .collect()
}

/// Period grid parameters read from one configuration group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSettings {
    pub unit: PeriodUnit,
    pub length: NonZeroU32,
    pub anchor: NaiveDate,
    pub start_point: u32,
}

impl PeriodSettings {
    pub fn load(snapshot: &ConfigurationSnapshot, group: &str) -> Result<Self, ConfigurationError> {
        let unit = snapshot.get_enum::<PeriodUnit>(group, UNIT)?;

        let raw_length = snapshot.get_numeric(group, PERIOD_LENGTH)?;
        let length = u32::try_from(raw_length)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| ConfigurationError::Invalid {
                group: group.to_string(),
                key: PERIOD_LENGTH.to_string(),
                value: raw_length.to_string(),
                reason: "period length must be a positive integer".to_string(),
            })?;

        let anchor = snapshot.get_date(group, PERIOD_START_DATE)?;

        let raw_start = snapshot.get_numeric(group, PERIOD_START_POINT)?;
        let start_point = u32::try_from(raw_start).map_err(|_| ConfigurationError::Invalid {
            group: group.to_string(),
            key: PERIOD_START_POINT.to_string(),
            value: raw_start.to_string(),
            reason: "start point must not be negative".to_string(),
        })?;

        Ok(Self {
            unit,
            length,
            anchor,
            start_point,
        })
    }

    /// Period of this grid containing `reference`.
    pub fn period_containing(&self, reference: NaiveDate) -> Result<PeriodResult, PeriodError> {
        calculate_period(reference, self.anchor, self.unit, self.start_point, self.length)
    }
}
