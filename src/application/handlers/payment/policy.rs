//! Reads the one-time expiration policy and payment grid from a snapshot.

use chrono::NaiveDate;

use crate::domain::configuration::keys::{ONE_TIME_EXPIRATION, PAYMENT_GROUP};
use crate::domain::configuration::{ConfigurationSnapshot, PeriodSettings};
use crate::domain::payment::{ExpirationPolicy, PaymentError, PaymentWindow};

/// Configured one-time expiration policy. An undefined setting means disabled.
pub(crate) fn one_time_policy(
    snapshot: &ConfigurationSnapshot,
) -> Result<ExpirationPolicy, PaymentError> {
    if snapshot.get(PAYMENT_GROUP, ONE_TIME_EXPIRATION).is_none() {
        tracing::debug!("No one-time expiration policy configured, treating as disabled");
        return Ok(ExpirationPolicy::Disabled);
    }
    Ok(snapshot.get_enum(PAYMENT_GROUP, ONE_TIME_EXPIRATION)?)
}

/// Fails with `PolicyDisabled` for the disabled policy.
pub(crate) fn require_enabled(
    snapshot: &ConfigurationSnapshot,
) -> Result<ExpirationPolicy, PaymentError> {
    match one_time_policy(snapshot)? {
        ExpirationPolicy::Disabled => Err(PaymentError::policy_disabled(
            "one-time payments are disabled",
        )),
        policy => Ok(policy),
    }
}

/// Validity window of a one-time credit issued on `issued_on`.
///
/// The payment grid is only read for policies that need it.
pub(crate) fn one_time_window(
    snapshot: &ConfigurationSnapshot,
    policy: ExpirationPolicy,
    issued_on: NaiveDate,
) -> Result<PaymentWindow, PaymentError> {
    let window = match policy {
        ExpirationPolicy::Disabled => None,
        ExpirationPolicy::Perpetual => Some(PaymentWindow {
            start_date: issued_on,
            end_date: None,
        }),
        ExpirationPolicy::Periodical | ExpirationPolicy::Durational => {
            let grid = PeriodSettings::load(snapshot, PAYMENT_GROUP)?;
            policy.window(issued_on, &grid)?
        }
    };
    window.ok_or_else(|| PaymentError::policy_disabled("one-time payments are disabled"))
}
