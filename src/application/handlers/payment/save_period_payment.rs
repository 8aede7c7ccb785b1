//! SavePeriodPaymentHandler - Command handler issuing periodical entitlements.
//!
//! A periodical payment supersedes one-time credits from its start date on:
//! every one-time row still running at the new start is clamped to end the
//! day before, in the same write set.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::application::{ConfigurationStore, KeyedLocks};
use crate::domain::configuration::keys::PAYMENT_GROUP;
use crate::domain::configuration::PeriodSettings;
use crate::domain::foundation::{PaymentId, Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentError, PaymentType, PaymentWriteSet};
use crate::ports::PaymentRepository;

#[derive(Debug, Clone)]
pub struct SavePeriodPaymentCommand {
    pub user_id: UserId,
    /// Date inside the period to pay for. Defaults to today.
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SavePeriodOutcome {
    Created,
    /// The previous period's row was renewed by moving its end date.
    Extended,
}

#[derive(Debug, Clone, Serialize)]
pub struct SavePeriodPaymentResult {
    pub payment: Payment,
    pub outcome: SavePeriodOutcome,
    /// One-time rows whose end date was clamped.
    pub clamped: Vec<PaymentId>,
}

pub struct SavePeriodPaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    config: Arc<ConfigurationStore>,
    locks: Arc<KeyedLocks<UserId>>,
}

impl SavePeriodPaymentHandler {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        config: Arc<ConfigurationStore>,
        locks: Arc<KeyedLocks<UserId>>,
    ) -> Self {
        Self {
            payments,
            config,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: SavePeriodPaymentCommand,
    ) -> Result<SavePeriodPaymentResult, PaymentError> {
        let _guard = self.locks.lock(&cmd.user_id).await;
        let reference = cmd.reference_date.unwrap_or_else(|| Timestamp::now().date());

        let grid = PeriodSettings::load(&self.config.snapshot(), PAYMENT_GROUP)?;
        let period = grid.period_containing(reference)?;

        // 1. Reject overlap with another periodical row
        let overlapping = self
            .payments
            .find_overlapping(&cmd.user_id, PaymentType::Periodical, period.start_date)
            .await?;
        if let Some(existing) = overlapping.into_iter().next() {
            tracing::debug!(
                "Periodical payment {} overlaps period starting {}",
                existing.id,
                period.start_date
            );
            return Err(PaymentError::conflict(existing));
        }

        // 2. Renew the adjacent row or create a new one
        let adjacent = self
            .payments
            .find_periodical_ending_on(&cmd.user_id, period.start_date)
            .await?;
        let mut changes = PaymentWriteSet::new();
        let (payment, outcome) = match adjacent.into_iter().next() {
            Some(mut previous) => {
                previous.end_date = Some(period.end_date);
                changes = changes.update(previous.clone());
                (previous, SavePeriodOutcome::Extended)
            }
            None => {
                let payment = Payment::periodical(cmd.user_id.clone(), period);
                changes = changes.insert(payment.clone());
                (payment, SavePeriodOutcome::Created)
            }
        };

        // 3. Clamp one-time rows running into the new window
        let superseded = self
            .payments
            .find_overlapping(&cmd.user_id, PaymentType::OneTime, period.start_date)
            .await?;
        let mut clamped = Vec::with_capacity(superseded.len());
        for mut one_time in superseded {
            one_time.supersede_from(period.start_date);
            tracing::debug!(
                "Clamping one-time payment {} to end {:?}",
                one_time.id,
                one_time.end_date
            );
            clamped.push(one_time.id);
            changes = changes.update(one_time);
        }

        self.payments.apply(&changes).await?;
        tracing::info!(
            "Saved periodical payment {} [{}, {}) ({:?})",
            payment.id,
            period.start_date,
            period.end_date,
            outcome
        );

        Ok(SavePeriodPaymentResult {
            payment,
            outcome,
            clamped,
        })
    }
}
