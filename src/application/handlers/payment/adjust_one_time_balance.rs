//! Balance adjustments on a user's active one-time payment.
//!
//! - `DecreaseOneTimePaymentHandler` - consumes one credit
//! - `IncreaseOneTimePaymentHandler` - adds reward credits, creating a row if needed

use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::{ConfigurationStore, KeyedLocks};
use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::payment::{Payment, PaymentError, PaymentStatus, PaymentType, PaymentWriteSet};
use crate::ports::PaymentRepository;

use super::policy::{one_time_window, require_enabled};

#[derive(Debug, Clone)]
pub struct DecreaseOneTimePaymentCommand {
    pub user_id: UserId,
    /// Defaults to today.
    pub on: Option<NaiveDate>,
}

pub struct DecreaseOneTimePaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    locks: Arc<KeyedLocks<UserId>>,
}

impl DecreaseOneTimePaymentHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>, locks: Arc<KeyedLocks<UserId>>) -> Self {
        Self { payments, locks }
    }

    pub async fn handle(
        &self,
        cmd: DecreaseOneTimePaymentCommand,
    ) -> Result<PaymentStatus, PaymentError> {
        let _guard = self.locks.lock(&cmd.user_id).await;
        let on = cmd.on.unwrap_or_else(|| Timestamp::now().date());

        let mut payment = self
            .payments
            .find_active(&cmd.user_id, PaymentType::OneTime, on)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PaymentError::no_active_payment(cmd.user_id.clone(), PaymentType::OneTime))?;

        payment.consume_credit()?;
        self.payments
            .apply(&PaymentWriteSet::new().update(payment.clone()))
            .await?;

        tracing::info!(
            "Consumed one credit of payment {}, {} left",
            payment.id,
            payment.payment_count
        );
        Ok(payment.status())
    }
}

#[derive(Debug, Clone)]
pub struct IncreaseOneTimePaymentCommand {
    pub user_id: UserId,
    pub count: i32,
    /// Defaults to today.
    pub on: Option<NaiveDate>,
}

pub struct IncreaseOneTimePaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    config: Arc<ConfigurationStore>,
    locks: Arc<KeyedLocks<UserId>>,
}

impl IncreaseOneTimePaymentHandler {
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
        cmd: IncreaseOneTimePaymentCommand,
    ) -> Result<PaymentStatus, PaymentError> {
        if cmd.count <= 0 {
            return Err(PaymentError::validation("count", "must be positive"));
        }

        let _guard = self.locks.lock(&cmd.user_id).await;
        let on = cmd.on.unwrap_or_else(|| Timestamp::now().date());
        let snapshot = self.config.snapshot();
        let policy = require_enabled(&snapshot)?;

        let active = self
            .payments
            .find_active(&cmd.user_id, PaymentType::OneTime, on)
            .await?
            .into_iter()
            .next();

        let (payment, changes) = match active {
            Some(mut payment) => {
                payment.add_credits(cmd.count);
                let changes = PaymentWriteSet::new().update(payment.clone());
                (payment, changes)
            }
            None => {
                let window = one_time_window(&snapshot, policy, on)?;
                if let Some(existing) = self
                    .payments
                    .find_overlapping(&cmd.user_id, PaymentType::OneTime, window.start_date)
                    .await?
                    .into_iter()
                    .next()
                {
                    return Err(PaymentError::conflict(existing));
                }
                let payment =
                    Payment::one_time(cmd.user_id, cmd.count, window.start_date, window.end_date);
                let changes = PaymentWriteSet::new().insert(payment.clone());
                (payment, changes)
            }
        };
        self.payments.apply(&changes).await?;

        tracing::info!(
            "Added {} credits to payment {}, balance {}",
            cmd.count,
            payment.id,
            payment.payment_count
        );
        Ok(payment.status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryConfigurationRepository, InMemoryPaymentRepository};
    use crate::domain::configuration::ConfigurationSetting;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user() -> UserId {
        UserId::new("diver-1").unwrap()
    }

    async fn store(policy: &str) -> Arc<ConfigurationStore> {
        let config = InMemoryConfigurationRepository::new(vec![
            ConfigurationSetting::new("payment", "one-time-expiration", policy),
            ConfigurationSetting::new("payment", "unit", "weeks"),
            ConfigurationSetting::new("payment", "period-length", "2"),
            ConfigurationSetting::new("payment", "period-start-date", "2024-01-01"),
            ConfigurationSetting::new("payment", "period-start-point", "1"),
        ]);
        Arc::new(ConfigurationStore::load(Arc::new(config)).await.unwrap())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Decrease
    // ════════════════════════════════════════════════════════════════════════════

    fn decrease_cmd() -> DecreaseOneTimePaymentCommand {
        DecreaseOneTimePaymentCommand {
            user_id: user(),
            on: Some(date(2024, 3, 1)),
        }
    }

    #[tokio::test]
    async fn decrease_without_row_is_not_found() {
        let handler = DecreaseOneTimePaymentHandler::new(
            Arc::new(InMemoryPaymentRepository::new()),
            Arc::new(KeyedLocks::new()),
        );
        assert!(matches!(
            handler.handle(decrease_cmd()).await,
            Err(PaymentError::NoActivePayment { .. })
        ));
    }

    #[tokio::test]
    async fn decrease_consumes_one_credit() {
        let repo = InMemoryPaymentRepository::new();
        repo.insert(Payment::one_time(user(), 2, date(2024, 1, 1), None)).await;
        let handler =
            DecreaseOneTimePaymentHandler::new(Arc::new(repo.clone()), Arc::new(KeyedLocks::new()));

        let status = handler.handle(decrease_cmd()).await.unwrap();

        assert_eq!(status.remaining, 1);
        assert_eq!(repo.all_for_user(&user()).await[0].payment_count, 1);
    }

    #[tokio::test]
    async fn decrease_of_empty_balance_fails_unchanged() {
        let repo = InMemoryPaymentRepository::new();
        repo.insert(Payment::one_time(user(), 0, date(2024, 1, 1), None)).await;
        let handler =
            DecreaseOneTimePaymentHandler::new(Arc::new(repo.clone()), Arc::new(KeyedLocks::new()));

        assert!(matches!(
            handler.handle(decrease_cmd()).await,
            Err(PaymentError::InsufficientBalance(_))
        ));
        assert_eq!(repo.all_for_user(&user()).await[0].payment_count, 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Increase
    // ════════════════════════════════════════════════════════════════════════════

    fn increase_cmd(count: i32) -> IncreaseOneTimePaymentCommand {
        IncreaseOneTimePaymentCommand {
            user_id: user(),
            count,
            on: Some(date(2024, 3, 6)),
        }
    }

    #[tokio::test]
    async fn increase_disabled_is_policy_error() {
        let handler = IncreaseOneTimePaymentHandler::new(
            Arc::new(InMemoryPaymentRepository::new()),
            store("disabled").await,
            Arc::new(KeyedLocks::new()),
        );
        assert!(matches!(
            handler.handle(increase_cmd(1)).await,
            Err(PaymentError::PolicyDisabled(_))
        ));
    }

    #[tokio::test]
    async fn increase_creates_row_with_policy_end_date() {
        let repo = InMemoryPaymentRepository::new();
        let handler = IncreaseOneTimePaymentHandler::new(
            Arc::new(repo.clone()),
            store("periodical").await,
            Arc::new(KeyedLocks::new()),
        );

        let status = handler.handle(increase_cmd(3)).await.unwrap();

        assert_eq!(status.remaining, 3);
        // Two-week grid from Monday 2024-01-01: 2024-02-26 .. 2024-03-11
        assert_eq!(status.expires_on, Some(date(2024, 3, 11)));
        assert_eq!(repo.all_for_user(&user()).await.len(), 1);
    }

    #[tokio::test]
    async fn increase_adds_to_active_row() {
        let repo = InMemoryPaymentRepository::new();
        let existing = Payment::one_time(user(), 4, date(2024, 1, 1), None);
        repo.insert(existing.clone()).await;
        let handler = IncreaseOneTimePaymentHandler::new(
            Arc::new(repo.clone()),
            store("perpetual").await,
            Arc::new(KeyedLocks::new()),
        );

        let status = handler.handle(increase_cmd(2)).await.unwrap();

        assert_eq!(status.payment_id, existing.id);
        assert_eq!(status.remaining, 6);
        assert_eq!(repo.all_for_user(&user()).await.len(), 1);
    }

    #[tokio::test]
    async fn increase_without_active_row_respects_upcoming_row() {
        let repo = InMemoryPaymentRepository::new();
        let upcoming = Payment::one_time(user(), 5, date(2024, 4, 1), None);
        repo.insert(upcoming.clone()).await;
        let handler = IncreaseOneTimePaymentHandler::new(
            Arc::new(repo.clone()),
            store("perpetual").await,
            Arc::new(KeyedLocks::new()),
        );

        match handler.handle(increase_cmd(2)).await {
            Err(PaymentError::Conflict { existing }) => assert_eq!(existing.id, upcoming.id),
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(repo.all_for_user(&user()).await.len(), 1);
    }
}
