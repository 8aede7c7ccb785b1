//! SaveOneTimePaymentHandler - Command handler issuing one-time credits.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::application::{ConfigurationStore, KeyedLocks};
use crate::domain::foundation::{PaymentId, Timestamp, UserId};
use crate::domain::payment::{ExpirationPolicy, Payment, PaymentError, PaymentType, PaymentWriteSet};
use crate::ports::PaymentRepository;

use super::policy::{one_time_window, require_enabled};

#[derive(Debug, Clone)]
pub struct SaveOneTimePaymentCommand {
    pub user_id: UserId,
    pub count: i32,
    /// Existing active row to overwrite instead of issuing new credits.
    pub payment_id: Option<PaymentId>,
    /// Defaults to today.
    pub issued_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOneTimeOutcome {
    Created,
    /// The named row got the new count and a recomputed end date.
    Updated,
    /// Credits were added to the user's perpetual row.
    Merged,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaveOneTimePaymentResult {
    pub payment: Payment,
    pub outcome: SaveOneTimeOutcome,
}

pub struct SaveOneTimePaymentHandler {
    payments: Arc<dyn PaymentRepository>,
    config: Arc<ConfigurationStore>,
    locks: Arc<KeyedLocks<UserId>>,
}

impl SaveOneTimePaymentHandler {
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
        cmd: SaveOneTimePaymentCommand,
    ) -> Result<SaveOneTimePaymentResult, PaymentError> {
        if cmd.count <= 0 {
            return Err(PaymentError::validation("count", "must be positive"));
        }

        let _guard = self.locks.lock(&cmd.user_id).await;
        let today = cmd.issued_on.unwrap_or_else(|| Timestamp::now().date());
        let snapshot = self.config.snapshot();

        // 1. Policy gate
        let policy = require_enabled(&snapshot)?;

        // 2. Overwrite of a named active row
        if let Some(id) = cmd.payment_id {
            if let Some(mut payment) = self.payments.find_by_id(&id).await? {
                if payment.user_id == cmd.user_id
                    && payment.payment_type == PaymentType::OneTime
                    && payment.is_active_on(today)
                {
                    let window = one_time_window(&snapshot, policy, today)?;
                    payment.payment_count = cmd.count;
                    payment.end_date = window.end_date;

                    let from = payment.start_date.unwrap_or(today);
                    if let Some(existing) = self
                        .payments
                        .find_overlapping(&cmd.user_id, PaymentType::OneTime, from)
                        .await?
                        .into_iter()
                        .find(|other| other.id != payment.id && payment.collides_with(other))
                    {
                        tracing::debug!(
                            "Payment {} would overlap one-time payment {}",
                            payment.id,
                            existing.id
                        );
                        return Err(PaymentError::conflict(existing));
                    }

                    self.payments
                        .apply(&PaymentWriteSet::new().update(payment.clone()))
                        .await?;
                    tracing::info!("Updated one-time payment {}", payment.id);
                    return Ok(SaveOneTimePaymentResult {
                        payment,
                        outcome: SaveOneTimeOutcome::Updated,
                    });
                }
            }
            tracing::debug!("Payment {} is not an active one-time row, issuing new credits", id);
        }

        // 3. Perpetual credits accumulate in one row
        if policy == ExpirationPolicy::Perpetual {
            return self.merge_perpetual(&cmd.user_id, cmd.count, today).await;
        }

        // 4. Windowed credits
        let window = one_time_window(&snapshot, policy, today)?;
        let overlapping = self
            .payments
            .find_overlapping(&cmd.user_id, PaymentType::OneTime, window.start_date)
            .await?;
        if let Some(existing) = overlapping.into_iter().next() {
            tracing::debug!(
                "One-time payment {} already covers {}",
                existing.id,
                window.start_date
            );
            return Err(PaymentError::conflict(existing));
        }

        let payment = Payment::one_time(
            cmd.user_id,
            cmd.count,
            window.start_date,
            window.end_date,
        );
        self.payments
            .apply(&PaymentWriteSet::new().insert(payment.clone()))
            .await?;
        tracing::info!("Created one-time payment {} ({} credits)", payment.id, payment.payment_count);

        Ok(SaveOneTimePaymentResult {
            payment,
            outcome: SaveOneTimeOutcome::Created,
        })
    }

    async fn merge_perpetual(
        &self,
        user_id: &UserId,
        count: i32,
        today: NaiveDate,
    ) -> Result<SaveOneTimePaymentResult, PaymentError> {
        let mut running = self
            .payments
            .find_overlapping(user_id, PaymentType::OneTime, today)
            .await?;

        if running.is_empty() {
            let payment = Payment::one_time(user_id.clone(), count, today, None);
            self.payments
                .apply(&PaymentWriteSet::new().insert(payment.clone()))
                .await?;
            tracing::info!("Created perpetual payment {} for {}", payment.id, user_id);
            return Ok(SaveOneTimePaymentResult {
                payment,
                outcome: SaveOneTimeOutcome::Created,
            });
        }

        // Row active today first, then the oldest perpetual one, then the oldest
        let primary_at = running
            .iter()
            .position(|p| p.is_active_on(today))
            .or_else(|| running.iter().position(Payment::is_perpetual))
            .unwrap_or(0);
        let mut primary = running.remove(primary_at);
        let rows = running.into_iter();

        primary.add_credits(count);
        let mut changes = PaymentWriteSet::new();
        for mut duplicate in rows {
            tracing::debug!(
                "Folding duplicate one-time payment {} into {}",
                duplicate.id,
                primary.id
            );
            primary.add_credits(duplicate.payment_count);
            duplicate.close_as_merged(today);
            changes = changes.update(duplicate);
        }
        changes = changes.update(primary.clone());
        self.payments.apply(&changes).await?;

        tracing::info!(
            "Merged credits into one-time payment {}, balance {}",
            primary.id,
            primary.payment_count
        );
        Ok(SaveOneTimePaymentResult {
            payment: primary,
            outcome: SaveOneTimeOutcome::Merged,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryConfigurationRepository, InMemoryPaymentRepository};
    use crate::domain::configuration::ConfigurationSetting;
    use crate::ports::PaymentRepository;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user() -> UserId {
        UserId::new("diver-1").unwrap()
    }

    async fn handler(
        policy: &str,
    ) -> (SaveOneTimePaymentHandler, InMemoryPaymentRepository) {
        let config = InMemoryConfigurationRepository::new(vec![
            ConfigurationSetting::new("payment", "one-time-expiration", policy),
            ConfigurationSetting::new("payment", "unit", "months"),
            ConfigurationSetting::new("payment", "period-length", "1"),
            ConfigurationSetting::new("payment", "period-start-date", "2024-01-01"),
            ConfigurationSetting::new("payment", "period-start-point", "1"),
        ]);
        let store = ConfigurationStore::load(Arc::new(config)).await.unwrap();
        let repo = InMemoryPaymentRepository::new();
        let handler = SaveOneTimePaymentHandler::new(
            Arc::new(repo.clone()),
            Arc::new(store),
            Arc::new(KeyedLocks::new()),
        );
        (handler, repo)
    }

    fn cmd(count: i32) -> SaveOneTimePaymentCommand {
        SaveOneTimePaymentCommand {
            user_id: user(),
            count,
            payment_id: None,
            issued_on: Some(date(2024, 5, 10)),
        }
    }

    #[tokio::test]
    async fn disabled_policy_rejects() {
        let (handler, repo) = handler("disabled").await;
        let result = handler.handle(cmd(3)).await;
        assert!(matches!(result, Err(PaymentError::PolicyDisabled(_))));
        assert!(repo.all_for_user(&user()).await.is_empty());
    }

    #[tokio::test]
    async fn non_positive_count_rejected() {
        let (handler, _) = handler("perpetual").await;
        assert!(matches!(
            handler.handle(cmd(0)).await,
            Err(PaymentError::ValidationFailed { .. })
        ));
    }

    #[tokio::test]
    async fn perpetual_credits_accumulate() {
        let (handler, repo) = handler("perpetual").await;

        let first = handler.handle(cmd(3)).await.unwrap();
        assert_eq!(first.outcome, SaveOneTimeOutcome::Created);
        let second = handler.handle(cmd(2)).await.unwrap();
        assert_eq!(second.outcome, SaveOneTimeOutcome::Merged);

        let rows = repo.all_for_user(&user()).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].payment_count, 5);
        assert!(rows[0].is_perpetual());
    }

    #[tokio::test]
    async fn perpetual_duplicates_are_folded_and_closed() {
        let (handler, repo) = handler("perpetual").await;
        let oldest = Payment::one_time(user(), 1, date(2024, 1, 1), None);
        let mut duplicate = Payment::one_time(user(), 4, date(2024, 2, 1), None);
        duplicate.created = oldest.created.add_hours(1);
        repo.insert(oldest.clone()).await;
        repo.insert(duplicate.clone()).await;

        let result = handler.handle(cmd(2)).await.unwrap();

        assert_eq!(result.payment.id, oldest.id);
        assert_eq!(result.payment.payment_count, 7);
        let closed = repo.find_by_id(&duplicate.id).await.unwrap().unwrap();
        assert_eq!(closed.payment_count, 0);
        assert_eq!(closed.end_date, Some(date(2024, 5, 10)));
    }

    #[tokio::test]
    async fn periodical_policy_conflicts_with_covering_row() {
        let (handler, repo) = handler("periodical").await;

        let created = handler.handle(cmd(3)).await.unwrap();
        assert_eq!(created.payment.start_date, Some(date(2024, 5, 1)));
        assert_eq!(created.payment.end_date, Some(date(2024, 6, 1)));

        let again = handler.handle(cmd(1)).await;
        match again {
            Err(PaymentError::Conflict { existing }) => assert_eq!(existing.id, created.payment.id),
            other => panic!("expected conflict, got {:?}", other),
        }
        assert_eq!(repo.all_for_user(&user()).await.len(), 1);
    }

    #[tokio::test]
    async fn durational_policy_starts_on_issue_date() {
        let (handler, _) = handler("durational").await;
        let result = handler.handle(cmd(2)).await.unwrap();
        assert_eq!(result.payment.start_date, Some(date(2024, 5, 10)));
        assert_eq!(result.payment.end_date, Some(date(2024, 6, 10)));
    }

    #[tokio::test]
    async fn named_active_row_is_updated_in_place() {
        let (handler, repo) = handler("durational").await;
        let existing = Payment::one_time(user(), 9, date(2024, 5, 1), Some(date(2024, 5, 20)));
        repo.insert(existing.clone()).await;

        let result = handler
            .handle(SaveOneTimePaymentCommand {
                payment_id: Some(existing.id),
                ..cmd(4)
            })
            .await
            .unwrap();

        assert_eq!(result.outcome, SaveOneTimeOutcome::Updated);
        assert_eq!(result.payment.id, existing.id);
        assert_eq!(result.payment.payment_count, 4);
        assert_eq!(result.payment.end_date, Some(date(2024, 6, 10)));
        assert_eq!(repo.all_for_user(&user()).await.len(), 1);
    }

    #[tokio::test]
    async fn perpetual_credits_merge_into_running_windowed_row() {
        let (handler, repo) = handler("perpetual").await;
        let windowed = Payment::one_time(user(), 3, date(2024, 5, 1), Some(date(2025, 5, 1)));
        repo.insert(windowed.clone()).await;

        let result = handler.handle(cmd(2)).await.unwrap();

        assert_eq!(result.outcome, SaveOneTimeOutcome::Merged);
        assert_eq!(result.payment.id, windowed.id);
        assert_eq!(result.payment.payment_count, 5);
        let rows = repo.all_for_user(&user()).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(
            repo.find_active(&user(), PaymentType::OneTime, date(2024, 5, 10))
                .await
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn perpetual_merge_folds_future_windowed_row() {
        let (handler, repo) = handler("perpetual").await;
        let current = Payment::one_time(user(), 1, date(2024, 5, 1), Some(date(2024, 6, 1)));
        let mut upcoming = Payment::one_time(user(), 4, date(2024, 6, 1), Some(date(2024, 7, 1)));
        upcoming.created = current.created.add_hours(1);
        repo.insert(current.clone()).await;
        repo.insert(upcoming.clone()).await;

        let result = handler.handle(cmd(2)).await.unwrap();

        assert_eq!(result.payment.id, current.id);
        assert_eq!(result.payment.payment_count, 7);
        let folded = repo.find_by_id(&upcoming.id).await.unwrap().unwrap();
        assert_eq!(folded.payment_count, 0);
        assert!(!folded.is_active_on(date(2024, 6, 15)));
    }

    #[tokio::test]
    async fn named_row_update_conflicts_with_other_running_row() {
        let (handler, repo) = handler("perpetual").await;
        let named = Payment::one_time(user(), 2, date(2024, 5, 1), Some(date(2024, 5, 20)));
        let mut later = Payment::one_time(user(), 6, date(2024, 5, 20), None);
        later.created = named.created.add_hours(1);
        repo.insert(named.clone()).await;
        repo.insert(later.clone()).await;

        let result = handler
            .handle(SaveOneTimePaymentCommand {
                payment_id: Some(named.id),
                ..cmd(4)
            })
            .await;

        match result {
            Err(PaymentError::Conflict { existing }) => assert_eq!(existing.id, later.id),
            other => panic!("expected conflict, got {:?}", other),
        }
        let stored = repo.find_by_id(&named.id).await.unwrap().unwrap();
        assert_eq!(stored.payment_count, 2);
        assert_eq!(stored.end_date, Some(date(2024, 5, 20)));
    }
}
