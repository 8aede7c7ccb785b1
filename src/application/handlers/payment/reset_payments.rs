//! ResetPaymentsHandler - Bulk rollover of every payment of one type.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::payment::PaymentType;
use crate::ports::PaymentRepository;

#[derive(Debug, Clone)]
pub struct ResetPaymentsCommand {
    pub payment_type: PaymentType,
    /// Defaults to today.
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetPaymentsResult {
    pub reset: bool,
    pub rows_affected: u64,
}

/// Failures are reported through `reset == false`, never as an error.
pub struct ResetPaymentsHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl ResetPaymentsHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, cmd: ResetPaymentsCommand) -> ResetPaymentsResult {
        let today = cmd.today.unwrap_or_else(|| Timestamp::now().date());

        match self.payments.reset_by_type(cmd.payment_type, today).await {
            Ok(rows_affected) => {
                tracing::info!("Reset {} {} payments", rows_affected, cmd.payment_type);
                ResetPaymentsResult {
                    reset: true,
                    rows_affected,
                }
            }
            Err(e) => {
                tracing::warn!("Reset of {} payments failed: {}", cmd.payment_type, e);
                ResetPaymentsResult {
                    reset: false,
                    rows_affected: 0,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPaymentRepository;
    use crate::domain::foundation::{DomainError, PaymentId, UserId};
    use crate::domain::payment::{Payment, PaymentWriteSet};
    use async_trait::async_trait;

    struct FailingPaymentRepository;

    #[async_trait]
    impl PaymentRepository for FailingPaymentRepository {
        async fn find_by_id(&self, _id: &PaymentId) -> Result<Option<Payment>, DomainError> {
            Ok(None)
        }

        async fn find_active(
            &self,
            _user_id: &UserId,
            _payment_type: PaymentType,
            _on: NaiveDate,
        ) -> Result<Vec<Payment>, DomainError> {
            Ok(Vec::new())
        }

        async fn find_overlapping(
            &self,
            _user_id: &UserId,
            _payment_type: PaymentType,
            _start: NaiveDate,
        ) -> Result<Vec<Payment>, DomainError> {
            Ok(Vec::new())
        }

        async fn find_periodical_ending_on(
            &self,
            _user_id: &UserId,
            _end: NaiveDate,
        ) -> Result<Vec<Payment>, DomainError> {
            Ok(Vec::new())
        }

        async fn apply(&self, _changes: &PaymentWriteSet) -> Result<(), DomainError> {
            Ok(())
        }

        async fn reset_by_type(
            &self,
            _payment_type: PaymentType,
            _today: NaiveDate,
        ) -> Result<u64, DomainError> {
            Err(DomainError::database("Simulated reset failure"))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn failure_is_reported_as_flag() {
        let handler = ResetPaymentsHandler::new(Arc::new(FailingPaymentRepository));
        let result = handler
            .handle(ResetPaymentsCommand {
                payment_type: PaymentType::OneTime,
                today: None,
            })
            .await;
        assert_eq!(
            result,
            ResetPaymentsResult {
                reset: false,
                rows_affected: 0
            }
        );
    }

    #[tokio::test]
    async fn success_reports_rows_affected() {
        let repo = InMemoryPaymentRepository::new();
        let user = UserId::new("diver-1").unwrap();
        repo.insert(Payment::one_time(user.clone(), 3, date(2024, 1, 1), None)).await;
        repo.insert(Payment::one_time(user.clone(), 1, date(2023, 1, 1), Some(date(2023, 6, 1))))
            .await;

        let handler = ResetPaymentsHandler::new(Arc::new(repo.clone()));
        let result = handler
            .handle(ResetPaymentsCommand {
                payment_type: PaymentType::OneTime,
                today: Some(date(2024, 6, 1)),
            })
            .await;

        assert!(result.reset);
        assert_eq!(result.rows_affected, 2);
        assert!(repo
            .all_for_user(&user)
            .await
            .iter()
            .all(|p| p.payment_count == 0));
    }
}
