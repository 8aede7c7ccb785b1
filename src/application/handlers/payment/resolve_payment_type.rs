//! ResolvePaymentTypeHandler - Query handler picking the payment that covers a user.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::payment::{PaymentError, PaymentType};
use crate::ports::PaymentRepository;

#[derive(Debug, Clone)]
pub struct ResolvePaymentTypeQuery {
    pub user_id: UserId,
    /// Defaults to today.
    pub on: Option<NaiveDate>,
}

/// Resolves the best available payment type of a user.
///
/// PERIODICAL wins over ONE_TIME. A ONE_TIME row counts as available even
/// when its balance is zero.
pub struct ResolvePaymentTypeHandler {
    payments: Arc<dyn PaymentRepository>,
}

impl ResolvePaymentTypeHandler {
    pub fn new(payments: Arc<dyn PaymentRepository>) -> Self {
        Self { payments }
    }

    pub async fn handle(
        &self,
        query: ResolvePaymentTypeQuery,
    ) -> Result<Option<PaymentType>, PaymentError> {
        let on = query.on.unwrap_or_else(|| Timestamp::now().date());

        for payment_type in [PaymentType::Periodical, PaymentType::OneTime] {
            let active = self
                .payments
                .find_active(&query.user_id, payment_type, on)
                .await?;
            if !active.is_empty() {
                return Ok(Some(payment_type));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryPaymentRepository;
    use crate::domain::payment::Payment;
    use crate::domain::period::PeriodResult;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user() -> UserId {
        UserId::new("diver-1").unwrap()
    }

    fn query() -> ResolvePaymentTypeQuery {
        ResolvePaymentTypeQuery {
            user_id: user(),
            on: Some(date(2024, 6, 1)),
        }
    }

    #[tokio::test]
    async fn no_payments_resolves_to_none() {
        let handler = ResolvePaymentTypeHandler::new(Arc::new(InMemoryPaymentRepository::new()));
        assert_eq!(handler.handle(query()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn periodical_beats_one_time() {
        let repo = InMemoryPaymentRepository::new();
        repo.insert(Payment::one_time(user(), 5, date(2024, 1, 1), None)).await;
        repo.insert(Payment::periodical(
            user(),
            PeriodResult {
                start_date: date(2024, 1, 1),
                end_date: date(2025, 1, 1),
            },
        ))
        .await;

        let handler = ResolvePaymentTypeHandler::new(Arc::new(repo));
        assert_eq!(handler.handle(query()).await.unwrap(), Some(PaymentType::Periodical));
    }

    #[tokio::test]
    async fn empty_perpetual_balance_still_counts() {
        let repo = InMemoryPaymentRepository::new();
        repo.insert(Payment::one_time(user(), 0, date(2024, 1, 1), None)).await;

        let handler = ResolvePaymentTypeHandler::new(Arc::new(repo));
        assert_eq!(handler.handle(query()).await.unwrap(), Some(PaymentType::OneTime));
    }

    #[tokio::test]
    async fn expired_rows_are_ignored() {
        let repo = InMemoryPaymentRepository::new();
        repo.insert(Payment::one_time(user(), 3, date(2024, 1, 1), Some(date(2024, 6, 1))))
            .await;

        let handler = ResolvePaymentTypeHandler::new(Arc::new(repo));
        assert_eq!(handler.handle(query()).await.unwrap(), None);
    }
}
