//! In-memory payment repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, UserId};
use crate::domain::payment::{Payment, PaymentType, PaymentWriteSet};
use crate::ports::PaymentRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<HashMap<PaymentId, Payment>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a row directly (useful for tests).
    pub async fn insert(&self, payment: Payment) {
        self.payments.write().await.insert(payment.id, payment);
    }

    /// All rows of a user, oldest first.
    pub async fn all_for_user(&self, user_id: &UserId) -> Vec<Payment> {
        let payments = self.payments.read().await;
        let mut rows: Vec<Payment> = payments
            .values()
            .filter(|p| &p.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|p| p.created);
        rows
    }

    async fn select<F>(&self, filter: F) -> Vec<Payment>
    where
        F: Fn(&Payment) -> bool,
    {
        let payments = self.payments.read().await;
        let mut rows: Vec<Payment> = payments.values().filter(|p| filter(p)).cloned().collect();
        rows.sort_by_key(|p| p.created);
        rows
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn find_by_id(&self, id: &PaymentId) -> Result<Option<Payment>, DomainError> {
        Ok(self.payments.read().await.get(id).cloned())
    }

    async fn find_active(
        &self,
        user_id: &UserId,
        payment_type: PaymentType,
        on: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError> {
        Ok(self
            .select(|p| {
                &p.user_id == user_id && p.payment_type == payment_type && p.is_active_on(on)
            })
            .await)
    }

    async fn find_overlapping(
        &self,
        user_id: &UserId,
        payment_type: PaymentType,
        start: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError> {
        Ok(self
            .select(|p| {
                &p.user_id == user_id
                    && p.payment_type == payment_type
                    && p.overlaps_from(start)
                    && !p.is_void()
            })
            .await)
    }

    async fn find_periodical_ending_on(
        &self,
        user_id: &UserId,
        end: NaiveDate,
    ) -> Result<Vec<Payment>, DomainError> {
        Ok(self
            .select(|p| {
                &p.user_id == user_id
                    && p.payment_type == PaymentType::Periodical
                    && p.end_date == Some(end)
            })
            .await)
    }

    async fn apply(&self, changes: &PaymentWriteSet) -> Result<(), DomainError> {
        let mut payments = self.payments.write().await;

        if let Some(missing) = changes.updates.iter().find(|p| !payments.contains_key(&p.id)) {
            return Err(DomainError::new(
                ErrorCode::PaymentNotFound,
                format!("Payment not found: {}", missing.id),
            ));
        }

        for payment in changes.updates.iter().chain(changes.inserts.iter()) {
            payments.insert(payment.id, payment.clone());
        }
        Ok(())
    }

    async fn reset_by_type(
        &self,
        payment_type: PaymentType,
        today: NaiveDate,
    ) -> Result<u64, DomainError> {
        let mut payments = self.payments.write().await;
        let mut touched = 0;
        for payment in payments.values_mut().filter(|p| p.payment_type == payment_type) {
            match payment_type {
                PaymentType::OneTime => payment.payment_count = 0,
                PaymentType::Periodical => {
                    if !payment.overlaps_from(today) {
                        continue;
                    }
                    payment.end_date = Some(today);
                }
            }
            touched += 1;
        }
        Ok(touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn user() -> UserId {
        UserId::new("diver-1").unwrap()
    }

    #[tokio::test]
    async fn apply_rejects_unknown_update_without_partial_writes() {
        let repo = InMemoryPaymentRepository::new();
        let stranger = Payment::one_time(user(), 1, date(2024, 1, 1), None);
        let fresh = Payment::one_time(user(), 2, date(2024, 1, 1), None);

        let result = repo
            .apply(&PaymentWriteSet::new().insert(fresh).update(stranger))
            .await;

        assert!(result.is_err());
        assert!(repo.all_for_user(&user()).await.is_empty());
    }

    #[tokio::test]
    async fn overlap_query_skips_void_rows() {
        let repo = InMemoryPaymentRepository::new();
        let mut folded = Payment::one_time(user(), 4, date(2024, 6, 1), Some(date(2024, 7, 1)));
        folded.close_as_merged(date(2024, 5, 10));
        let running = Payment::one_time(user(), 1, date(2024, 5, 1), Some(date(2024, 6, 1)));
        repo.insert(folded).await;
        repo.insert(running.clone()).await;

        let rows = repo
            .find_overlapping(&user(), PaymentType::OneTime, date(2024, 5, 1))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, running.id);
    }

    #[tokio::test]
    async fn reset_one_time_zeroes_counts() {
        let repo = InMemoryPaymentRepository::new();
        repo.insert(Payment::one_time(user(), 4, date(2024, 1, 1), None)).await;

        let touched = repo.reset_by_type(PaymentType::OneTime, date(2024, 6, 1)).await.unwrap();

        assert_eq!(touched, 1);
        assert_eq!(repo.all_for_user(&user()).await[0].payment_count, 0);
    }

    #[tokio::test]
    async fn reset_periodical_closes_running_windows_only() {
        let repo = InMemoryPaymentRepository::new();
        let mut ended = Payment::one_time(user(), 0, date(2023, 1, 1), Some(date(2023, 2, 1)));
        ended.payment_type = PaymentType::Periodical;
        let mut running = ended.clone();
        running.id = PaymentId::new();
        running.end_date = Some(date(2025, 1, 1));
        repo.insert(ended).await;
        repo.insert(running.clone()).await;

        let touched = repo
            .reset_by_type(PaymentType::Periodical, date(2024, 6, 1))
            .await
            .unwrap();

        assert_eq!(touched, 1);
        let stored = repo.find_by_id(&running.id).await.unwrap().unwrap();
        assert_eq!(stored.end_date, Some(date(2024, 6, 1)));
    }
}
