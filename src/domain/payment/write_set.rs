//! Batched row changes produced by a single ledger operation.

use super::Payment;

/// Rows to insert and update together. Adapters apply a write set atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentWriteSet {
    pub inserts: Vec<Payment>,
    pub updates: Vec<Payment>,
}

impl PaymentWriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(mut self, payment: Payment) -> Self {
        self.inserts.push(payment);
        self
    }

    pub fn update(mut self, payment: Payment) -> Self {
        self.updates.push(payment);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty()
    }
}
