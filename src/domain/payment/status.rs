//! Balance summary returned after credit changes.

use chrono::NaiveDate;
use serde::Serialize;

use super::PaymentType;
use crate::domain::foundation::PaymentId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentStatus {
    pub payment_id: PaymentId,
    pub payment_type: PaymentType,
    /// Remaining credits (ONE_TIME only).
    pub remaining: i32,
    pub expires_on: Option<NaiveDate>,
}
