//! Request and response bodies for payment endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::PaymentId;
use crate::domain::payment::PaymentType;

/// `?on=YYYY-MM-DD` override for date-sensitive reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OnDateParams {
    pub on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPaymentTypeResponse {
    /// `None` when the caller holds no usable payment.
    pub payment_type: Option<PaymentType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveOneTimePaymentRequest {
    pub user_id: String,
    pub count: i32,
    /// Top up this row instead of inserting.
    #[serde(default)]
    pub payment_id: Option<PaymentId>,
    #[serde(default)]
    pub issued_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavePeriodPaymentRequest {
    pub user_id: String,
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IncreaseBalanceRequest {
    pub user_id: String,
    pub count: i32,
    #[serde(default)]
    pub on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecreaseBalanceRequest {
    pub user_id: String,
    #[serde(default)]
    pub on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPaymentsRequest {
    pub payment_type: PaymentType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_time_request_defaults_optional_fields() {
        let req: SaveOneTimePaymentRequest =
            serde_json::from_str(r#"{"user_id":"diver-1","count":5}"#).unwrap();
        assert_eq!(req.count, 5);
        assert!(req.payment_id.is_none());
        assert!(req.issued_on.is_none());
    }

    #[test]
    fn reset_request_uses_snake_case_type() {
        let req: ResetPaymentsRequest =
            serde_json::from_str(r#"{"payment_type":"one_time"}"#).unwrap();
        assert_eq!(req.payment_type, PaymentType::OneTime);
    }
}
