//! Payment ledger error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / NoActivePayment | 404 |
//! | PolicyDisabled | 403 |
//! | Conflict | 409 |
//! | InsufficientBalance | 409 |
//! | ValidationFailed | 400 |
//! | Configuration | 500 |
//! | Infrastructure | 500 |

use crate::domain::configuration::ConfigurationError;
use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, UserId};
use crate::domain::period::PeriodError;

use super::{Payment, PaymentType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Payment row was not found.
    NotFound(PaymentId),

    /// User has no active payment of the given type.
    NoActivePayment {
        user_id: UserId,
        payment_type: PaymentType,
    },

    /// The configured expiration policy does not allow the operation.
    PolicyDisabled(String),

    /// A new payment window overlaps an existing row.
    Conflict { existing: Box<Payment> },

    /// No credits left to consume.
    InsufficientBalance(PaymentId),

    ValidationFailed { field: String, message: String },

    /// Settings needed by the ledger are missing or malformed.
    Configuration(String),

    Infrastructure(String),
}

impl PaymentError {
    pub fn not_found(id: PaymentId) -> Self {
        PaymentError::NotFound(id)
    }

    pub fn no_active_payment(user_id: UserId, payment_type: PaymentType) -> Self {
        PaymentError::NoActivePayment {
            user_id,
            payment_type,
        }
    }

    pub fn policy_disabled(reason: impl Into<String>) -> Self {
        PaymentError::PolicyDisabled(reason.into())
    }

    pub fn conflict(existing: Payment) -> Self {
        PaymentError::Conflict {
            existing: Box::new(existing),
        }
    }

    pub fn insufficient_balance(id: PaymentId) -> Self {
        PaymentError::InsufficientBalance(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        PaymentError::Configuration(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::NotFound(_) | PaymentError::NoActivePayment { .. } => {
                ErrorCode::PaymentNotFound
            }
            PaymentError::PolicyDisabled(_) => ErrorCode::PolicyDisabled,
            PaymentError::Conflict { .. } => ErrorCode::PaymentConflict,
            PaymentError::InsufficientBalance(_) => ErrorCode::InsufficientBalance,
            PaymentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            PaymentError::Configuration(_) => ErrorCode::InvalidConfiguration,
            PaymentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            PaymentError::NotFound(id) => format!("Payment not found: {}", id),
            PaymentError::NoActivePayment {
                user_id,
                payment_type,
            } => format!(
                "No active {} payment for user {}",
                payment_type, user_id
            ),
            PaymentError::PolicyDisabled(reason) => format!("Not allowed: {}", reason),
            PaymentError::Conflict { existing } => format!(
                "Overlaps existing payment {} ({} to {})",
                existing.id,
                existing
                    .start_date
                    .map_or_else(|| "-".to_string(), |d| d.to_string()),
                existing
                    .end_date
                    .map_or_else(|| "open".to_string(), |d| d.to_string()),
            ),
            PaymentError::InsufficientBalance(id) => {
                format!("Payment {} has no credits left", id)
            }
            PaymentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            PaymentError::Configuration(msg) => format!("Configuration error: {}", msg),
            PaymentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PaymentError {}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => PaymentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::InvalidConfiguration | ErrorCode::ConfigurationNotFound => {
                PaymentError::Configuration(err.message)
            }
            _ => PaymentError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ConfigurationError> for PaymentError {
    fn from(err: ConfigurationError) -> Self {
        PaymentError::Configuration(err.to_string())
    }
}

impl From<PeriodError> for PaymentError {
    fn from(err: PeriodError) -> Self {
        PaymentError::Configuration(err.to_string())
    }
}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
