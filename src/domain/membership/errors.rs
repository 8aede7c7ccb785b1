//! Membership-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound / NotFoundForUser | 404 |
//! | Conflict | 409 |
//! | InvalidState | 409 |
//! | ValidationFailed | 400 |
//! | Configuration | 500 |
//! | Infrastructure | 500 |

use crate::domain::configuration::ConfigurationError;
use crate::domain::foundation::{DomainError, ErrorCode, MembershipId, UserId};
use crate::domain::period::PeriodError;

use super::Membership;

/// Membership-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MembershipError {
    /// Membership was not found.
    NotFound(MembershipId),

    /// No active membership exists for this user.
    NotFoundForUser(UserId),

    /// The new period overlaps the user's current membership.
    Conflict { existing: Box<Membership> },

    /// Invalid state for the requested operation.
    InvalidState { current: String, attempted: String },

    /// Validation failed.
    ValidationFailed { field: String, message: String },

    /// Membership period grid is missing or malformed.
    Configuration(String),

    /// Infrastructure error.
    Infrastructure(String),
}

impl MembershipError {
    pub fn not_found(id: MembershipId) -> Self {
        MembershipError::NotFound(id)
    }

    pub fn not_found_for_user(user_id: UserId) -> Self {
        MembershipError::NotFoundForUser(user_id)
    }

    pub fn conflict(existing: Membership) -> Self {
        MembershipError::Conflict {
            existing: Box::new(existing),
        }
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        MembershipError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MembershipError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        MembershipError::Configuration(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MembershipError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MembershipError::NotFound(_) | MembershipError::NotFoundForUser(_) => {
                ErrorCode::MembershipNotFound
            }
            MembershipError::Conflict { .. } => ErrorCode::MembershipConflict,
            MembershipError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            MembershipError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MembershipError::Configuration(_) => ErrorCode::InvalidConfiguration,
            MembershipError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            MembershipError::NotFound(id) => format!("Membership not found: {}", id),
            MembershipError::NotFoundForUser(user_id) => {
                format!("No active membership found for user: {}", user_id)
            }
            MembershipError::Conflict { existing } => format!(
                "User {} already holds membership {} until {}",
                existing.user_id, existing.id, existing.end_date
            ),
            MembershipError::InvalidState { current, attempted } => {
                format!("Cannot {} membership in {} state", attempted, current)
            }
            MembershipError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MembershipError::Configuration(msg) => format!("Configuration error: {}", msg),
            MembershipError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MembershipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MembershipError {}

impl From<DomainError> for MembershipError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => MembershipError::ValidationFailed {
                field: "unknown".to_string(),
                message: err.to_string(),
            },
            ErrorCode::InvalidStateTransition => MembershipError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.to_string(),
            },
            _ => MembershipError::Infrastructure(err.to_string()),
        }
    }
}

impl From<ConfigurationError> for MembershipError {
    fn from(err: ConfigurationError) -> Self {
        MembershipError::Configuration(err.to_string())
    }
}

impl From<PeriodError> for MembershipError {
    fn from(err: PeriodError) -> Self {
        MembershipError::Configuration(err.to_string())
    }
}

impl From<MembershipError> for DomainError {
    fn from(err: MembershipError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
