//! Error to HTTP response mapping.
//!
//! | Error kind | HTTP Status |
//! |------------|-------------|
//! | Not found | 404 |
//! | Policy disabled | 403 |
//! | Conflict (body carries `existing`) | 409 |
//! | Invalid state / full / duplicate | 409 |
//! | Validation | 400 |
//! | Configuration / infrastructure | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::event::EventError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::membership::MembershipError;
use crate::domain::payment::PaymentError;

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// The record a conflicting request collided with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            existing: None,
        }
    }

    /// Attaches the conflicting record.
    pub fn with_existing<T: Serialize>(mut self, existing: &T) -> Self {
        self.existing = serde_json::to_value(existing).ok();
        self
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    pub fn bad_request(field: &str, message: impl std::fmt::Display) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(
                ErrorCode::ValidationFailed.to_string(),
                format!("{}: {}", field, message),
            ),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("Request failed: {} {}", self.body.code, self.body.message);
        }
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), err.to_string()),
        )
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        let status = match &err {
            PaymentError::NotFound(_) | PaymentError::NoActivePayment { .. } => {
                StatusCode::NOT_FOUND
            }
            PaymentError::PolicyDisabled(_) => StatusCode::FORBIDDEN,
            PaymentError::Conflict { .. } | PaymentError::InsufficientBalance(_) => {
                StatusCode::CONFLICT
            }
            PaymentError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            PaymentError::Configuration(_) | PaymentError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let mut body = ErrorResponse::new(err.code().to_string(), err.message());
        if let PaymentError::Conflict { existing } = &err {
            body = body.with_existing(existing.as_ref());
        }
        Self::new(status, body)
    }
}

impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        let status = match &err {
            EventError::NotFound(_) | EventError::ParticipantNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            EventError::AlreadyParticipant { .. }
            | EventError::EventFull { .. }
            | EventError::AlreadyCancelled(_)
            | EventError::InvalidState { .. }
            | EventError::OrganizerNotRemovable { .. } => StatusCode::CONFLICT,
            EventError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            EventError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, ErrorResponse::new(err.code().to_string(), err.message()))
    }
}

impl From<MembershipError> for ApiError {
    fn from(err: MembershipError) -> Self {
        let status = match &err {
            MembershipError::NotFound(_) | MembershipError::NotFoundForUser(_) => {
                StatusCode::NOT_FOUND
            }
            MembershipError::Conflict { .. } | MembershipError::InvalidState { .. } => {
                StatusCode::CONFLICT
            }
            MembershipError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            MembershipError::Configuration(_) | MembershipError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let mut body = ErrorResponse::new(err.code().to_string(), err.message());
        if let MembershipError::Conflict { existing } = &err {
            body = body.with_existing(existing.as_ref());
        }
        Self::new(status, body)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let status = match err.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::PaymentNotFound
            | ErrorCode::EventNotFound
            | ErrorCode::ParticipantNotFound
            | ErrorCode::MembershipNotFound
            | ErrorCode::ConfigurationNotFound => StatusCode::NOT_FOUND,
            ErrorCode::PolicyDisabled => StatusCode::FORBIDDEN,
            ErrorCode::PaymentConflict
            | ErrorCode::MembershipConflict
            | ErrorCode::InsufficientBalance
            | ErrorCode::InvalidStateTransition
            | ErrorCode::EventFull
            | ErrorCode::AlreadyParticipant => StatusCode::CONFLICT,
            ErrorCode::InvalidConfiguration
            | ErrorCode::DatabaseError
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, ErrorResponse::new(err.code.to_string(), err.message))
    }
}
