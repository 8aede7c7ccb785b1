//! HTTP handlers for payment endpoints.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::payment::{
    DecreaseOneTimePaymentCommand, GetActivePaymentsQuery, IncreaseOneTimePaymentCommand,
    ResetPaymentsCommand, ResolvePaymentTypeQuery, SaveOneTimeOutcome,
    SaveOneTimePaymentCommand, SavePeriodOutcome, SavePeriodPaymentCommand,
};

use super::dto::{
    BestPaymentTypeResponse, DecreaseBalanceRequest, IncreaseBalanceRequest, OnDateParams,
    ResetPaymentsRequest, SaveOneTimePaymentRequest, SavePeriodPaymentRequest,
};
use crate::adapters::http::extract::{parse_user_id, AuthenticatedUser};
use crate::adapters::http::{ApiError, AppState};

/// GET /api/payments - Active payments of the caller
pub async fn get_active_payments(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<OnDateParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetActivePaymentsQuery {
        user_id: user.user_id,
        on: params.on,
    };
    let payments = state.active_payments_handler().handle(query).await?;
    Ok(Json(payments))
}

/// GET /api/payments/best-type - Payment type a subscription would consume
pub async fn get_best_payment_type(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<OnDateParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = ResolvePaymentTypeQuery {
        user_id: user.user_id,
        on: params.on,
    };
    let payment_type = state.payment_type_handler().handle(query).await?;
    Ok(Json(BestPaymentTypeResponse { payment_type }))
}

/// POST /api/admin/payments/one-time
pub async fn save_one_time_payment(
    State(state): State<AppState>,
    _admin: AuthenticatedUser,
    Json(request): Json<SaveOneTimePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SaveOneTimePaymentCommand {
        user_id: parse_user_id("user_id", &request.user_id)?,
        count: request.count,
        payment_id: request.payment_id,
        issued_on: request.issued_on,
    };
    let result = state.save_one_time_handler().handle(cmd).await?;
    let status = match result.outcome {
        SaveOneTimeOutcome::Created => StatusCode::CREATED,
        _ => StatusCode::OK,
    };
    Ok((status, Json(result)))
}

/// POST /api/admin/payments/periodical
pub async fn save_period_payment(
    State(state): State<AppState>,
    _admin: AuthenticatedUser,
    Json(request): Json<SavePeriodPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SavePeriodPaymentCommand {
        user_id: parse_user_id("user_id", &request.user_id)?,
        reference_date: request.reference_date,
    };
    let result = state.save_period_handler().handle(cmd).await?;
    let status = match result.outcome {
        SavePeriodOutcome::Created => StatusCode::CREATED,
        _ => StatusCode::OK,
    };
    Ok((status, Json(result)))
}

/// POST /api/admin/payments/one-time/increase
pub async fn increase_one_time_payment(
    State(state): State<AppState>,
    _admin: AuthenticatedUser,
    Json(request): Json<IncreaseBalanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = IncreaseOneTimePaymentCommand {
        user_id: parse_user_id("user_id", &request.user_id)?,
        count: request.count,
        on: request.on,
    };
    let status = state.increase_handler().handle(cmd).await?;
    Ok(Json(status))
}

/// POST /api/admin/payments/one-time/decrease
pub async fn decrease_one_time_payment(
    State(state): State<AppState>,
    _admin: AuthenticatedUser,
    Json(request): Json<DecreaseBalanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = DecreaseOneTimePaymentCommand {
        user_id: parse_user_id("user_id", &request.user_id)?,
        on: request.on,
    };
    let status = state.decrease_handler().handle(cmd).await?;
    Ok(Json(status))
}

/// POST /api/admin/payments/reset
///
/// Always 200; the body's `reset` flag reports failure.
pub async fn reset_payments(
    State(state): State<AppState>,
    _admin: AuthenticatedUser,
    Json(request): Json<ResetPaymentsRequest>,
) -> impl IntoResponse {
    let cmd = ResetPaymentsCommand {
        payment_type: request.payment_type,
        today: None,
    };
    Json(state.reset_handler().handle(cmd).await)
}
