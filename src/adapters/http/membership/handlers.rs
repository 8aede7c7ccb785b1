//! HTTP handlers for membership endpoints.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::membership::{
    CancelMembershipCommand, CreateMembershipCommand, ExpireMembershipsCommand,
    GetMembershipQuery,
};

use super::dto::{CreateMembershipRequest, ExpireMembershipsParams};
use crate::adapters::http::extract::{parse_user_id, AuthenticatedUser};
use crate::adapters::http::{ApiError, AppState};

/// GET /api/memberships - Caller's membership active today
pub async fn get_membership(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetMembershipQuery {
        user_id: user.user_id,
        on: None,
    };
    let membership = state.get_membership_handler().handle(query).await?;
    Ok(Json(membership))
}

/// POST /api/memberships/cancel - Cancel the caller's active membership
pub async fn cancel_membership(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CancelMembershipCommand {
        user_id: user.user_id,
        on: None,
    };
    let result = state.cancel_membership_handler().handle(cmd).await?;
    Ok(Json(result))
}

/// POST /api/admin/memberships
pub async fn create_membership(
    State(state): State<AppState>,
    _admin: AuthenticatedUser,
    Json(request): Json<CreateMembershipRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateMembershipCommand {
        user_id: parse_user_id("user_id", &request.user_id)?,
        membership_type: request.membership_type,
        reference_date: request.reference_date,
    };
    let membership = state.create_membership_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

/// POST /api/admin/memberships/expire
pub async fn expire_memberships(
    State(state): State<AppState>,
    _admin: AuthenticatedUser,
    Query(params): Query<ExpireMembershipsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ExpireMembershipsCommand { today: params.today };
    let result = state.expire_memberships_handler().handle(cmd).await?;
    Ok(Json(result))
}
