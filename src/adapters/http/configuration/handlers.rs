//! HTTP handlers for configuration endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::dto::{ConfigurationVersionResponse, SetRuntimeValueRequest};
use crate::adapters::http::extract::AuthenticatedUser;
use crate::adapters::http::{ApiError, AppState};

/// PUT /api/admin/configuration/:group/:key
///
/// Persists the override; it becomes visible after the next reload.
pub async fn set_runtime_value(
    State(state): State<AppState>,
    _admin: AuthenticatedUser,
    Path((group, key)): Path<(String, String)>,
    Json(request): Json<SetRuntimeValueRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .config
        .set_runtime_value(&group, &key, request.value.as_deref())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/configuration/reload
pub async fn reload(
    State(state): State<AppState>,
    _admin: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let version = state.config.reload().await?;
    Ok(Json(ConfigurationVersionResponse { version }))
}
