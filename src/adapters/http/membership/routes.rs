//! Router configuration for membership endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{cancel_membership, create_membership, expire_memberships, get_membership};
use crate::adapters::http::AppState;

/// Caller-facing routes, mounted at `/api/memberships`.
pub fn membership_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_membership))
        .route("/cancel", post(cancel_membership))
}

/// Admin routes, mounted at `/api/admin/memberships`.
pub fn membership_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_membership))
        .route("/expire", post(expire_memberships))
}
