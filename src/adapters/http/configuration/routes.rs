//! Router configuration for configuration endpoints.

use axum::routing::{post, put};
use axum::Router;

use super::handlers::{reload, set_runtime_value};
use crate::adapters::http::AppState;

/// Admin routes, mounted at `/api/admin/configuration`.
pub fn configuration_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/reload", post(reload))
        .route("/:group/:key", put(set_runtime_value))
}
