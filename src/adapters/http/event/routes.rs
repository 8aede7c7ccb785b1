//! Router configuration for event endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    cancel_event, create_event, get_event, record_dive_count, subscribe, unsubscribe,
    update_event,
};
use crate::adapters::http::AppState;

/// Event routes, mounted at `/api/events`.
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_event))
        .route("/:id", get(get_event).put(update_event))
        .route("/:id/cancel", post(cancel_event))
        .route("/:id/participants", post(subscribe).delete(unsubscribe))
        .route("/:id/participants/:user_id/dives", put(record_dive_count))
}
