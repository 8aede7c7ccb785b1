//! Router configuration for payment endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    decrease_one_time_payment, get_active_payments, get_best_payment_type,
    increase_one_time_payment, reset_payments, save_one_time_payment, save_period_payment,
};
use crate::adapters::http::AppState;

/// Caller-facing routes, mounted at `/api/payments`.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_active_payments))
        .route("/best-type", get(get_best_payment_type))
}

/// Admin routes, mounted at `/api/admin/payments`.
pub fn payment_admin_routes() -> Router<AppState> {
    Router::new()
        .route("/one-time", post(save_one_time_payment))
        .route("/one-time/increase", post(increase_one_time_payment))
        .route("/one-time/decrease", post(decrease_one_time_payment))
        .route("/periodical", post(save_period_payment))
        .route("/reset", post(reset_payments))
}
