//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own routes; all of them share [`AppState`].
//! The caller is identified by the `X-User-Id` header.

pub mod configuration;
mod error;
pub mod event;
mod extract;
pub mod membership;
pub mod payment;
mod state;

use axum::Router;

pub use error::{ApiError, ErrorResponse};
pub use extract::{AuthenticatedUser, USER_ID_HEADER};
pub use state::AppState;

/// Complete API router.
///
/// # Routes
///
/// ## User endpoints
/// - `/api/payments`
/// - `/api/events`
/// - `/api/memberships`
///
/// ## Admin endpoints
/// - `/api/admin/payments`
/// - `/api/admin/memberships`
/// - `/api/admin/configuration`
pub fn api_router(state: AppState) -> Router {
    let admin = Router::new()
        .nest("/payments", payment::payment_admin_routes())
        .nest("/memberships", membership::membership_admin_routes())
        .nest("/configuration", configuration::configuration_admin_routes());

    let api = Router::new()
        .nest("/payments", payment::payment_routes())
        .nest("/events", event::event_routes())
        .nest("/memberships", membership::membership_routes())
        .nest("/admin", admin);

    Router::new().nest("/api", api).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::memory::{
        InMemoryConfigurationRepository, InMemoryEventRepository, InMemoryMembershipRepository,
        InMemoryNotificationQueue, InMemoryPaymentRepository,
    };
    use crate::application::ConfigurationStore;

    async fn test_state() -> AppState {
        let config = ConfigurationStore::load(Arc::new(InMemoryConfigurationRepository::with_defaults()))
            .await
            .unwrap();
        AppState::new(
            Arc::new(InMemoryPaymentRepository::new()),
            Arc::new(InMemoryEventRepository::new()),
            Arc::new(InMemoryMembershipRepository::new()),
            Arc::new(InMemoryNotificationQueue::new()),
            Arc::new(config),
        )
    }

    #[tokio::test]
    async fn router_builds_with_state() {
        let _: Router = api_router(test_state().await);
    }

    #[tokio::test]
    async fn missing_user_header_is_unauthorized() {
        let app = api_router(test_state().await);
        let response = app
            .oneshot(Request::get("/api/payments").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn caller_without_membership_gets_not_found() {
        let app = api_router(test_state().await);
        let response = app
            .oneshot(
                Request::get("/api/memberships")
                    .header(USER_ID_HEADER, "diver-1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
