//! dive-portal HTTP server.

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use dive_portal::adapters::http::{api_router, AppState};
use dive_portal::adapters::postgres::{
    PostgresConfigurationRepository, PostgresEventRepository, PostgresMembershipRepository,
    PostgresNotificationQueue, PostgresPaymentRepository,
};
use dive_portal::application::ConfigurationStore;
use dive_portal::config::{AppConfig, ServerConfig};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!("Starting dive-portal (env: {:?})", config.server.environment);

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let configuration = ConfigurationStore::load(Arc::new(
        PostgresConfigurationRepository::new(pool.clone()),
    ))
    .await
    .map_err(|e| format!("Failed to load portal configuration: {}", e))?;

    let state = AppState::new(
        Arc::new(PostgresPaymentRepository::new(pool.clone())),
        Arc::new(PostgresEventRepository::new(pool.clone())),
        Arc::new(PostgresMembershipRepository::new(pool.clone())),
        Arc::new(PostgresNotificationQueue::new(pool)),
        Arc::new(configuration),
    );

    let app = api_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(config.server.request_timeout()))
            .layer(cors_layer(&config.server)),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("dive-portal listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins = server.cors_origins_list();
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok())
                .collect::<Vec<_>>(),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-user-id")])
}
