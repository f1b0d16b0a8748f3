//! Server setup and initialization
//!
//! Wires repositories into the service context, builds the router, and
//! mounts the realtime hub's `/ws` route into the same process (the
//! presence map is process-local).

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use skillswap_common::{AppConfig, AppError, JwtService};
use skillswap_core::SnowflakeGenerator;
use skillswap_db::{
    create_pool, DatabaseConfig, PgAppointmentRepository, PgConnectionRepository,
    PgCourseRepository, PgMessageRepository, PgNotificationRepository, PgRatingRepository,
    PgReportRepository, PgUserRepository,
};
use skillswap_gateway::{ws_handler, HubState, PresenceHub};
use skillswap_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application: REST surface, health probes, and
/// the `/ws` realtime route.
pub fn create_app(state: AppState) -> Router {
    let hub = Arc::new(PresenceHub::new());
    let hub_state = HubState::new(state.service_context_arc(), hub);

    let api = apply_middleware(
        create_router(),
        &state.config().rate_limit,
        &state.config().cors,
        state.config().app.env.is_production(),
    );

    Router::new()
        .merge(api.with_state(state.clone()))
        .merge(health_routes().with_state(state))
        .route("/ws", get(ws_handler).with_state(hub_state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));

    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .appointment_repo(Arc::new(PgAppointmentRepository::new(pool.clone())))
        .course_repo(Arc::new(PgCourseRepository::new(pool.clone())))
        .rating_repo(Arc::new(PgRatingRepository::new(pool.clone())))
        .message_repo(Arc::new(PgMessageRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool.clone())))
        .connection_repo(Arc::new(PgConnectionRepository::new(pool.clone())))
        .report_repo(Arc::new(PgReportRepository::new(pool)))
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    let state = create_app_state(config).await?;
    let app = create_app(state);

    run_server(app, addr).await
}
