//! Grooming Salon Service - Main Application Entry Point
//!
//! This is the REST API server behind a pet-grooming shop dashboard. It drives
//! the appointment workflow (scheduled → reception → bathing → grooming → drying →
//! ready → done) and the time-limited live camera access that comes with it.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Tenancy**: per-shop scoping via the X-Tenant-Id header
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Create database connection pool
//! 3. Run database migrations
//! 4. Build HTTP router with routes and middleware
//! 5. Start server on configured port

mod config;
mod db;
mod error;
mod handlers;
mod middleware;
mod models;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, patch},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    // Fail fast on a broken notification endpoint instead of silently
    // dropping every dispatch later
    if let Some(url) = config.notify_endpoint_url.as_deref() {
        services::notification_service::validate_endpoint_url(url)
            .map_err(|e| anyhow::anyhow!("Invalid NOTIFY_ENDPOINT_URL: {}", e))?;
        tracing::info!("Notification endpoint configured");
    } else {
        tracing::info!("No notification endpoint configured, dispatch disabled");
    }

    // Create database pool
    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database pool created");

    // Run migrations
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations complete");

    let server_port = config.server_port;
    let app_state = AppState::new(pool, config);

    // Operator routes: tenant-scoped via the X-Tenant-Id header
    let tenant_routes = Router::new()
        .route(
            "/appointments/{id}/status",
            patch(handlers::appointments::update_status),
        )
        // Apply tenant resolution middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::tenant::tenant_middleware,
        ));

    // Combine tenant-scoped routes with public routes
    let app = Router::new()
        // Public routes (no tenant header required)
        .route("/health", get(handlers::health::health_check))
        // Kanban takes its tenant as a query parameter (dashboard poller)
        .route(
            "/appointments/kanban",
            get(handlers::appointments::kanban),
        )
        // Anonymous customer endpoint, token is the only credential
        .route("/live/{token}", get(handlers::live::live_session))
        // Merge tenant-scoped routes
        .merge(tenant_routes)
        // Add distributed tracing middleware for observability
        .layer(TraceLayer::new_for_http())
        // Share pool and config with all handlers via State extraction
        .with_state(app_state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Start serving HTTP requests
    // This blocks forever, handling requests concurrently with tokio
    axum::serve(listener, app).await?;

    Ok(())
}
