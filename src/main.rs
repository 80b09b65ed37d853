//! classroom-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use classroom_gateway::api;
use classroom_gateway::app_state::AppState;
use classroom_gateway::config::GatewayConfig;
use classroom_gateway::persistence::PostgresEventStore;
use classroom_gateway::service::AgendaService;
use classroom_gateway::ws::handler::ws_handler;
use classroom_gateway::ws::hub::BroadcastHub;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env().map_err(|e| anyhow::anyhow!(e.to_string()))?;
    tracing::info!(addr = %config.listen_addr, "starting classroom-gateway");

    // Classroom store (read-only; the pool connects lazily on first query)
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect_lazy(&config.database_url)?;
    let store = Arc::new(PostgresEventStore::new(pool));

    // Build service layer and hub
    let agenda_service = Arc::new(AgendaService::new(store));
    let hub = Arc::new(BroadcastHub::new());

    // Build application state
    let app_state = AppState {
        agenda_service,
        hub,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
