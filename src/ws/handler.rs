//! Axum WebSocket upgrade handler.

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::api::auth::CallerIdentity;
use crate::app_state::AppState;

/// `GET /ws` — Upgrade HTTP connection to WebSocket.
///
/// Authentication has already happened upstream: the upgrade is rejected
/// with 401 before this handler runs if no caller identity is present.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    CallerIdentity(user): CallerIdentity,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let hub = std::sync::Arc::clone(&state.hub);
    tracing::debug!(%user, "ws upgrade accepted");

    ws.on_upgrade(move |socket| run_connection(socket, hub))
}
