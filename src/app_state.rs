//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::AgendaService;
use crate::ws::hub::BroadcastHub;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Both members are constructed once at startup and owned here; the
/// gateway keeps no module-level global state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Agenda aggregation over the classroom store.
    pub agenda_service: Arc<AgendaService>,
    /// Broadcast hub shared by every WebSocket connection.
    pub hub: Arc<BroadcastHub>,
}
