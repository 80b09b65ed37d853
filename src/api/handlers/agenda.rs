//! Agenda handlers: weekly events and the day-grid projection.

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::get;

use crate::api::auth::CallerIdentity;
use crate::api::dto::{AgendaGridResponse, AgendaParams, AgendaResponse};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /agenda` — The caller's events for one week, grouped by origin.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRange`] for an unparseable week token
/// and [`GatewayError::Unauthorized`] when no caller identity is present.
#[utoipa::path(
    get,
    path = "/api/v1/agenda",
    tag = "Agenda",
    summary = "Weekly agenda",
    description = "Returns the caller's personal events and the events of every class where the caller is a teacher or student, over the seven days starting at the `week` token. The two groups are never merged.",
    params(AgendaParams),
    responses(
        (status = 200, description = "Weekly agenda", body = AgendaResponse),
        (status = 400, description = "Unparseable week token", body = ErrorResponse),
        (status = 401, description = "Missing or invalid caller identity", body = ErrorResponse),
    )
)]
pub async fn get_agenda(
    State(state): State<AppState>,
    CallerIdentity(user): CallerIdentity,
    Query(params): Query<AgendaParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let agenda = state.agenda_service.week_agenda(user, &params.week).await?;
    Ok(Json(AgendaResponse::from(agenda)))
}

/// `GET /agenda/grid` — The weekly agenda as single-day segments.
///
/// # Errors
///
/// Returns the [`get_agenda`] errors, plus [`GatewayError::InvalidRange`]
/// if the store yields an event whose end precedes its start.
#[utoipa::path(
    get,
    path = "/api/v1/agenda/grid",
    tag = "Agenda",
    summary = "Weekly agenda as day segments",
    description = "Same window and grouping as the agenda endpoint, with every event split at UTC midnights into per-day segments ready for calendar grid layout.",
    params(AgendaParams),
    responses(
        (status = 200, description = "Weekly day segments", body = AgendaGridResponse),
        (status = 400, description = "Unparseable week token", body = ErrorResponse),
        (status = 401, description = "Missing or invalid caller identity", body = ErrorResponse),
    )
)]
pub async fn get_agenda_grid(
    State(state): State<AppState>,
    CallerIdentity(user): CallerIdentity,
    Query(params): Query<AgendaParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let grid = state.agenda_service.week_grid(user, &params.week).await?;
    Ok(Json(AgendaGridResponse::from(grid)))
}

/// Agenda routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/agenda", get(get_agenda))
        .route("/agenda/grid", get(get_agenda_grid))
}
