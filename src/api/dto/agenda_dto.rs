//! Agenda DTOs for the weekly event and grid endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DaySegment, Event};
use crate::service::{Agenda, DayGrid};

/// Query parameters for the agenda endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AgendaParams {
    /// Week-start token: an RFC 3339 date-time or a `YYYY-MM-DD` date.
    pub week: String,
}

/// Events of one week grouped by origin.
#[derive(Debug, Serialize, ToSchema)]
pub struct AgendaEvents {
    /// Events owned by the requesting user.
    pub personal: Vec<Event>,
    /// Events of the user's classes.
    #[serde(rename = "class")]
    pub class_events: Vec<Event>,
}

/// Response body for `GET /agenda`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AgendaResponse {
    /// The week's events, grouped by origin.
    pub events: AgendaEvents,
}

impl From<Agenda> for AgendaResponse {
    fn from(agenda: Agenda) -> Self {
        Self {
            events: AgendaEvents {
                personal: agenda.personal,
                class_events: agenda.class,
            },
        }
    }
}

/// Day segments of one week grouped by origin.
#[derive(Debug, Serialize, ToSchema)]
pub struct GridSegments {
    /// Segments of the user's personal events.
    pub personal: Vec<DaySegment>,
    /// Segments of the user's class events.
    #[serde(rename = "class")]
    pub class_segments: Vec<DaySegment>,
}

/// Response body for `GET /agenda/grid`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AgendaGridResponse {
    /// The week's day segments, grouped by origin.
    pub segments: GridSegments,
}

impl From<DayGrid> for AgendaGridResponse {
    fn from(grid: DayGrid) -> Self {
        Self {
            segments: GridSegments {
                personal: grid.personal,
                class_segments: grid.class,
            },
        }
    }
}
