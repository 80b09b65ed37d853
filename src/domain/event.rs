//! Calendar event snapshot model.
//!
//! An [`Event`] is a read-only snapshot of a calendar entry owned by the
//! external classroom store. The gateway never creates, updates, or deletes
//! events; it only reads bounded windows of them for agenda aggregation.
//! Whether an event is personal or class-scoped is a property of the query
//! that produced it; the snapshot shape is identical for both origins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EventId;

/// A calendar event over a UTC time range.
///
/// `end >= start` is an invariant of the store; the agenda fetch relays
/// snapshots as-is and only the day-segment projection rejects violations
/// (see [`super::day_segments`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique event identifier.
    pub id: EventId,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional free-text remark.
    pub remark: Option<String>,
    /// Optional location.
    pub location: Option<String>,
    /// Start instant (UTC).
    pub start: DateTime<Utc>,
    /// End instant (UTC).
    pub end: DateTime<Utc>,
}

impl Event {
    /// Returns `true` if the event's `[start, end]` range intersects the
    /// half-open window `[window_start, window_end)`.
    #[must_use]
    pub fn intersects(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> bool {
        self.start < window_end && self.end >= window_start
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        let Some(dt) = Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).single() else {
            panic!("valid instant");
        };
        dt
    }

    fn event(start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        Event {
            id: EventId::new(),
            name: Some("lecture".to_string()),
            remark: None,
            location: None,
            start,
            end,
        }
    }

    #[test]
    fn intersects_window_overlap() {
        let e = event(instant(2024, 1, 3, 10), instant(2024, 1, 3, 12));
        assert!(e.intersects(instant(2024, 1, 1, 0), instant(2024, 1, 8, 0)));
    }

    #[test]
    fn window_end_is_exclusive() {
        let e = event(instant(2024, 1, 8, 0), instant(2024, 1, 8, 2));
        assert!(!e.intersects(instant(2024, 1, 1, 0), instant(2024, 1, 8, 0)));
    }

    #[test]
    fn event_ending_at_window_start_is_included() {
        let e = event(instant(2023, 12, 31, 20), instant(2024, 1, 1, 0));
        assert!(e.intersects(instant(2024, 1, 1, 0), instant(2024, 1, 8, 0)));
    }

    #[test]
    fn serializes_camel_case() {
        let e = event(instant(2024, 1, 3, 10), instant(2024, 1, 3, 12));
        let json = serde_json::to_string(&e).unwrap_or_default();
        assert!(json.contains("\"start\""));
        assert!(json.contains("\"location\""));
    }
}
