//! Day-segment projection of calendar events.
//!
//! Calendar rendering lays events out on a per-day grid, so an event that
//! crosses UTC midnight must be split into one segment per calendar day.
//! Segments are display artifacts: they share the source event's identity
//! and metadata and are never persisted.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{Event, EventId};
use crate::error::GatewayError;

/// Projection of an [`Event`] onto a single UTC calendar day.
///
/// Start and end are clamped to the day's boundaries; metadata is carried
/// over from the source event unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DaySegment {
    /// Identity of the source event. Multiple segments share one source.
    pub event_id: EventId,
    /// Display name carried from the source event.
    pub name: Option<String>,
    /// Remark carried from the source event.
    pub remark: Option<String>,
    /// Location carried from the source event.
    pub location: Option<String>,
    /// Segment start (the event start, or a UTC midnight).
    pub start: DateTime<Utc>,
    /// Segment end (a UTC midnight, or the event end).
    pub end: DateTime<Utc>,
}

impl DaySegment {
    fn clamped(event: &Event, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            event_id: event.id,
            name: event.name.clone(),
            remark: event.remark.clone(),
            location: event.location.clone(),
            start,
            end,
        }
    }
}

/// Splits an event into the ordered sequence of single-day segments
/// covering its `[start, end]` range.
///
/// An event confined to one UTC calendar day yields exactly one segment
/// equal to the event. Otherwise the range is walked in UTC-midnight
/// steps: the first segment starts at the event start, every intermediate
/// segment ends at the next midnight, and the final segment ends at the
/// event end. The walk continues while the current boundary is `<= end`,
/// so an event ending exactly at midnight yields a zero-length final
/// segment on that day. The concatenated segments tile `[start, end]`
/// with no gaps or overlaps.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRange`] if `end < start`, or if the
/// range extends beyond the representable calendar.
pub fn day_segments(event: &Event) -> Result<Vec<DaySegment>, GatewayError> {
    if event.end < event.start {
        return Err(GatewayError::InvalidRange(format!(
            "event {} ends before it starts",
            event.id
        )));
    }

    if event.start.date_naive() == event.end.date_naive() {
        return Ok(vec![DaySegment::clamped(event, event.start, event.end)]);
    }

    let mut segments = Vec::new();
    let mut cursor = event.start;
    while cursor <= event.end {
        let next_midnight = midnight_after(cursor)?;
        let end = if next_midnight > event.end {
            event.end
        } else {
            next_midnight
        };
        segments.push(DaySegment::clamped(event, cursor, end));
        cursor = next_midnight;
    }
    Ok(segments)
}

/// Returns the first UTC midnight strictly after `instant`'s calendar day
/// start.
fn midnight_after(instant: DateTime<Utc>) -> Result<DateTime<Utc>, GatewayError> {
    instant
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
        .checked_add_signed(Duration::days(1))
        .ok_or_else(|| {
            GatewayError::InvalidRange("event range exceeds the representable calendar".to_string())
        })
}
