//! Agenda aggregation over a caller's week window.

use std::sync::Arc;

use crate::domain::{DaySegment, Event, UserId, WeekWindow, day_segments};
use crate::error::GatewayError;
use crate::persistence::EventStore;

/// A week of events grouped by origin.
///
/// The two lists are never merged: downstream consumers render them with
/// different permissions (personal events are editable only by their
/// owner, class events only by class teachers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agenda {
    /// Events owned by the requesting user.
    pub personal: Vec<Event>,
    /// Events of classes where the user is a teacher or a student.
    pub class: Vec<Event>,
}

/// A week of day segments grouped by origin, ready for grid layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGrid {
    /// Segments of the user's personal events.
    pub personal: Vec<DaySegment>,
    /// Segments of the user's class events.
    pub class: Vec<DaySegment>,
}

/// Aggregation layer for agenda queries.
///
/// Stateless coordinator: resolves the week window, fetches both event
/// origins from the store, and preserves the origin grouping. Failures are
/// surfaced to the caller; nothing is retried here.
#[derive(Debug, Clone)]
pub struct AgendaService {
    store: Arc<dyn EventStore>,
}

impl AgendaService {
    /// Creates a new `AgendaService` over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }

    /// Returns the user's agenda for the week starting at `week_start`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRange`] for an unparseable week
    /// token and [`GatewayError::PersistenceError`] on store failure.
    pub async fn week_agenda(
        &self,
        user: UserId,
        week_start: &str,
    ) -> Result<Agenda, GatewayError> {
        let window = WeekWindow::resolve(week_start)?;

        let personal = self.store.personal_events_in(user, &window).await?;
        let class = self.store.class_events_in(user, &window).await?;

        tracing::debug!(
            %user,
            personal = personal.len(),
            class = class.len(),
            "agenda aggregated"
        );
        Ok(Agenda { personal, class })
    }

    /// Returns the user's agenda as per-day segments for calendar layout.
    ///
    /// Every event of [`Self::week_agenda`] is passed through the
    /// day-segment splitter; the origin grouping is preserved.
    ///
    /// # Errors
    ///
    /// Returns the [`Self::week_agenda`] errors, plus
    /// [`GatewayError::InvalidRange`] if the store yields an event with
    /// `end < start`.
    pub async fn week_grid(&self, user: UserId, week_start: &str) -> Result<DayGrid, GatewayError> {
        let agenda = self.week_agenda(user, week_start).await?;
        Ok(DayGrid {
            personal: split_all(&agenda.personal)?,
            class: split_all(&agenda.class)?,
        })
    }
}

fn split_all(events: &[Event]) -> Result<Vec<DaySegment>, GatewayError> {
    let mut segments = Vec::with_capacity(events.len());
    for event in events {
        segments.extend(day_segments(event)?);
    }
    Ok(segments)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};

    use crate::domain::EventId;

    fn instant(d: u32, h: u32) -> DateTime<Utc> {
        let Some(dt) = Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).single() else {
            panic!("valid instant");
        };
        dt
    }

    fn event(name: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Event {
        Event {
            id: EventId::new(),
            name: Some(name.to_string()),
            remark: None,
            location: None,
            start,
            end,
        }
    }

    /// Store double mimicking the collaborator's window filtering.
    #[derive(Debug, Default)]
    struct FixedStore {
        personal: Vec<Event>,
        class: Vec<Event>,
    }

    #[async_trait]
    impl EventStore for FixedStore {
        async fn personal_events_in(
            &self,
            _owner: UserId,
            window: &WeekWindow,
        ) -> Result<Vec<Event>, GatewayError> {
            Ok(self
                .personal
                .iter()
                .filter(|e| window.intersects(e.start, e.end))
                .cloned()
                .collect())
        }

        async fn class_events_in(
            &self,
            _user: UserId,
            window: &WeekWindow,
        ) -> Result<Vec<Event>, GatewayError> {
            Ok(self
                .class
                .iter()
                .filter(|e| window.intersects(e.start, e.end))
                .cloned()
                .collect())
        }
    }

    fn user() -> UserId {
        UserId::from_uuid(uuid::Uuid::new_v4())
    }

    fn service(store: FixedStore) -> AgendaService {
        AgendaService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn groups_by_origin_without_merging() {
        let svc = service(FixedStore {
            personal: vec![event("dentist", instant(3, 9), instant(3, 10))],
            class: vec![event("exam", instant(4, 12), instant(4, 14))],
        });

        let Ok(agenda) = svc.week_agenda(user(), "2024-01-01").await else {
            panic!("agenda failed");
        };
        assert_eq!(agenda.personal.len(), 1);
        assert_eq!(agenda.class.len(), 1);
        assert_eq!(
            agenda.personal.first().and_then(|e| e.name.as_deref()),
            Some("dentist")
        );
        assert_eq!(
            agenda.class.first().and_then(|e| e.name.as_deref()),
            Some("exam")
        );
    }

    #[tokio::test]
    async fn events_outside_window_are_excluded() {
        let svc = service(FixedStore {
            personal: vec![event("later", instant(9, 9), instant(9, 10))],
            class: vec![event("much later", instant(20, 9), instant(20, 10))],
        });

        let Ok(agenda) = svc.week_agenda(user(), "2024-01-01").await else {
            panic!("agenda failed");
        };
        assert!(agenda.personal.is_empty());
        assert!(agenda.class.is_empty());
    }

    #[tokio::test]
    async fn bad_week_token_is_invalid_range() {
        let svc = service(FixedStore::default());
        let result = svc.week_agenda(user(), "not-a-date").await;
        assert!(matches!(result, Err(GatewayError::InvalidRange(_))));
    }

    #[tokio::test]
    async fn grid_splits_multi_day_events_preserving_origin() {
        let svc = service(FixedStore {
            personal: vec![event("trip", instant(1, 10), instant(3, 15))],
            class: vec![event("lab", instant(2, 9), instant(2, 11))],
        });

        let Ok(grid) = svc.week_grid(user(), "2024-01-01").await else {
            panic!("grid failed");
        };
        assert_eq!(grid.personal.len(), 3);
        assert_eq!(grid.class.len(), 1);
    }

    #[tokio::test]
    async fn grid_fails_fast_on_inverted_event_range() {
        let svc = service(FixedStore {
            personal: vec![event("broken", instant(3, 10), instant(3, 9))],
            class: vec![],
        });

        let result = svc.week_grid(user(), "2024-01-01").await;
        assert!(matches!(result, Err(GatewayError::InvalidRange(_))));
    }
}
