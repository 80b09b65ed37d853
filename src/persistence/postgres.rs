//! PostgreSQL implementation of the event store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::EventStore;
use super::models::{ClassEventRecord, PersonalEventRecord};
use crate::domain::{Event, UserId, WeekWindow};
use crate::error::GatewayError;

type EventRow = (
    Uuid,
    Uuid,
    Option<String>,
    Option<String>,
    Option<String>,
    DateTime<Utc>,
    DateTime<Utc>,
);

/// PostgreSQL-backed event store using `sqlx::PgPool`.
///
/// The window filter is `start_at < $end AND end_at >= $start`: the event
/// range is inclusive, the window end is exclusive.
#[derive(Debug, Clone)]
pub struct PostgresEventStore {
    pool: PgPool,
}

impl PostgresEventStore {
    /// Creates a new store backed by the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for PostgresEventStore {
    async fn personal_events_in(
        &self,
        owner: UserId,
        window: &WeekWindow,
    ) -> Result<Vec<Event>, GatewayError> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT id, owner_id, name, remark, location, start_at, end_at \
             FROM personal_events \
             WHERE owner_id = $1 AND start_at < $2 AND end_at >= $3 \
             ORDER BY start_at ASC",
        )
        .bind(owner.as_uuid())
        .bind(window.end)
        .bind(window.start)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, owner_id, name, remark, location, start_at, end_at)| {
                    Event::from(PersonalEventRecord {
                        id,
                        owner_id,
                        name,
                        remark,
                        location,
                        start_at,
                        end_at,
                    })
                },
            )
            .collect())
    }

    async fn class_events_in(
        &self,
        user: UserId,
        window: &WeekWindow,
    ) -> Result<Vec<Event>, GatewayError> {
        let rows = sqlx::query_as::<_, EventRow>(
            "SELECT e.id, e.class_id, e.name, e.remark, e.location, e.start_at, e.end_at \
             FROM class_events e \
             WHERE e.class_id IN ( \
                 SELECT class_id FROM class_teachers WHERE user_id = $1 \
                 UNION \
                 SELECT class_id FROM class_students WHERE user_id = $1 \
             ) \
             AND e.start_at < $2 AND e.end_at >= $3 \
             ORDER BY e.start_at ASC",
        )
        .bind(user.as_uuid())
        .bind(window.end)
        .bind(window.start)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| GatewayError::PersistenceError(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(id, class_id, name, remark, location, start_at, end_at)| {
                    Event::from(ClassEventRecord {
                        id,
                        class_id,
                        name,
                        remark,
                        location,
                        start_at,
                        end_at,
                    })
                },
            )
            .collect())
    }
}
