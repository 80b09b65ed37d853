//! Persistence layer: read access to the external classroom store.
//!
//! The classroom application owns the schema and performs all writes; this
//! gateway only issues filtered range queries for agenda aggregation. The
//! [`EventStore`] trait is the seam the aggregator consumes, with a
//! PostgreSQL implementation over `sqlx::PgPool`.

pub mod models;
pub mod postgres;

use async_trait::async_trait;

use crate::domain::{Event, UserId, WeekWindow};
use crate::error::GatewayError;

pub use postgres::PostgresEventStore;

/// Read-only store of calendar events, queried per agenda request.
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug {
    /// Returns the personal events owned by `owner` whose `[start, end]`
    /// range intersects the window, ordered by start instant.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on store failure.
    async fn personal_events_in(
        &self,
        owner: UserId,
        window: &WeekWindow,
    ) -> Result<Vec<Event>, GatewayError>;

    /// Returns the class events of every class where `user` is a teacher
    /// or a student, intersecting the window, ordered by start instant.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::PersistenceError`] on store failure.
    async fn class_events_in(
        &self,
        user: UserId,
        window: &WeekWindow,
    ) -> Result<Vec<Event>, GatewayError>;
}
