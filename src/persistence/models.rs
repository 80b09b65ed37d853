//! Row models for the event tables of the classroom store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Event, EventId};

/// A row from the `personal_events` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalEventRecord {
    /// Event identifier.
    pub id: Uuid,
    /// Owning user; the only user the event is visible to.
    pub owner_id: Uuid,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional free-text remark.
    pub remark: Option<String>,
    /// Optional location.
    pub location: Option<String>,
    /// Start instant (UTC).
    pub start_at: DateTime<Utc>,
    /// End instant (UTC).
    pub end_at: DateTime<Utc>,
}

/// A row from the `class_events` table.
///
/// Visible to every teacher and student of the owning class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassEventRecord {
    /// Event identifier.
    pub id: Uuid,
    /// Owning class.
    pub class_id: Uuid,
    /// Optional display name.
    pub name: Option<String>,
    /// Optional free-text remark.
    pub remark: Option<String>,
    /// Optional location.
    pub location: Option<String>,
    /// Start instant (UTC).
    pub start_at: DateTime<Utc>,
    /// End instant (UTC).
    pub end_at: DateTime<Utc>,
}

impl From<PersonalEventRecord> for Event {
    fn from(record: PersonalEventRecord) -> Self {
        Self {
            id: EventId::from_uuid(record.id),
            name: record.name,
            remark: record.remark,
            location: record.location,
            start: record.start_at,
            end: record.end_at,
        }
    }
}

impl From<ClassEventRecord> for Event {
    fn from(record: ClassEventRecord) -> Self {
        Self {
            id: EventId::from_uuid(record.id),
            name: record.name,
            remark: record.remark,
            location: record.location,
            start: record.start_at,
            end: record.end_at,
        }
    }
}
