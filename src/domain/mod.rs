//! Domain layer: identifiers, calendar events, and week-window logic.
//!
//! This module contains the gateway's domain model: typed identifiers for
//! users, classes, and events, the calendar event snapshot read from the
//! classroom store, the day-segment projection used for calendar rendering,
//! and the week window a caller's agenda request resolves to.

pub mod event;
pub mod ids;
pub mod segment;
pub mod week;

pub use event::Event;
pub use ids::{ClassId, EventId, UserId};
pub use segment::{DaySegment, day_segments};
pub use week::WeekWindow;
