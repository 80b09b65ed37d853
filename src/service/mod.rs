//! Service layer: business logic orchestration.
//!
//! [`AgendaService`] aggregates personal and class-scoped calendar events
//! over a week window, reading snapshots through the
//! [`crate::persistence::EventStore`] seam.

pub mod agenda_service;

pub use agenda_service::{Agenda, AgendaService, DayGrid};
