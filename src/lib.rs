//! # classroom-gateway
//!
//! REST API and WebSocket gateway for real-time classroom events and
//! weekly agenda aggregation.
//!
//! The classroom application's CRUD, auth, and storage live elsewhere;
//! this service is the distribution layer: it fans classroom mutations
//! out to every connected client of a class room and aggregates personal
//! and class-scoped calendar events into weekly agenda views.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Connections (ws/)
//!     │
//!     ├── AgendaService (service/)
//!     ├── BroadcastHub + RoomRegistry (ws/)
//!     │
//!     ├── Domain model (domain/)
//!     │
//!     └── PostgreSQL classroom store (persistence/, read-only)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod ws;
