//! WebSocket layer: connection handling, rooms, and broadcast fan-out.
//!
//! The WebSocket endpoint at `/ws` carries the classroom real-time
//! protocol: clients join class rooms and every classroom mutation is
//! re-emitted to all current members of the matching room.

pub mod connection;
pub mod handler;
pub mod hub;
pub mod messages;
pub mod rooms;
