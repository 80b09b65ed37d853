//! Room registry: class-scoped membership of live connections.
//!
//! [`RoomRegistry`] maps a class identifier to the set of currently
//! connected client handles. Rooms come into existence on first join and
//! are retained when they empty; an empty room is indistinguishable from
//! an unknown one through [`RoomRegistry::members_of`].

use std::collections::{HashMap, HashSet};
use std::fmt;

use tokio::sync::RwLock;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::messages::ServerMessage;
use crate::domain::ClassId;

/// Identifier of one live connection, unique for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Creates a new random connection identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handle to one live client transport session.
///
/// Owned by the connection task for its connected lifetime; clones held
/// by the registry are released when the connection is removed. Sending
/// pushes onto the connection's unbounded outbound queue and never
/// blocks.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    outbound: mpsc::UnboundedSender<ServerMessage>,
}

impl ConnectionHandle {
    /// Creates a handle around a connection's outbound queue.
    #[must_use]
    pub fn new(outbound: mpsc::UnboundedSender<ServerMessage>) -> Self {
        Self {
            id: ConnectionId::new(),
            outbound,
        }
    }

    /// Returns the connection identifier.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queues a message for delivery to this connection.
    ///
    /// Returns `false` if the connection's receive side is gone (the
    /// connection task has exited); callers treat that as a skipped
    /// recipient, never as a fan-out failure.
    pub fn send(&self, message: ServerMessage) -> bool {
        self.outbound.send(message).is_ok()
    }
}

#[derive(Debug, Default)]
struct Inner {
    rooms: HashMap<ClassId, HashMap<ConnectionId, ConnectionHandle>>,
    memberships: HashMap<ConnectionId, HashSet<ClassId>>,
}

/// Concurrent store of room membership.
///
/// One `RwLock` guards the rooms and the reverse membership index
/// together, so a disconnect observes and clears a consistent view.
/// Writers only touch map entries and fan-out readers only clone
/// snapshots, so hold times stay short at target scale.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    inner: RwLock<Inner>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to a class room. Idempotent: re-joining a room
    /// the connection is already a member of is a no-op success.
    pub async fn join(&self, class_id: ClassId, handle: ConnectionHandle) {
        let mut inner = self.inner.write().await;
        inner
            .memberships
            .entry(handle.id())
            .or_default()
            .insert(class_id.clone());
        inner
            .rooms
            .entry(class_id)
            .or_default()
            .insert(handle.id(), handle);
    }

    /// Removes a connection from a class room. Removing a non-member or
    /// naming an unknown room is a no-op.
    pub async fn leave(&self, class_id: &ClassId, conn_id: ConnectionId) {
        let mut inner = self.inner.write().await;
        if let Some(room) = inner.rooms.get_mut(class_id) {
            room.remove(&conn_id);
        }
        if let Some(joined) = inner.memberships.get_mut(&conn_id) {
            joined.remove(class_id);
        }
    }

    /// Returns a snapshot of the room's current members. Unknown rooms
    /// yield an empty snapshot, never an error.
    pub async fn members_of(&self, class_id: &ClassId) -> Vec<ConnectionHandle> {
        let inner = self.inner.read().await;
        inner
            .rooms
            .get(class_id)
            .map(|room| room.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Removes a connection from every room it had joined.
    ///
    /// Called on disconnect; once this returns, no room holds the
    /// connection.
    pub async fn remove_connection(&self, conn_id: ConnectionId) {
        let mut inner = self.inner.write().await;
        if let Some(joined) = inner.memberships.remove(&conn_id) {
            for class_id in joined {
                if let Some(room) = inner.rooms.get_mut(&class_id) {
                    room.remove(&conn_id);
                }
            }
        }
    }

    /// Returns the number of rooms ever joined (empty rooms included).
    pub async fn room_count(&self) -> usize {
        self.inner.read().await.rooms.len()
    }
}
