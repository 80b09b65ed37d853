//! Broadcast hub: routes inbound events to class rooms.
//!
//! One [`BroadcastHub`] is constructed at startup and shared by every
//! connection task. `join-class` registers the connection in the
//! [`RoomRegistry`] and acknowledges the joining connection directly; each
//! mutation kind fans its past-participle mirror out to every current
//! member of the target room, the sender included; clients reconcile
//! their own optimistic updates from the echo.

use std::sync::Arc;

use super::messages::{ClientMessage, ServerMessage};
use super::rooms::{ConnectionHandle, ConnectionId, RoomRegistry};
use crate::domain::ClassId;

/// Dispatch and fan-out for one serving process.
///
/// A connection task processes its inbound messages sequentially and each
/// fan-out completes before the next message is read, so a sender's events
/// reach all room members in send order. No ordering is defined across
/// distinct senders racing into the same room.
#[derive(Debug, Default)]
pub struct BroadcastHub {
    rooms: Arc<RoomRegistry>,
}

impl BroadcastHub {
    /// Creates a hub with an empty room registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the hub's room registry.
    #[must_use]
    pub fn rooms(&self) -> &Arc<RoomRegistry> {
        &self.rooms
    }

    /// Processes one inbound message from `sender`.
    pub async fn handle_message(&self, sender: &ConnectionHandle, message: ClientMessage) {
        match message {
            ClientMessage::JoinClass(p) => self.join(sender, p.class_id).await,
            ClientMessage::AssignmentCreate(p) => {
                self.fan_out(&p.class_id, ServerMessage::AssignmentCreated(p.assignment))
                    .await;
            }
            ClientMessage::AssignmentUpdate(p) => {
                self.fan_out(&p.class_id, ServerMessage::AssignmentUpdated(p.assignment))
                    .await;
            }
            ClientMessage::AssignmentDelete(p) => {
                self.fan_out(&p.class_id, ServerMessage::AssignmentDeleted(p.assignment_id))
                    .await;
            }
            ClientMessage::SubmissionUpdate(p) => {
                self.fan_out(&p.class_id, ServerMessage::SubmissionUpdated(p.submission))
                    .await;
            }
            ClientMessage::NewAnnouncement(p) => {
                self.fan_out(&p.class_id, ServerMessage::AnnouncementCreated(p.announcement))
                    .await;
            }
            ClientMessage::SectionCreate(p) => {
                self.fan_out(&p.class_id, ServerMessage::SectionCreated(p.section))
                    .await;
            }
            ClientMessage::SectionUpdate(p) => {
                self.fan_out(&p.class_id, ServerMessage::SectionUpdated(p.section))
                    .await;
            }
            ClientMessage::SectionDelete(p) => {
                self.fan_out(&p.class_id, ServerMessage::SectionDeleted(p.section_id))
                    .await;
            }
            ClientMessage::MemberUpdate(p) => {
                self.fan_out(&p.class_id, ServerMessage::MemberUpdated(p.member))
                    .await;
            }
            ClientMessage::MemberDelete(p) => {
                self.fan_out(&p.class_id, ServerMessage::MemberDeleted(p.member_id))
                    .await;
            }
            ClientMessage::AttendanceUpdate(p) => {
                self.fan_out(&p.class_id, ServerMessage::AttendanceUpdated(p.attendance))
                    .await;
            }
        }
    }

    /// Removes a disconnected connection from every room it had joined.
    pub async fn disconnect(&self, conn_id: ConnectionId) {
        self.rooms.remove_connection(conn_id).await;
        tracing::debug!(%conn_id, "connection removed from all rooms");
    }

    /// Registers `sender` in the class room and acknowledges it directly
    /// (the ack is unicast, never broadcast).
    async fn join(&self, sender: &ConnectionHandle, class_id: ClassId) {
        self.rooms.join(class_id.clone(), sender.clone()).await;
        tracing::debug!(conn_id = %sender.id(), %class_id, "joined class room");
        if !sender.send(ServerMessage::JoinedClass(Some(class_id))) {
            tracing::debug!(conn_id = %sender.id(), "join ack dropped, connection gone");
        }
    }

    /// Emits `message` to every current member of the class room.
    ///
    /// A room with no members is a no-op. A failed push to one member is
    /// logged and skipped; delivery to the remaining members proceeds.
    async fn fan_out(&self, class_id: &ClassId, message: ServerMessage) {
        let members = self.rooms.members_of(class_id).await;
        if members.is_empty() {
            return;
        }
        for member in &members {
            if !member.send(message.clone()) {
                tracing::debug!(
                    conn_id = %member.id(),
                    %class_id,
                    "skipping member, connection gone"
                );
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn connect() -> (ConnectionHandle, mpsc::UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ConnectionHandle::new(tx), rx)
    }

    fn parse(json: &str) -> ClientMessage {
        let Ok(msg) = serde_json::from_str(json) else {
            panic!("message should parse");
        };
        msg
    }

    async fn join(hub: &BroadcastHub, conn: &ConnectionHandle, class: &str) {
        hub.handle_message(
            conn,
            parse(&format!(
                r#"{{"event":"join-class","data":{{"classId":"{class}"}}}}"#
            )),
        )
        .await;
    }

    #[tokio::test]
    async fn join_acknowledges_joining_connection_only() {
        let hub = BroadcastHub::new();
        let (c1, mut rx1) = connect();
        let (c2, mut rx2) = connect();

        join(&hub, &c1, "C1").await;
        join(&hub, &c2, "C1").await;

        let Some(ServerMessage::JoinedClass(Some(class))) = rx1.recv().await else {
            panic!("expected joined-class ack");
        };
        assert_eq!(class, ClassId::from("C1"));
        // c2 got its own ack and nothing about c1's join.
        let Some(ServerMessage::JoinedClass(_)) = rx2.recv().await else {
            panic!("expected joined-class ack");
        };
        assert!(rx2.try_recv().is_err());
    }

    #[tokio::test]
    async fn fan_out_reaches_room_members_including_sender() {
        let hub = BroadcastHub::new();
        let (c1, mut rx1) = connect();
        let (c2, mut rx2) = connect();
        let (c3, mut rx3) = connect();

        join(&hub, &c1, "C1").await;
        join(&hub, &c2, "C1").await;
        join(&hub, &c3, "C2").await;
        // Drain the join acks.
        let _ = rx1.recv().await;
        let _ = rx2.recv().await;
        let _ = rx3.recv().await;

        hub.handle_message(
            &c1,
            parse(
                r#"{"event":"assignment-create","data":{"classId":"C1","assignment":{"id":"A1"}}}"#,
            ),
        )
        .await;

        for rx in [&mut rx1, &mut rx2] {
            let Some(ServerMessage::AssignmentCreated(payload)) = rx.recv().await else {
                panic!("expected assignment-created");
            };
            assert_eq!(payload.get("id").and_then(|v| v.as_str()), Some("A1"));
        }
        // The C2-only connection receives nothing.
        assert!(rx3.try_recv().is_err());
    }

    #[tokio::test]
    async fn fan_out_to_unknown_room_is_a_noop() {
        let hub = BroadcastHub::new();
        let (c1, mut rx1) = connect();

        hub.handle_message(
            &c1,
            parse(
                r#"{"event":"section-delete","data":{"classId":"ghost","sectionId":"S1"}}"#,
            ),
        )
        .await;
        assert!(rx1.try_recv().is_err());
    }

    #[tokio::test]
    async fn dead_member_does_not_abort_delivery_to_the_rest() {
        let hub = BroadcastHub::new();
        let (c1, rx1) = connect();
        let (c2, mut rx2) = connect();

        join(&hub, &c1, "C1").await;
        join(&hub, &c2, "C1").await;
        let _ = rx2.recv().await;
        // c1's receive side is gone but it is still registered.
        drop(rx1);

        hub.handle_message(
            &c2,
            parse(
                r#"{"event":"attendance-update","data":{"classId":"C1","attendance":{"day":"mon"}}}"#,
            ),
        )
        .await;

        let Some(ServerMessage::AttendanceUpdated(_)) = rx2.recv().await else {
            panic!("expected attendance-updated despite dead member");
        };
    }

    #[tokio::test]
    async fn disconnect_removes_connection_from_every_room() {
        let hub = BroadcastHub::new();
        let (c1, _rx1) = connect();

        join(&hub, &c1, "C1").await;
        join(&hub, &c1, "C2").await;
        hub.disconnect(c1.id()).await;

        assert!(hub.rooms().members_of(&ClassId::from("C1")).await.is_empty());
        assert!(hub.rooms().members_of(&ClassId::from("C2")).await.is_empty());
    }

    #[tokio::test]
    async fn sender_order_is_preserved_per_room() {
        let hub = BroadcastHub::new();
        let (c1, mut rx1) = connect();
        join(&hub, &c1, "C1").await;
        let _ = rx1.recv().await;

        for i in 0..3 {
            hub.handle_message(
                &c1,
                parse(&format!(
                    r#"{{"event":"assignment-create","data":{{"classId":"C1","assignment":{{"seq":{i}}}}}}}"#
                )),
            )
            .await;
        }

        for expected in 0..3 {
            let Some(ServerMessage::AssignmentCreated(payload)) = rx1.recv().await else {
                panic!("expected assignment-created");
            };
            assert_eq!(
                payload.get("seq").and_then(serde_json::Value::as_i64),
                Some(expected)
            );
        }
    }
}
