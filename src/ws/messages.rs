//! WebSocket message types: inbound commands and outbound events.
//!
//! The envelope is `{"event": <kind>, "data": <payload>}`. Kind strings
//! and payload field names are fixed by the classroom clients and must not
//! change. The gateway relays mutation payloads as opaque blobs; only the
//! kind tag and the required key fields are validated, which happens
//! structurally at deserialization time: a message missing `classId` or
//! its kind's entity field fails to parse and is never broadcast.

use serde::{Deserialize, Serialize};

use crate::domain::ClassId;

/// Client → server messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Register this connection as a member of the class room.
    JoinClass(JoinClass),
    /// An assignment was created in the class.
    AssignmentCreate(AssignmentChange),
    /// An assignment was updated.
    AssignmentUpdate(AssignmentChange),
    /// An assignment was deleted.
    AssignmentDelete(AssignmentDelete),
    /// A submission was updated.
    SubmissionUpdate(SubmissionChange),
    /// An announcement was posted.
    NewAnnouncement(AnnouncementChange),
    /// A section was created.
    SectionCreate(SectionChange),
    /// A section was updated.
    SectionUpdate(SectionChange),
    /// A section was deleted.
    SectionDelete(SectionDelete),
    /// A class member was updated.
    MemberUpdate(MemberChange),
    /// A class member was removed.
    MemberDelete(MemberDelete),
    /// An attendance record was updated.
    AttendanceUpdate(AttendanceChange),
}

/// Payload of `join-class`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinClass {
    /// Class room to join.
    pub class_id: ClassId,
}

/// Payload of `assignment-create` / `assignment-update`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentChange {
    /// Target class room.
    pub class_id: ClassId,
    /// Opaque assignment entity.
    pub assignment: serde_json::Value,
}

/// Payload of `assignment-delete`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentDelete {
    /// Target class room.
    pub class_id: ClassId,
    /// Identifier of the deleted assignment.
    pub assignment_id: String,
}

/// Payload of `submission-update`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionChange {
    /// Target class room.
    pub class_id: ClassId,
    /// Opaque submission entity.
    pub submission: serde_json::Value,
}

/// Payload of `new-announcement`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementChange {
    /// Target class room.
    pub class_id: ClassId,
    /// Opaque announcement entity.
    pub announcement: serde_json::Value,
}

/// Payload of `section-create` / `section-update`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionChange {
    /// Target class room.
    pub class_id: ClassId,
    /// Opaque section entity.
    pub section: serde_json::Value,
}

/// Payload of `section-delete`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDelete {
    /// Target class room.
    pub class_id: ClassId,
    /// Identifier of the deleted section.
    pub section_id: String,
}

/// Payload of `member-update`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberChange {
    /// Target class room.
    pub class_id: ClassId,
    /// Opaque member entity.
    pub member: serde_json::Value,
}

/// Payload of `member-delete`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDelete {
    /// Target class room.
    pub class_id: ClassId,
    /// Identifier of the removed member.
    pub member_id: String,
}

/// Payload of `attendance-update`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceChange {
    /// Target class room.
    pub class_id: ClassId,
    /// Opaque attendance entity.
    pub attendance: serde_json::Value,
}

/// Server → client messages.
///
/// Every mutation kind mirrors its inbound counterpart with a
/// past-participle name and carries the entity payload (or, for deletes,
/// the deleted identifier). `joined-class` is the unicast join
/// acknowledgment: the joined class identifier, or `null` on internal
/// failure.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Join acknowledgment, sent to the joining connection only.
    JoinedClass(Option<ClassId>),
    /// Mirror of `assignment-create`.
    AssignmentCreated(serde_json::Value),
    /// Mirror of `assignment-update`.
    AssignmentUpdated(serde_json::Value),
    /// Mirror of `assignment-delete`.
    AssignmentDeleted(String),
    /// Mirror of `submission-update`.
    SubmissionUpdated(serde_json::Value),
    /// Mirror of `new-announcement`.
    AnnouncementCreated(serde_json::Value),
    /// Mirror of `section-create`.
    SectionCreated(serde_json::Value),
    /// Mirror of `section-update`.
    SectionUpdated(serde_json::Value),
    /// Mirror of `section-delete`.
    SectionDeleted(String),
    /// Mirror of `member-update`.
    MemberUpdated(serde_json::Value),
    /// Mirror of `member-delete`.
    MemberDeleted(String),
    /// Mirror of `attendance-update`.
    AttendanceUpdated(serde_json::Value),
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn join_class_parses() {
        let msg: Option<ClientMessage> =
            serde_json::from_str(r#"{"event":"join-class","data":{"classId":"C1"}}"#).ok();
        let Some(ClientMessage::JoinClass(payload)) = msg else {
            panic!("expected join-class");
        };
        assert_eq!(payload.class_id, ClassId::from("C1"));
    }

    #[test]
    fn assignment_create_parses_with_opaque_payload() {
        let msg: Option<ClientMessage> = serde_json::from_str(
            r#"{"event":"assignment-create","data":{"classId":"C1","assignment":{"id":"A1","due":"friday"}}}"#,
        )
        .ok();
        let Some(ClientMessage::AssignmentCreate(payload)) = msg else {
            panic!("expected assignment-create");
        };
        assert_eq!(
            payload.assignment.get("id").and_then(|v| v.as_str()),
            Some("A1")
        );
    }

    #[test]
    fn missing_entity_field_is_rejected() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"event":"assignment-create","data":{"classId":"C1"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_class_id_is_rejected() {
        let result: Result<ClientMessage, _> = serde_json::from_str(
            r#"{"event":"submission-update","data":{"submission":{"id":"S1"}}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result: Result<ClientMessage, _> =
            serde_json::from_str(r#"{"event":"grade-create","data":{"classId":"C1"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn delete_kinds_carry_ids() {
        let msg: Option<ClientMessage> = serde_json::from_str(
            r#"{"event":"section-delete","data":{"classId":"C1","sectionId":"S9"}}"#,
        )
        .ok();
        let Some(ClientMessage::SectionDelete(payload)) = msg else {
            panic!("expected section-delete");
        };
        assert_eq!(payload.section_id, "S9");
    }

    #[test]
    fn outbound_kinds_are_past_participle() {
        let json =
            serde_json::to_string(&ServerMessage::AssignmentCreated(serde_json::json!({"id":"A1"})))
                .unwrap_or_default();
        assert!(json.contains(r#""event":"assignment-created""#));

        let json = serde_json::to_string(&ServerMessage::AnnouncementCreated(
            serde_json::json!({"id":"N1"}),
        ))
        .unwrap_or_default();
        assert!(json.contains(r#""event":"announcement-created""#));

        let json = serde_json::to_string(&ServerMessage::SectionDeleted("S9".to_string()))
            .unwrap_or_default();
        assert!(json.contains(r#""event":"section-deleted""#));
        assert!(json.contains(r#""data":"S9""#));
    }

    #[test]
    fn joined_class_ack_serializes_class_or_null() {
        let json = serde_json::to_string(&ServerMessage::JoinedClass(Some(ClassId::from("C1"))))
            .unwrap_or_default();
        assert!(json.contains(r#""data":"C1""#));

        let json = serde_json::to_string(&ServerMessage::JoinedClass(None)).unwrap_or_default();
        assert!(json.contains(r#""data":null"#));
    }
}
