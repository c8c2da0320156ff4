//! Phoenix channel wire format (`vsn=1.0.0`) as spoken by the realtime service.

use crate::models::Note;
use serde::{Deserialize, Serialize};

pub(crate) const CHANNEL_TOPIC: &str = "realtime:zettel-changes";
const PHOENIX_TOPIC: &str = "phoenix";

#[derive(Debug, thiserror::Error)]
pub(crate) enum DecodeError {
    #[error("malformed frame: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown change type: {0}")]
    UnknownChange(String),
    #[error("change without {0}")]
    Missing(&'static str),
}

/// One frame in either direction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Frame {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(rename = "ref", default)]
    pub reference: Option<String>,
}

/// A row change on the `zettel` table.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ChangeEvent {
    Insert(Note),
    Update(Note),
    Delete { id: i64 },
}

/// What the subscription has to react to.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Incoming {
    Change(ChangeEvent),
    Joined,
    JoinRejected(String),
    ChannelError,
    Ignored,
}

impl Incoming {
    /// The channel is not joined anymore; the socket has to be reopened.
    pub fn needs_reconnect(&self) -> bool {
        matches!(self, Incoming::JoinRejected(_) | Incoming::ChannelError)
    }
}

#[derive(Deserialize)]
struct ChangePayload {
    data: ChangeData,
}

#[derive(Deserialize)]
struct ChangeData {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    record: Option<Note>,
    #[serde(default)]
    old_record: Option<OldRecord>,
}

#[derive(Deserialize)]
struct OldRecord {
    id: Option<i64>,
}

#[derive(Deserialize)]
struct ReplyPayload {
    #[serde(default)]
    status: String,
    #[serde(default)]
    response: serde_json::Value,
}

pub(crate) fn join_frame(api_key: &str, reference: u64) -> Frame {
    Frame {
        topic: CHANNEL_TOPIC.to_string(),
        event: "phx_join".to_string(),
        payload: serde_json::json!({
            "config": {
                "broadcast": { "ack": false, "self": false },
                "presence": { "key": "" },
                "postgres_changes": [
                    { "event": "*", "schema": "public", "table": "zettel" }
                ]
            },
            "access_token": api_key,
        }),
        reference: Some(reference.to_string()),
    }
}

pub(crate) fn heartbeat_frame(reference: u64) -> Frame {
    Frame {
        topic: PHOENIX_TOPIC.to_string(),
        event: "heartbeat".to_string(),
        payload: serde_json::json!({}),
        reference: Some(reference.to_string()),
    }
}

pub(crate) fn encode(frame: &Frame) -> String {
    // A frame is plain strings and a JSON value; serialization cannot fail.
    serde_json::to_string(frame).unwrap_or_default()
}

/// Decode a text frame. `join_ref` is the ref of the pending join, if any.
pub(crate) fn decode(text: &str, join_ref: Option<&str>) -> Result<Incoming, DecodeError> {
    let frame: Frame = serde_json::from_str(text)?;

    if frame.topic != CHANNEL_TOPIC {
        return Ok(Incoming::Ignored);
    }

    match frame.event.as_str() {
        "postgres_changes" => {
            let payload: ChangePayload = serde_json::from_value(frame.payload)?;
            decode_change(payload.data).map(Incoming::Change)
        }
        "phx_reply" if join_ref.is_some() && frame.reference.as_deref() == join_ref => {
            let reply: ReplyPayload = serde_json::from_value(frame.payload)?;
            if reply.status == "ok" {
                Ok(Incoming::Joined)
            } else {
                Ok(Incoming::JoinRejected(reply.response.to_string()))
            }
        }
        "phx_error" | "phx_close" => Ok(Incoming::ChannelError),
        _ => Ok(Incoming::Ignored),
    }
}

fn decode_change(data: ChangeData) -> Result<ChangeEvent, DecodeError> {
    match data.kind.as_str() {
        "INSERT" => data
            .record
            .map(ChangeEvent::Insert)
            .ok_or(DecodeError::Missing("record")),
        "UPDATE" => data
            .record
            .map(ChangeEvent::Update)
            .ok_or(DecodeError::Missing("record")),
        "DELETE" => data
            .old_record
            .and_then(|r| r.id)
            .map(|id| ChangeEvent::Delete { id })
            .ok_or(DecodeError::Missing("old_record.id")),
        other => Err(DecodeError::UnknownChange(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    fn change_frame(data: serde_json::Value) -> String {
        serde_json::json!({
            "topic": CHANNEL_TOPIC,
            "event": "postgres_changes",
            "payload": { "data": data, "ids": [1] },
            "ref": null
        })
        .to_string()
    }

    #[test]
    fn test_join_frame_contract() {
        let v = serde_json::to_value(join_frame("key", 1)).unwrap();
        assert_eq!(v["topic"], "realtime:zettel-changes");
        assert_eq!(v["event"], "phx_join");
        assert_eq!(v["ref"], "1");
        assert_eq!(v["payload"]["config"]["postgres_changes"][0]["table"], "zettel");
        assert_eq!(v["payload"]["config"]["postgres_changes"][0]["event"], "*");
    }

    #[test]
    fn test_heartbeat_frame_contract() {
        let text = encode(&heartbeat_frame(7));
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"topic": "phoenix", "event": "heartbeat", "payload": {}, "ref": "7"})
        );
    }

    #[test]
    fn test_decode_insert_and_update() {
        let text = change_frame(serde_json::json!({
            "type": "INSERT",
            "schema": "public",
            "table": "zettel",
            "record": {"id": 5, "day": "Montag", "name": "Sport", "closedUntil": null},
            "old_record": null
        }));
        match decode(&text, None).unwrap() {
            Incoming::Change(ChangeEvent::Insert(note)) => {
                assert_eq!(note.id, 5);
                assert_eq!(note.fields.day, Weekday::Montag);
            }
            other => panic!("unexpected {other:?}"),
        }

        let text = change_frame(serde_json::json!({
            "type": "UPDATE",
            "record": {"id": 5, "day": "Dienstag", "name": "Sport"},
            "old_record": {"id": 5}
        }));
        assert!(matches!(
            decode(&text, None).unwrap(),
            Incoming::Change(ChangeEvent::Update(n)) if n.fields.day == Weekday::Dienstag
        ));
    }

    #[test]
    fn test_decode_delete_uses_old_record() {
        let text = change_frame(serde_json::json!({
            "type": "DELETE",
            "record": null,
            "old_record": {"id": 9}
        }));
        assert_eq!(
            decode(&text, None).unwrap(),
            Incoming::Change(ChangeEvent::Delete { id: 9 })
        );

        let text = change_frame(serde_json::json!({"type": "DELETE", "old_record": {}}));
        assert!(matches!(decode(&text, None), Err(DecodeError::Missing(_))));
    }

    #[test]
    fn test_decode_join_reply() {
        let ok = serde_json::json!({
            "topic": CHANNEL_TOPIC,
            "event": "phx_reply",
            "payload": {"status": "ok", "response": {"postgres_changes": []}},
            "ref": "1"
        })
        .to_string();
        assert_eq!(decode(&ok, Some("1")).unwrap(), Incoming::Joined);
        // A reply to something else (e.g. an older join) is not our join.
        assert_eq!(decode(&ok, Some("3")).unwrap(), Incoming::Ignored);

        let err = serde_json::json!({
            "topic": CHANNEL_TOPIC,
            "event": "phx_reply",
            "payload": {"status": "error", "response": {"reason": "denied"}},
            "ref": "1"
        })
        .to_string();
        assert!(matches!(
            decode(&err, Some("1")).unwrap(),
            Incoming::JoinRejected(reason) if reason.contains("denied")
        ));
    }

    #[test]
    fn test_decode_ignores_other_topics_and_events() {
        let hb_reply = serde_json::json!({
            "topic": "phoenix", "event": "phx_reply",
            "payload": {"status": "ok", "response": {}}, "ref": "2"
        })
        .to_string();
        assert_eq!(decode(&hb_reply, Some("1")).unwrap(), Incoming::Ignored);

        let system = serde_json::json!({
            "topic": CHANNEL_TOPIC, "event": "system",
            "payload": {"status": "ok"}, "ref": null
        })
        .to_string();
        assert_eq!(decode(&system, None).unwrap(), Incoming::Ignored);

        let closed = serde_json::json!({
            "topic": CHANNEL_TOPIC, "event": "phx_error", "payload": {}, "ref": null
        })
        .to_string();
        assert_eq!(decode(&closed, None).unwrap(), Incoming::ChannelError);

        assert!(matches!(decode("not json", None), Err(DecodeError::Json(_))));
    }
}
