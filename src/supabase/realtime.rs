//! Realtime Wire Codec
//!
//! Frame encoding/decoding for the Supabase realtime channel (Phoenix-style
//! JSON frames). The socket itself lives in the state layer; everything here
//! is pure and unit-tested off the wasm target.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::records::{BinStatusRecord, ChangeEvent};

/// Channel topic scoping the subscription to the BinStatus table.
pub const CHANNEL_TOPIC: &str = "realtime:public:BinStatus";

/// Heartbeat cadence expected by the server.
pub const HEARTBEAT_INTERVAL_MS: u32 = 30 * 1000;

/// Websocket endpoint for a project, with the anon key as a query parameter.
pub fn realtime_url(project_url: &str, anon_key: &str) -> String {
    let ws_base = project_url
        .replace("https://", "wss://")
        .replace("http://", "ws://");
    format!("{}/realtime/v1/websocket?apikey={}&vsn=1.0.0", ws_base, anon_key)
}

#[derive(Serialize)]
struct OutboundFrame<'a> {
    topic: &'a str,
    event: &'a str,
    payload: Value,
    #[serde(rename = "ref")]
    frame_ref: String,
}

/// Join frame subscribing to all postgres changes on the BinStatus table.
pub fn join_frame(frame_ref: u64) -> String {
    let frame = OutboundFrame {
        topic: CHANNEL_TOPIC,
        event: "phx_join",
        payload: json!({
            "config": {
                "postgres_changes": [
                    { "event": "*", "schema": "public", "table": "BinStatus" }
                ]
            }
        }),
        frame_ref: frame_ref.to_string(),
    };
    serde_json::to_string(&frame).unwrap_or_default()
}

pub fn heartbeat_frame(frame_ref: u64) -> String {
    let frame = OutboundFrame {
        topic: "phoenix",
        event: "heartbeat",
        payload: json!({}),
        frame_ref: frame_ref.to_string(),
    };
    serde_json::to_string(&frame).unwrap_or_default()
}

/// Decoded inbound frame, reduced to what the reconciler cares about.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedMessage {
    /// The join was acknowledged; the feed is live.
    JoinedOk,
    /// The join (or another request) was refused.
    ReplyError(String),
    /// A row-level change on the subscribed table.
    Change(ChangeEvent),
    /// Heartbeat replies and other frames the reconciler ignores.
    Ignored,
}

#[derive(Deserialize)]
struct InboundFrame {
    #[serde(default)]
    topic: String,
    event: String,
    #[serde(default)]
    payload: Value,
}

/// Decode one inbound text frame.
pub fn decode_frame(text: &str) -> Result<FeedMessage, String> {
    let frame: InboundFrame =
        serde_json::from_str(text).map_err(|e| format!("bad frame: {}", e))?;

    match frame.event.as_str() {
        "phx_reply" => {
            let status = frame.payload["status"].as_str().unwrap_or("");
            if frame.topic == "phoenix" {
                // Heartbeat acknowledgement.
                Ok(FeedMessage::Ignored)
            } else if status == "ok" {
                Ok(FeedMessage::JoinedOk)
            } else {
                let reason = frame.payload["response"]["reason"]
                    .as_str()
                    .unwrap_or("subscription refused")
                    .to_string();
                Ok(FeedMessage::ReplyError(reason))
            }
        }
        "postgres_changes" => decode_change(&frame.payload).map(FeedMessage::Change),
        "phx_close" | "phx_error" => Ok(FeedMessage::ReplyError(format!(
            "channel closed: {}",
            frame.event
        ))),
        _ => Ok(FeedMessage::Ignored),
    }
}

fn decode_change(payload: &Value) -> Result<ChangeEvent, String> {
    let data = &payload["data"];
    let kind = data["type"].as_str().ok_or("change without type")?;

    match kind {
        "INSERT" => {
            let record: BinStatusRecord = serde_json::from_value(data["record"].clone())
                .map_err(|e| format!("bad insert record: {}", e))?;
            Ok(ChangeEvent::Insert(record))
        }
        "UPDATE" => {
            let record: BinStatusRecord = serde_json::from_value(data["record"].clone())
                .map_err(|e| format!("bad update record: {}", e))?;
            Ok(ChangeEvent::Update(record))
        }
        "DELETE" => {
            // Deletes may carry only the replica-identity columns.
            let id = data["old_record"]["id"]
                .as_i64()
                .ok_or("delete without old record id")?;
            Ok(ChangeEvent::Delete { id })
        }
        other => Err(format!("unknown change type: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_json(id: i64) -> Value {
        json!({
            "id": id,
            "created_at": "2026-08-30T09:00:00+00:00",
            "BinId": "BIN-001",
            "BinVersion": "mark3",
            "BinStatus": "ACTIVE",
            "SubBin1": 10, "SubBin2": 20, "SubBin3": 30, "SubBin4": 40,
            "ErrorCodes": null,
            "User_id": "user-1",
            "Total_fill_level": 25
        })
    }

    #[test]
    fn join_frame_targets_the_binstatus_table() {
        let frame: Value = serde_json::from_str(&join_frame(1)).unwrap();
        assert_eq!(frame["topic"], CHANNEL_TOPIC);
        assert_eq!(frame["event"], "phx_join");
        assert_eq!(
            frame["payload"]["config"]["postgres_changes"][0]["table"],
            "BinStatus"
        );
        assert_eq!(frame["ref"], "1");
    }

    #[test]
    fn join_reply_ok_marks_connected() {
        let text = json!({
            "topic": CHANNEL_TOPIC,
            "event": "phx_reply",
            "payload": { "status": "ok", "response": {} },
            "ref": "1"
        })
        .to_string();
        assert_eq!(decode_frame(&text).unwrap(), FeedMessage::JoinedOk);
    }

    #[test]
    fn heartbeat_reply_is_ignored() {
        let text = json!({
            "topic": "phoenix",
            "event": "phx_reply",
            "payload": { "status": "ok" },
            "ref": "2"
        })
        .to_string();
        assert_eq!(decode_frame(&text).unwrap(), FeedMessage::Ignored);
    }

    #[test]
    fn insert_frame_decodes_to_a_prepend() {
        let text = json!({
            "topic": CHANNEL_TOPIC,
            "event": "postgres_changes",
            "payload": { "data": { "type": "INSERT", "record": record_json(5) } },
            "ref": null
        })
        .to_string();
        match decode_frame(&text).unwrap() {
            FeedMessage::Change(ChangeEvent::Insert(rec)) => assert_eq!(rec.id, 5),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn update_frame_carries_the_new_row() {
        let text = json!({
            "topic": CHANNEL_TOPIC,
            "event": "postgres_changes",
            "payload": { "data": {
                "type": "UPDATE",
                "record": record_json(5),
                "old_record": { "id": 5 }
            } },
        })
        .to_string();
        match decode_frame(&text).unwrap() {
            FeedMessage::Change(ChangeEvent::Update(rec)) => {
                assert_eq!(rec.bin_status, "ACTIVE");
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn delete_frame_only_needs_the_old_id() {
        let text = json!({
            "topic": CHANNEL_TOPIC,
            "event": "postgres_changes",
            "payload": { "data": { "type": "DELETE", "old_record": { "id": 9 } } },
        })
        .to_string();
        assert_eq!(
            decode_frame(&text).unwrap(),
            FeedMessage::Change(ChangeEvent::Delete { id: 9 })
        );
    }

    #[test]
    fn refused_join_surfaces_the_reason() {
        let text = json!({
            "topic": CHANNEL_TOPIC,
            "event": "phx_reply",
            "payload": { "status": "error", "response": { "reason": "invalid key" } },
        })
        .to_string();
        assert_eq!(
            decode_frame(&text).unwrap(),
            FeedMessage::ReplyError("invalid key".to_string())
        );
    }

    #[test]
    fn realtime_url_upgrades_the_scheme() {
        let url = realtime_url("https://smartbin-demo.supabase.co", "anon");
        assert!(url.starts_with("wss://smartbin-demo.supabase.co/realtime/v1/websocket"));
        assert!(url.contains("apikey=anon"));
    }
}
