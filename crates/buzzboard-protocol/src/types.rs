//! Core protocol types for Buzzboard's wire format.
//!
//! Every structure in this module travels "on the wire": it gets serialized
//! to a JSON text frame, sent over the connection, and deserialized on the
//! other side. Events are tagged by name, so a frame always looks like
//!
//! ```text
//! { "event": "buzzer:press" }
//! { "event": "player:join", "data": "Alice" }
//! { "event": "state:update", "data": { "isOpen": true, ... } }
//! ```
//!
//! The `event` tag is the discriminant; `data` carries the typed payload
//! (omitted for events that have none). A payload that fails to match its
//! schema makes the whole frame undecodable — the server drops such frames
//! instead of guessing at their meaning.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A unique identifier for a connection.
///
/// Newtype over `u64` so a connection id can't be confused with a score or
/// any other number in a signature. Stable for the lifetime of one
/// connection; a reconnecting client gets a fresh id.
///
/// `#[serde(transparent)]` makes this serialize as the bare number, so a
/// `ConnectionId(42)` is just `42` in JSON — which is also how it appears
/// inside snapshots and the `host:kick` payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// The press winner of the current round: connection id plus the nickname
/// as it was at press time. The nick is a copy, not a live reference — a
/// later rename does not rewrite who won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub id: ConnectionId,
    pub nick: String,
}

/// One player row inside a [`RoomSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub id: ConnectionId,
    pub nick: String,
    pub score: i64,
}

/// Payload of `score:changed`: the winner's id and their new total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreChange {
    pub id: ConnectionId,
    pub score: i64,
}

/// The full, derived room state sent to clients.
///
/// Always transmitted whole — no diffing. `players` is in join order so
/// clients see a stable list across updates. Wire shape:
///
/// ```text
/// { "isOpen": false,
///   "winner": { "id": 3, "nick": "Alice" },   // or null
///   "players": [ { "id": 3, "nick": "Alice", "score": 10 }, ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub is_open: bool,
    pub winner: Option<Winner>,
    pub players: Vec<PlayerEntry>,
}

// ---------------------------------------------------------------------------
// Client → server events
// ---------------------------------------------------------------------------

/// Events a client may send.
///
/// `#[serde(tag = "event", content = "data")]` produces the adjacently
/// tagged form shown in the module docs. Host events carry no privilege
/// check — any connection may issue them (trusted-LAN deployment boundary).
///
/// An absent nickname is sent as `"data": null`; the registry substitutes a
/// deterministic default. Award/penalize points likewise default (10 / 5)
/// when the payload is null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Register as a player (or update the nickname if already joined).
    #[serde(rename = "player:join")]
    Join(Option<String>),

    /// Race for the open buzzer. No payload — the sender's connection id
    /// is the contender.
    #[serde(rename = "buzzer:press")]
    Press,

    /// Host: open a new round, discarding any previous winner.
    #[serde(rename = "host:open")]
    Open,

    /// Host: close the round manually without declaring a winner.
    #[serde(rename = "host:close")]
    Close,

    /// Host: add points to the current winner's score (default 10).
    #[serde(rename = "host:award")]
    Award(Option<i64>),

    /// Host: subtract points from the current winner's score (default 5).
    #[serde(rename = "host:penalize")]
    Penalize(Option<i64>),

    /// Host: zero every player's score.
    #[serde(rename = "host:resetScores")]
    ResetScores,

    /// Host: remove a player by connection id.
    #[serde(rename = "host:kick")]
    Kick(ConnectionId),
}

// ---------------------------------------------------------------------------
// Server → client events
// ---------------------------------------------------------------------------

/// Events the server emits.
///
/// `state:init` goes to the joining connection only; everything else is
/// broadcast to every connected party. A `state:update` follows every
/// state-mutating client event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Full snapshot for a connection that just joined.
    #[serde(rename = "state:init")]
    StateInit(RoomSnapshot),

    /// Full snapshot after any mutation.
    #[serde(rename = "state:update")]
    StateUpdate(RoomSnapshot),

    /// A press was accepted; this round has its winner.
    #[serde(rename = "buzzer:winner")]
    Winner(Winner),

    /// The host opened a round.
    #[serde(rename = "buzzer:open")]
    BuzzerOpen,

    /// The host closed the round manually.
    #[serde(rename = "buzzer:close")]
    BuzzerClose,

    /// The winner's score changed.
    #[serde(rename = "score:changed")]
    ScoreChanged(ScoreChange),

    /// All scores were reset to zero.
    #[serde(rename = "score:reset")]
    ScoreReset,

    /// A player was removed by the host.
    #[serde(rename = "player:kicked")]
    PlayerKicked(ConnectionId),
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Tests for protocol types and their JSON serialization.
    //!
    //! The event names and payload shapes are the contract with the web
    //! client. These tests pin the exact JSON forms, because a mismatch
    //! means the client silently stops understanding the server.

    use super::*;

    // =====================================================================
    // ConnectionId
    // =====================================================================

    #[test]
    fn test_connection_id_serializes_as_plain_number() {
        // `#[serde(transparent)]` means ConnectionId(42) → `42`.
        let json = serde_json::to_string(&ConnectionId(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn test_connection_id_deserializes_from_plain_number() {
        let id: ConnectionId = serde_json::from_str("42").unwrap();
        assert_eq!(id, ConnectionId(42));
    }

    #[test]
    fn test_connection_id_display() {
        assert_eq!(ConnectionId(7).to_string(), "conn-7");
    }

    // =====================================================================
    // ClientEvent — one test per wire shape
    // =====================================================================

    #[test]
    fn test_join_with_nickname_json_format() {
        let ev = ClientEvent::Join(Some("Alice".into()));
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "player:join");
        assert_eq!(json["data"], "Alice");
    }

    #[test]
    fn test_join_without_nickname_json_format() {
        let ev = ClientEvent::Join(None);
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "player:join");
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_press_has_no_data_field() {
        // Unit variants omit the content key entirely.
        let json = serde_json::to_string(&ClientEvent::Press).unwrap();
        assert_eq!(json, r#"{"event":"buzzer:press"}"#);
    }

    #[test]
    fn test_press_decodes_without_data_field() {
        let ev: ClientEvent =
            serde_json::from_str(r#"{"event":"buzzer:press"}"#).unwrap();
        assert_eq!(ev, ClientEvent::Press);
    }

    #[test]
    fn test_host_open_close_round_trip() {
        for ev in [ClientEvent::Open, ClientEvent::Close] {
            let text = serde_json::to_string(&ev).unwrap();
            let decoded: ClientEvent = serde_json::from_str(&text).unwrap();
            assert_eq!(ev, decoded);
        }
    }

    #[test]
    fn test_award_with_points_json_format() {
        let ev = ClientEvent::Award(Some(25));
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "host:award");
        assert_eq!(json["data"], 25);
    }

    #[test]
    fn test_penalize_defaulting_payload_is_null() {
        let ev = ClientEvent::Penalize(None);
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "host:penalize");
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_reset_scores_event_name() {
        let json = serde_json::to_string(&ClientEvent::ResetScores).unwrap();
        assert_eq!(json, r#"{"event":"host:resetScores"}"#);
    }

    #[test]
    fn test_kick_carries_connection_id() {
        let ev = ClientEvent::Kick(ConnectionId(9));
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "host:kick");
        assert_eq!(json["data"], 9);

        let decoded: ClientEvent =
            serde_json::from_str(r#"{"event":"host:kick","data":9}"#).unwrap();
        assert_eq!(decoded, ev);
    }

    // =====================================================================
    // ServerEvent
    // =====================================================================

    fn sample_snapshot() -> RoomSnapshot {
        RoomSnapshot {
            is_open: false,
            winner: Some(Winner {
                id: ConnectionId(3),
                nick: "Alice".into(),
            }),
            players: vec![PlayerEntry {
                id: ConnectionId(3),
                nick: "Alice".into(),
                score: 10,
            }],
        }
    }

    #[test]
    fn test_state_update_json_format() {
        let ev = ServerEvent::StateUpdate(sample_snapshot());
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();

        assert_eq!(json["event"], "state:update");
        assert_eq!(json["data"]["isOpen"], false);
        assert_eq!(json["data"]["winner"]["id"], 3);
        assert_eq!(json["data"]["winner"]["nick"], "Alice");
        assert_eq!(json["data"]["players"][0]["score"], 10);
    }

    #[test]
    fn test_state_init_uses_same_snapshot_shape() {
        let ev = ServerEvent::StateInit(sample_snapshot());
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "state:init");
        assert_eq!(json["data"]["players"][0]["nick"], "Alice");
    }

    #[test]
    fn test_snapshot_without_winner_serializes_null() {
        let snap = RoomSnapshot {
            is_open: true,
            winner: None,
            players: vec![],
        };
        let json: serde_json::Value = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["isOpen"], true);
        assert!(json["winner"].is_null());
        assert_eq!(json["players"], serde_json::json!([]));
    }

    #[test]
    fn test_winner_event_json_format() {
        let ev = ServerEvent::Winner(Winner {
            id: ConnectionId(5),
            nick: "Bob".into(),
        });
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "buzzer:winner");
        assert_eq!(json["data"]["id"], 5);
        assert_eq!(json["data"]["nick"], "Bob");
    }

    #[test]
    fn test_buzzer_open_close_event_names() {
        assert_eq!(
            serde_json::to_string(&ServerEvent::BuzzerOpen).unwrap(),
            r#"{"event":"buzzer:open"}"#
        );
        assert_eq!(
            serde_json::to_string(&ServerEvent::BuzzerClose).unwrap(),
            r#"{"event":"buzzer:close"}"#
        );
    }

    #[test]
    fn test_score_changed_json_format() {
        let ev = ServerEvent::ScoreChanged(ScoreChange {
            id: ConnectionId(3),
            score: -5,
        });
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "score:changed");
        assert_eq!(json["data"]["id"], 3);
        assert_eq!(json["data"]["score"], -5);
    }

    #[test]
    fn test_score_reset_round_trip() {
        let text = serde_json::to_string(&ServerEvent::ScoreReset).unwrap();
        let decoded: ServerEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, ServerEvent::ScoreReset);
    }

    #[test]
    fn test_player_kicked_json_format() {
        let ev = ServerEvent::PlayerKicked(ConnectionId(4));
        let json: serde_json::Value = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["event"], "player:kicked");
        assert_eq!(json["data"], 4);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let snap = sample_snapshot();
        let text = serde_json::to_string(&snap).unwrap();
        let decoded: RoomSnapshot = serde_json::from_str(&text).unwrap();
        assert_eq!(snap, decoded);
    }

    // =====================================================================
    // Error cases — malformed input
    // =====================================================================

    #[test]
    fn test_decode_garbage_returns_error() {
        let result: Result<ClientEvent, _> =
            serde_json::from_str("not json at all");
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_unknown_event_returns_error() {
        let result: Result<ClientEvent, _> =
            serde_json::from_str(r#"{"event":"host:explode"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_wrong_payload_type_returns_error() {
        // `host:kick` requires a numeric connection id, not a string.
        let result: Result<ClientEvent, _> =
            serde_json::from_str(r#"{"event":"host:kick","data":"three"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_server_event_unknown_tag_returns_error() {
        let result: Result<ServerEvent, _> =
            serde_json::from_str(r#"{"event":"state:diff","data":{}}"#);
        assert!(result.is_err());
    }
}
