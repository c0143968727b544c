//! Wire protocol for Buzzboard.
//!
//! This crate defines the "language" that the buzzer clients and the server
//! speak:
//!
//! - **Types** ([`ClientEvent`], [`ServerEvent`], [`RoomSnapshot`], etc.) —
//!   the event structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how events are converted
//!   to/from text frames.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw frames) and the room
//! (game state). It doesn't know about connections or scores — it only
//! knows how to serialize and deserialize events.
//!
//! ```text
//! Transport (frames) → Protocol (events) → Room (state machine)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ClientEvent, ConnectionId, PlayerEntry, RoomSnapshot, ScoreChange,
    ServerEvent, Winner,
};
