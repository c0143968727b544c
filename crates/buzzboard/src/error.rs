//! Unified error type for the Buzzboard server.

use buzzboard_protocol::ProtocolError;
use buzzboard_room::RoomError;
use buzzboard_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum BuzzboardError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid frame).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A room-level error (actor gone, unknown player).
    #[error(transparent)]
    Room(#[from] RoomError),
}
