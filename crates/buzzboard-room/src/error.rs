//! Room error types.

use buzzboard_protocol::ConnectionId;
use thiserror::Error;

/// Errors produced by the room.
#[derive(Debug, Error)]
pub enum RoomError {
    /// A score operation named a connection id with no registered player.
    #[error("player {0} is not registered")]
    UnknownPlayer(ConnectionId),

    /// The room actor is no longer running.
    #[error("room is unavailable")]
    Unavailable,
}
