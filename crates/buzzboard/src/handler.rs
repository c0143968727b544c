//! Per-connection handler: bridges one WebSocket to the room actor.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Register an outbound channel with the room
//!   2. Spawn a writer task: room events → encode → socket
//!   3. Loop: socket frames → decode → room
//!   4. On exit (for any reason), tell the room the connection is gone

use std::sync::Arc;

use buzzboard_protocol::{ClientEvent, Codec, ConnectionId, JsonCodec};
use buzzboard_room::RoomHandle;
use buzzboard_transport::{Connection, WebSocketConnection};
use tokio::sync::mpsc;

use crate::BuzzboardError;

/// Drop guard that removes the connection from the room when the handler
/// exits. This ensures cleanup happens even if the handler panics. Since
/// `Drop` is synchronous, we spawn a fire-and-forget task for the async
/// send.
struct DisconnectGuard {
    id: ConnectionId,
    room: RoomHandle,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        let id = self.id;
        let room = self.room.clone();
        tokio::spawn(async move {
            let _ = room.disconnect(id).await;
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection(
    conn: WebSocketConnection,
    room: RoomHandle,
    codec: JsonCodec,
) -> Result<(), BuzzboardError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    room.connect(conn_id, event_tx).await?;
    let _guard = DisconnectGuard {
        id: conn_id,
        room: room.clone(),
    };

    // --- Writer task: room broadcasts out to the socket ---
    // Ends when the room drops our sender (after disconnect) or the
    // socket refuses a write.
    let conn = Arc::new(conn);
    let writer_conn = Arc::clone(&conn);
    let writer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let text = match codec.encode(&event) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(%conn_id, error = %e, "failed to encode event");
                    continue;
                }
            };
            if let Err(e) = writer_conn.send(&text).await {
                tracing::debug!(%conn_id, error = %e, "send failed, stopping writer");
                break;
            }
        }
    });

    // --- Reader loop: socket frames in to the room ---
    loop {
        let text = match conn.recv().await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        };

        // Frames that don't parse as a known event are dropped, not
        // fatal: one confused client must not take its connection down
        // mid-game.
        let event: ClientEvent = match codec.decode(&text) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "ignoring undecodable frame");
                continue;
            }
        };

        room.event(conn_id, event).await?;
    }

    // _guard drops here → room disconnect fires → the room drops our
    // sender → the writer task ends.
    drop(_guard);
    let _ = writer.await;

    Ok(())
}
