//! `BuzzboardServer` builder and accept loop.
//!
//! This is the entry point for running a buzzer server. It ties together
//! all the layers: transport → protocol → room.

use buzzboard_protocol::JsonCodec;
use buzzboard_room::{spawn_room, RoomHandle};
use buzzboard_transport::{Transport, WebSocketTransport};

use crate::handler::handle_connection;
use crate::BuzzboardError;

/// Builder for configuring and starting a Buzzboard server.
///
/// # Example
///
/// ```rust,ignore
/// use buzzboard::BuzzboardServer;
///
/// let server = BuzzboardServer::builder()
///     .bind("0.0.0.0:3000")
///     .build()
///     .await?;
/// server.run().await
/// ```
pub struct BuzzboardServerBuilder {
    bind_addr: String,
    channel_size: usize,
}

impl BuzzboardServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            channel_size: 64,
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the capacity of the room's command queue.
    pub fn channel_size(mut self, size: usize) -> Self {
        self.channel_size = size;
        self
    }

    /// Builds the server: binds the listener and spawns the room actor.
    pub async fn build(self) -> Result<BuzzboardServer, BuzzboardError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;
        let room = spawn_room(self.channel_size);

        Ok(BuzzboardServer {
            transport,
            room,
            codec: JsonCodec,
        })
    }
}

impl Default for BuzzboardServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running buzzer server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct BuzzboardServer {
    transport: WebSocketTransport,
    room: RoomHandle,
    codec: JsonCodec,
}

impl BuzzboardServer {
    /// Creates a new builder.
    pub fn builder() -> BuzzboardServerBuilder {
        BuzzboardServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Returns a handle to the room, for inspecting state out of band.
    pub fn room(&self) -> RoomHandle {
        self.room.clone()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), BuzzboardError> {
        tracing::info!("buzzboard server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let room = self.room.clone();
                    let codec = self.codec;
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_connection(conn, room, codec).await
                        {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
