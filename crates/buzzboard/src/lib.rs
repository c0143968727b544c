//! # Buzzboard
//!
//! Real-time party buzzer server over WebSockets.
//!
//! One process hosts one room. Players connect, pick a nickname, and race
//! to press the buzzer when the host opens a round; the server decides
//! who pressed first and keeps the scores. All state lives server-side
//! and every client receives the full room snapshot after each change,
//! so a freshly joined (or confused) client is always one broadcast away
//! from the truth.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use buzzboard::BuzzboardServer;
//!
//! # async fn run() -> Result<(), buzzboard::BuzzboardError> {
//! let server = BuzzboardServer::builder()
//!     .bind("0.0.0.0:3000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod handler;
mod server;

pub use error::BuzzboardError;
pub use server::{BuzzboardServer, BuzzboardServerBuilder};

pub use buzzboard_protocol::{
    ClientEvent, ConnectionId, PlayerEntry, RoomSnapshot, ServerEvent, Winner,
};
pub use buzzboard_room::RoomHandle;
