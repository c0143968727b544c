//! Authoritative room state for the buzzer game.
//!
//! The room is the single source of truth: who is playing, whether the
//! buzzer is open, who pressed first, and everyone's score. It is split
//! into three layers:
//!
//! - [`Registry`]: insertion-ordered player store (identity + score).
//! - [`Round`]: the buzzer state machine (closed / open / won).
//! - [`RoomHandle`] / [`spawn_room`]: the actor that owns both, applies
//!   inbound events one at a time, and fans broadcasts out to every
//!   connected party.
//!
//! All mutation flows through the actor task, so event handling is
//! run-to-completion: a press either finds the buzzer open and wins, or
//! finds it already claimed and is dropped. There is no window in which
//! two presses can both succeed.

mod error;
mod registry;
mod room;
mod round;

pub use error::RoomError;
pub use registry::{Player, Registry};
pub use room::{
    spawn_room, EventSender, RoomHandle, DEFAULT_AWARD, DEFAULT_PENALTY,
};
pub use round::{Round, RoundPhase};
