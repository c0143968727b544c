//! Round state machine: whether the buzzer is open, and who won.

use buzzboard_protocol::{ConnectionId, Winner};

/// The reachable round states.
///
/// There are exactly three — open-with-winner does not exist, because an
/// accepted press closes the buzzer in the same transition:
///
/// ```text
/// Closed ──open()──▶ Open ──attempt_press()──▶ Won
///    ▲                 │                        │
///    └────close()──────┘        open() clears the winner again
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Buzzer closed, no winner declared.
    Closed,
    /// Buzzer open, racing for the first press.
    Open,
    /// Buzzer closed with a winner (the round was decided by a press).
    Won,
}

impl RoundPhase {
    /// Returns `true` if a press could currently be accepted.
    pub fn accepts_press(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl std::fmt::Display for RoundPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::Open => write!(f, "Open"),
            Self::Won => write!(f, "Won"),
        }
    }
}

/// Tracks the current round: the open flag plus the optional winner.
///
/// Invariant: a winner is only ever set while transitioning to closed, so
/// `is_open && winner.is_some()` never holds.
#[derive(Debug, Default)]
pub struct Round {
    is_open: bool,
    winner: Option<Winner>,
}

impl Round {
    /// Creates a closed round with no winner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the buzzer is open.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Returns the current winner, if the round has been decided.
    pub fn winner(&self) -> Option<&Winner> {
        self.winner.as_ref()
    }

    /// Returns the current phase.
    pub fn phase(&self) -> RoundPhase {
        match (self.is_open, &self.winner) {
            (true, _) => RoundPhase::Open,
            (false, Some(_)) => RoundPhase::Won,
            (false, None) => RoundPhase::Closed,
        }
    }

    /// Starts a new round. Allowed from any state; a previous winner is
    /// discarded.
    pub fn open(&mut self) {
        self.is_open = true;
        self.winner = None;
    }

    /// Closes the buzzer without declaring a winner. An existing winner
    /// (from a press earlier in this round) is preserved; only the open
    /// flag changes.
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Attempts to claim the open buzzer for `id`.
    ///
    /// Accepted only while open with no winner; the winner's nickname is
    /// captured at this moment. Acceptance closes the buzzer in the same
    /// transition. Returns `false` (and changes nothing) otherwise.
    ///
    /// The caller is responsible for checking that `id` is a registered
    /// player — this type has no view of the registry.
    pub fn attempt_press(&mut self, id: ConnectionId, nick: &str) -> bool {
        if !self.is_open || self.winner.is_some() {
            return false;
        }
        self.winner = Some(Winner {
            id,
            nick: nick.to_owned(),
        });
        self.is_open = false;
        true
    }

    /// Clears the winner and closes the buzzer if `id` is the current
    /// winner; no-op otherwise. Returns `true` if state was cleared.
    ///
    /// Used when the winning player is kicked or disconnects, so the
    /// round never references a player that no longer exists.
    pub fn clear_winner_if(&mut self, id: ConnectionId) -> bool {
        if self.winner.as_ref().is_some_and(|w| w.id == id) {
            self.winner = None;
            self.is_open = false;
            true
        } else {
            false
        }
    }
}
