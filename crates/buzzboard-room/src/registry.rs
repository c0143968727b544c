//! Connection registry: maps connection ids to player identity and score.
//!
//! This is a leaf data store. It knows nothing about rounds or winners —
//! clearing round state when a player disappears is the dispatcher's job.

use buzzboard_protocol::{ConnectionId, PlayerEntry};

use crate::RoomError;

/// A registered player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: ConnectionId,
    pub nick: String,
    pub score: i64,
}

/// Insertion-ordered player store.
///
/// Backed by a `Vec` rather than a map: the room holds a handful of
/// players, and join order must be preserved so every snapshot lists
/// players in the same order.
#[derive(Debug, Default)]
pub struct Registry {
    players: Vec<Player>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection as a player, or updates its nickname if it
    /// is already registered.
    ///
    /// The raw nickname is trimmed; if nothing remains (or none was sent),
    /// a default derived from the connection id is used — the same default
    /// every time, so repeated blank joins don't rename the player. A
    /// rejoin never touches the score.
    pub fn join(&mut self, id: ConnectionId, nick_raw: Option<&str>) {
        let nick = nick_raw
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("Player-{}", id.0));

        match self.get_mut(id) {
            Some(player) => player.nick = nick,
            None => self.players.push(Player { id, nick, score: 0 }),
        }
    }

    /// Looks up a player by connection id.
    pub fn get(&self, id: ConnectionId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: ConnectionId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Removes a player. Returns `true` if they were registered.
    pub fn remove(&mut self, id: ConnectionId) -> bool {
        match self.players.iter().position(|p| p.id == id) {
            Some(idx) => {
                self.players.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Adds `delta` (which may be negative) to a player's score and
    /// returns the new total.
    ///
    /// # Errors
    /// Returns [`RoomError::UnknownPlayer`] if the id is not registered.
    pub fn adjust_score(
        &mut self,
        id: ConnectionId,
        delta: i64,
    ) -> Result<i64, RoomError> {
        let player =
            self.get_mut(id).ok_or(RoomError::UnknownPlayer(id))?;
        player.score += delta;
        Ok(player.score)
    }

    /// Sets every player's score back to zero. Identities and join order
    /// are untouched.
    pub fn reset_all_scores(&mut self) {
        for player in &mut self.players {
            player.score = 0;
        }
    }

    /// Returns all players in join order, as wire entries for a snapshot.
    pub fn entries(&self) -> Vec<PlayerEntry> {
        self.players
            .iter()
            .map(|p| PlayerEntry {
                id: p.id,
                nick: p.nick.clone(),
                score: p.score,
            })
            .collect()
    }

    /// Returns the number of registered players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if no players are registered.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
