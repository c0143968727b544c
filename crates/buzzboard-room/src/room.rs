//! Room actor: a single Tokio task that owns the authoritative room state.
//!
//! The registry, the round, and the outbound senders all live inside one
//! task, fed by an mpsc channel. Every command is handled to completion
//! before the next is taken, which is the whole concurrency story: two
//! "simultaneous" presses arrive as two queued commands, and only the
//! first finds the buzzer open. No locks, no partial transitions.

use std::collections::HashMap;

use buzzboard_protocol::{
    ClientEvent, ConnectionId, RoomSnapshot, ScoreChange, ServerEvent, Winner,
};
use tokio::sync::{mpsc, oneshot};

use crate::{Registry, RoomError, Round};

/// Points added by `host:award` when the payload is null.
pub const DEFAULT_AWARD: i64 = 10;

/// Points removed by `host:penalize` when the payload is null.
pub const DEFAULT_PENALTY: i64 = 5;

/// Channel sender for delivering outbound events to one connection.
pub type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to the room actor through its channel.
pub(crate) enum RoomCommand {
    /// A connection came online and can receive broadcasts from now on.
    /// Connected is not joined: the connection only becomes a player once
    /// it sends `player:join`.
    Connect {
        id: ConnectionId,
        sender: EventSender,
    },

    /// An inbound event from a connection.
    Event {
        id: ConnectionId,
        event: ClientEvent,
    },

    /// The connection went away. Removes the player (if joined) and
    /// clears round state if they were the winner.
    Disconnect { id: ConnectionId },

    /// Request the current snapshot. Also serves as a barrier in tests:
    /// the reply arrives only after every previously queued command has
    /// been handled.
    Snapshot {
        reply: oneshot::Sender<RoomSnapshot>,
    },
}

/// Handle to the running room actor. Cheap to clone; every connection
/// handler holds one. This is the explicit singleton handle to the one
/// room in the process — there is no ambient global state.
#[derive(Clone)]
pub struct RoomHandle {
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    /// Registers a connection's outbound channel with the room.
    pub async fn connect(
        &self,
        id: ConnectionId,
        sender: EventSender,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Connect { id, sender })
            .await
            .map_err(|_| RoomError::Unavailable)
    }

    /// Delivers an inbound event to the room (fire-and-forget).
    pub async fn event(
        &self,
        id: ConnectionId,
        event: ClientEvent,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Event { id, event })
            .await
            .map_err(|_| RoomError::Unavailable)
    }

    /// Tells the room a connection is gone.
    pub async fn disconnect(&self, id: ConnectionId) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Disconnect { id })
            .await
            .map_err(|_| RoomError::Unavailable)
    }

    /// Requests the current room snapshot.
    pub async fn snapshot(&self) -> Result<RoomSnapshot, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable)?;
        reply_rx.await.map_err(|_| RoomError::Unavailable)
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    registry: Registry,
    round: Round,
    /// Outbound channels for every connected party, joined or not.
    senders: HashMap<ConnectionId, EventSender>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop until every handle is dropped.
    async fn run(mut self) {
        tracing::info!("room actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                RoomCommand::Connect { id, sender } => {
                    tracing::debug!(%id, "connection online");
                    self.senders.insert(id, sender);
                }
                RoomCommand::Event { id, event } => {
                    self.handle_event(id, event);
                }
                RoomCommand::Disconnect { id } => {
                    self.handle_disconnect(id);
                }
                RoomCommand::Snapshot { reply } => {
                    let _ = reply.send(self.snapshot());
                }
            }
        }

        tracing::info!("room actor stopped");
    }

    /// Dispatches one inbound event. Invalid or stale commands (press
    /// while closed, award with no winner, kick of an unknown id, …) are
    /// silent no-ops: no state change, no broadcast.
    fn handle_event(&mut self, id: ConnectionId, event: ClientEvent) {
        match event {
            ClientEvent::Join(nick) => self.handle_join(id, nick.as_deref()),
            ClientEvent::Press => self.handle_press(id),
            ClientEvent::Open => {
                self.round.open();
                tracing::info!(%id, "round opened");
                self.broadcast(ServerEvent::BuzzerOpen);
                self.broadcast_state();
            }
            ClientEvent::Close => {
                self.round.close();
                tracing::info!(%id, "round closed manually");
                self.broadcast(ServerEvent::BuzzerClose);
                self.broadcast_state();
            }
            ClientEvent::Award(points) => {
                self.adjust_winner_score(points.unwrap_or(DEFAULT_AWARD));
            }
            ClientEvent::Penalize(points) => {
                self.adjust_winner_score(-points.unwrap_or(DEFAULT_PENALTY));
            }
            ClientEvent::ResetScores => {
                self.registry.reset_all_scores();
                tracing::info!(%id, "scores reset");
                self.broadcast(ServerEvent::ScoreReset);
                self.broadcast_state();
            }
            ClientEvent::Kick(target) => self.handle_kick(id, target),
        }
    }

    fn handle_join(&mut self, id: ConnectionId, nick_raw: Option<&str>) {
        self.registry.join(id, nick_raw);

        let nick = self.registry.get(id).map(|p| p.nick.clone());
        tracing::info!(
            %id,
            nick = nick.as_deref().unwrap_or_default(),
            players = self.registry.len(),
            "player joined"
        );

        self.send_to(id, ServerEvent::StateInit(self.snapshot()));
        self.broadcast_state();
    }

    fn handle_press(&mut self, id: ConnectionId) {
        let Some(player) = self.registry.get(id) else {
            tracing::debug!(%id, "press from unregistered connection, ignoring");
            return;
        };
        let nick = player.nick.clone();

        if !self.round.attempt_press(id, &nick) {
            tracing::debug!(%id, phase = %self.round.phase(), "press rejected");
            return;
        }

        tracing::info!(%id, %nick, "press accepted, round won");
        self.broadcast(ServerEvent::Winner(Winner { id, nick }));
        self.broadcast_state();
    }

    /// Applies a score delta to the current winner. No-op without one.
    fn adjust_winner_score(&mut self, delta: i64) {
        let Some(winner_id) = self.round.winner().map(|w| w.id) else {
            tracing::debug!("score change with no winner, ignoring");
            return;
        };

        // The winner always references a registered player (removal
        // clears the winner), so this only fails if that invariant is
        // broken elsewhere.
        match self.registry.adjust_score(winner_id, delta) {
            Ok(score) => {
                tracing::info!(id = %winner_id, delta, score, "score changed");
                self.broadcast(ServerEvent::ScoreChanged(ScoreChange {
                    id: winner_id,
                    score,
                }));
                self.broadcast_state();
            }
            Err(e) => {
                tracing::warn!(id = %winner_id, error = %e, "winner not in registry");
            }
        }
    }

    fn handle_kick(&mut self, by: ConnectionId, target: ConnectionId) {
        if !self.registry.remove(target) {
            tracing::debug!(%target, "kick of unknown player, ignoring");
            return;
        }

        // Removal of the winner must also clear round state, atomically
        // from the clients' point of view: one broadcast covers both.
        self.round.clear_winner_if(target);

        tracing::info!(%target, %by, "player kicked");
        self.broadcast(ServerEvent::PlayerKicked(target));
        self.broadcast_state();
    }

    fn handle_disconnect(&mut self, id: ConnectionId) {
        self.senders.remove(&id);

        if self.registry.remove(id) {
            self.round.clear_winner_if(id);
            tracing::info!(%id, players = self.registry.len(), "player disconnected");
            self.broadcast_state();
        } else {
            tracing::debug!(%id, "connection closed without joining");
        }
    }

    /// Computes the full derived room state. Pure read of registry +
    /// round; join order comes from the registry.
    fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            is_open: self.round.is_open(),
            winner: self.round.winner().cloned(),
            players: self.registry.entries(),
        }
    }

    /// Broadcasts the current snapshot to everyone. Called after every
    /// state-mutating event; always the full snapshot, never a diff.
    fn broadcast_state(&self) {
        self.broadcast(ServerEvent::StateUpdate(self.snapshot()));
    }

    /// Fans an event out to every connected party.
    fn broadcast(&self, event: ServerEvent) {
        for sender in self.senders.values() {
            let _ = sender.send(event.clone());
        }
    }

    /// Sends an event to a single connection. Silently drops if the
    /// receiver is gone.
    fn send_to(&self, id: ConnectionId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&id) {
            let _ = sender.send(event);
        }
    }
}

/// Spawns the room actor task and returns a handle to communicate with it.
///
/// `channel_size` bounds the command queue; when it fills, senders wait,
/// which gives natural backpressure per connection.
pub fn spawn_room(channel_size: usize) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = RoomActor {
        registry: Registry::new(),
        round: Round::new(),
        senders: HashMap::new(),
        receiver: rx,
    };

    tokio::spawn(actor.run());

    RoomHandle { sender: tx }
}
