//! Room actor: an isolated Tokio task that owns one draft session.
//!
//! Each room runs in its own task, communicating with the outside world
//! through an mpsc channel. The actor is the session's single serializer:
//! commands and the 1-second clock tick are interleaved on one loop, so
//! the session itself never needs a lock.

use std::collections::HashMap;
use std::time::Duration;

use riftdraft_core::{DraftSession, ErrorKind};
use riftdraft_protocol::{
    ClientCommand, PlayerId, RoomCode, SessionPhase, SessionSnapshot,
};
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

use crate::RoomError;

/// An outbound message from the room actor to a player's connection
/// handler.
#[derive(Debug, Clone)]
pub enum RoomOutbound {
    /// Personalized session snapshot. Sent after every change the player
    /// is allowed to observe; already redacted for its recipient.
    Snapshot(SessionSnapshot),
    /// The player's own command was rejected. Sent to the initiator only.
    Rejected { kind: ErrorKind, message: String },
}

/// Channel sender for delivering outbound messages to a player.
pub type PlayerSender = mpsc::UnboundedSender<RoomOutbound>;

/// Commands sent to a room actor through its channel.
///
/// The `oneshot::Sender` in some variants is a reply channel: the caller
/// sends a command and awaits the response on it.
pub(crate) enum RoomCommand {
    Join {
        id: PlayerId,
        name: String,
        pool_filter: Option<std::collections::HashSet<String>>,
        sender: PlayerSender,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    Leave {
        id: PlayerId,
        reply: oneshot::Sender<LeaveInfo>,
    },
    /// A draft command from a player. Fire-and-forget; rejections go back
    /// through the player's outbound channel.
    Command { id: PlayerId, cmd: ClientCommand },
    GetInfo {
        reply: oneshot::Sender<RoomInfo>,
    },
    Shutdown,
}

/// Room metadata (not the session state itself).
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub code: RoomCode,
    pub phase: SessionPhase,
    pub host: Option<PlayerId>,
    pub player_count: usize,
}

/// What a leave did to the room. The manager uses `empty` to decide
/// whether to destroy the room.
#[derive(Debug, Clone, Copy)]
pub struct LeaveInfo {
    pub existed: bool,
    pub empty: bool,
}

/// Handle to a running room actor. Cheap to clone — it's just an
/// `mpsc::Sender` wrapper. The `RoomManager` holds one per room.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    /// Sends a join request to the room.
    pub async fn join(
        &self,
        id: PlayerId,
        name: String,
        pool_filter: Option<std::collections::HashSet<String>>,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                id,
                name,
                pool_filter,
                sender,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?
    }

    /// Sends a leave request to the room.
    pub async fn leave(&self, id: PlayerId) -> Result<LeaveInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave { id, reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }

    /// Sends a draft command to the room (fire-and-forget).
    pub async fn command(
        &self,
        id: PlayerId,
        cmd: ClientCommand,
    ) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Command { id, cmd })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }

    /// Requests the current room info.
    pub async fn get_info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }

    /// Tells the room to shut down.
    pub async fn shutdown(&self) -> Result<(), RoomError> {
        self.sender
            .send(RoomCommand::Shutdown)
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }
}

/// The internal room actor state. Runs inside a Tokio task.
struct RoomActor {
    session: DraftSession,
    /// Per-player outbound channels.
    senders: HashMap<PlayerId, PlayerSender>,
    receiver: mpsc::Receiver<RoomCommand>,
}

impl RoomActor {
    /// Runs the actor loop: commands and the session clock interleaved
    /// until shutdown.
    async fn run(mut self) {
        tracing::info!(code = %self.session.code(), "room actor started");

        let mut clock = tokio::time::interval(Duration::from_secs(1));
        clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = clock.tick() => {
                    if self.session.phase() == SessionPhase::Drafting {
                        self.session.tick();
                        self.broadcast();
                    }
                }
                cmd = self.receiver.recv() => {
                    let Some(cmd) = cmd else { break };
                    match cmd {
                        RoomCommand::Join { id, name, pool_filter, sender, reply } => {
                            let result = self.handle_join(id, &name, pool_filter, sender);
                            let _ = reply.send(result);
                        }
                        RoomCommand::Leave { id, reply } => {
                            let info = self.handle_leave(id);
                            let _ = reply.send(info);
                        }
                        RoomCommand::Command { id, cmd } => {
                            self.handle_command(id, cmd);
                        }
                        RoomCommand::GetInfo { reply } => {
                            let _ = reply.send(self.info());
                        }
                        RoomCommand::Shutdown => {
                            tracing::info!(code = %self.session.code(), "room shutting down");
                            break;
                        }
                    }
                }
            }
        }

        tracing::info!(code = %self.session.code(), "room actor stopped");
    }

    fn handle_join(
        &mut self,
        id: PlayerId,
        name: &str,
        pool_filter: Option<std::collections::HashSet<String>>,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        self.session.join(id, name, pool_filter)?;
        self.senders.insert(id, sender);
        tracing::info!(
            code = %self.session.code(),
            %id,
            players = self.session.player_count(),
            "player joined"
        );
        self.broadcast();
        Ok(())
    }

    fn handle_leave(&mut self, id: PlayerId) -> LeaveInfo {
        let existed = self.session.leave(id);
        self.senders.remove(&id);
        if existed {
            tracing::info!(
                code = %self.session.code(),
                %id,
                players = self.session.player_count(),
                "player left"
            );
            self.broadcast();
        }
        LeaveInfo {
            existed,
            empty: self.session.is_empty(),
        }
    }

    fn handle_command(&mut self, id: PlayerId, cmd: ClientCommand) {
        if !self.senders.contains_key(&id) {
            tracing::warn!(
                code = %self.session.code(),
                %id,
                "command from non-member, ignoring"
            );
            return;
        }
        match self.session.apply(id, cmd) {
            Ok(()) => self.broadcast(),
            Err(err) => {
                tracing::debug!(
                    code = %self.session.code(),
                    %id,
                    %err,
                    "command rejected"
                );
                self.send_to(
                    id,
                    RoomOutbound::Rejected {
                        kind: err.kind(),
                        message: err.to_string(),
                    },
                );
            }
        }
    }

    /// Sends every member their own personalized snapshot.
    fn broadcast(&self) {
        for (&id, sender) in &self.senders {
            let snapshot = self.session.snapshot_for(id);
            let _ = sender.send(RoomOutbound::Snapshot(snapshot));
        }
    }

    /// Sends an outbound message to a single player. Silently drops if
    /// the receiver is gone (player disconnected).
    fn send_to(&self, id: PlayerId, msg: RoomOutbound) {
        if let Some(sender) = self.senders.get(&id) {
            let _ = sender.send(msg);
        }
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            code: self.session.code().clone(),
            phase: self.session.phase(),
            host: self.session.host(),
            player_count: self.session.player_count(),
        }
    }
}

/// Spawns a new room actor task and returns a handle to it.
///
/// The session's catalog is loaded before the spawn, so the actor itself
/// never awaits anything but its channel and its clock.
pub(crate) fn spawn_room(
    code: RoomCode,
    catalog: riftdraft_core::Catalog,
    channel_size: usize,
) -> RoomHandle {
    let (tx, rx) = mpsc::channel(channel_size);

    let mut session = DraftSession::new(code.clone());
    session.attach_catalog(catalog);

    let actor = RoomActor {
        session,
        senders: HashMap::new(),
        receiver: rx,
    };
    tokio::spawn(actor.run());

    RoomHandle { code, sender: tx }
}
