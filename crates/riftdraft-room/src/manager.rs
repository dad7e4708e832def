//! Room manager: creates, tracks, and routes players to rooms.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use riftdraft_core::{Catalog, CatalogSource};
use riftdraft_protocol::{ClientCommand, PlayerId, RoomCode};

use crate::room::spawn_room;
use crate::{PlayerSender, RoomError, RoomHandle, RoomInfo};

/// Characters used in generated room codes.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Length of generated room codes.
const CODE_LEN: usize = 6;
/// Default command channel size for room actors.
const DEFAULT_CHANNEL_SIZE: usize = 64;

/// Manages all active rooms and tracks which player is in which room.
///
/// This is the entry point for room operations from higher layers
/// (connection handlers, a server accept loop). The catalog source is
/// consulted once per room, at creation.
pub struct RoomManager<S> {
    /// Active rooms, keyed by their shareable code.
    rooms: HashMap<RoomCode, RoomHandle>,

    /// Maps each player to the room they're currently in.
    /// A player can be in at most ONE room at a time (key invariant).
    player_rooms: HashMap<PlayerId, RoomCode>,

    source: S,
}

impl<S: CatalogSource> RoomManager<S> {
    pub fn new(source: S) -> Self {
        Self {
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
            source,
        }
    }

    /// Creates a new room and returns its shareable code.
    ///
    /// The catalog loads here, before the actor spawns; a failed load
    /// falls back to the built-in sample set inside the core.
    pub async fn create_room(&mut self) -> RoomCode {
        let catalog = Catalog::load_or_sample(&self.source).await;
        let code = self.unused_code();
        let handle =
            spawn_room(code.clone(), catalog, DEFAULT_CHANNEL_SIZE);
        self.rooms.insert(code.clone(), handle);
        tracing::info!(%code, rooms = self.rooms.len(), "room created");
        code
    }

    /// Adds a player to a room by code.
    ///
    /// Enforces the "one room at a time" invariant.
    pub async fn join_room(
        &mut self,
        id: PlayerId,
        code: &RoomCode,
        name: String,
        pool_filter: Option<HashSet<String>>,
        sender: PlayerSender,
    ) -> Result<(), RoomError> {
        if let Some(current) = self.player_rooms.get(&id) {
            return Err(RoomError::AlreadyInRoom(id, current.clone()));
        }
        let handle = self
            .rooms
            .get(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;

        handle.join(id, name, pool_filter, sender).await?;
        self.player_rooms.insert(id, code.clone());
        Ok(())
    }

    /// Removes a player from their current room. A room whose last
    /// player leaves is destroyed.
    pub async fn leave_room(&mut self, id: PlayerId) -> Result<(), RoomError> {
        let code = self
            .player_rooms
            .remove(&id)
            .ok_or(RoomError::NotInRoom(id))?;

        let Some(handle) = self.rooms.get(&code) else {
            return Ok(());
        };
        let info = handle.leave(id).await?;
        if info.empty {
            if let Some(handle) = self.rooms.remove(&code) {
                let _ = handle.shutdown().await;
            }
            tracing::info!(%code, "empty room destroyed");
        }
        Ok(())
    }

    /// Routes a draft command from a player to their current room.
    pub async fn route_command(
        &self,
        id: PlayerId,
        cmd: ClientCommand,
    ) -> Result<(), RoomError> {
        let code = self
            .player_rooms
            .get(&id)
            .ok_or(RoomError::NotInRoom(id))?;
        let handle = self
            .rooms
            .get(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;
        handle.command(id, cmd).await
    }

    /// Returns info about a specific room.
    pub async fn get_room_info(
        &self,
        code: &RoomCode,
    ) -> Result<RoomInfo, RoomError> {
        let handle = self
            .rooms
            .get(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;
        handle.get_info().await
    }

    /// Returns the code of the room a player is currently in, if any.
    pub fn player_room(&self, id: &PlayerId) -> Option<&RoomCode> {
        self.player_rooms.get(id)
    }

    /// Returns the number of active rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Lists all active room codes.
    pub fn room_codes(&self) -> Vec<RoomCode> {
        self.rooms.keys().cloned().collect()
    }

    /// Generates a code no active room uses.
    fn unused_code(&self) -> RoomCode {
        let mut rng = rand::rng();
        loop {
            let code: String = (0..CODE_LEN)
                .map(|_| {
                    let i = rng.random_range(0..CODE_ALPHABET.len());
                    CODE_ALPHABET[i] as char
                })
                .collect();
            let code = RoomCode(code);
            if !self.rooms.contains_key(&code) {
                return code;
            }
        }
    }
}
