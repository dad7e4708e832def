//! The set of connected participants and their team assignment.

use std::collections::{HashMap, HashSet};

use riftdraft_protocol::{PlayerId, Team};

use crate::{DraftError, Player, Result};

/// Room capacity.
pub const MAX_PLAYERS: usize = 10;
/// Per-team capacity.
pub const MAX_TEAM_SIZE: usize = 5;

/// All players in a session, with join-order bookkeeping.
#[derive(Debug, Default)]
pub struct Roster {
    players: HashMap<PlayerId, Player>,
    next_seq: u64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player. Names are trimmed and must be unique in the room.
    pub fn join(
        &mut self,
        id: PlayerId,
        name: &str,
        pool_filter: Option<HashSet<String>>,
    ) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DraftError::InvalidName);
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(DraftError::RoomFull);
        }
        if self.players.values().any(|p| p.name == name) {
            return Err(DraftError::NameTaken);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.players
            .insert(id, Player::new(id, name, seq, pool_filter));
        tracing::info!(%id, name, players = self.players.len(), "player joined");
        Ok(())
    }

    /// Removes and returns a player's record.
    pub fn remove(&mut self, id: PlayerId) -> Option<Player> {
        let player = self.players.remove(&id);
        if let Some(p) = &player {
            tracing::info!(%id, name = %p.name, players = self.players.len(), "player left");
        }
        player
    }

    /// Moves a player onto a team, enforcing the team cap.
    pub fn set_team(&mut self, id: PlayerId, team: Team) -> Result<()> {
        if !self.players.contains_key(&id) {
            return Err(DraftError::UnknownPlayer(id));
        }
        let already_on = self.players.get(&id).and_then(|p| p.team) == Some(team);
        if !already_on && self.players_on_team(team).len() >= MAX_TEAM_SIZE {
            return Err(DraftError::TeamFull(team));
        }
        if let Some(player) = self.players.get_mut(&id) {
            player.team = Some(team);
        }
        Ok(())
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// All players, in join order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        let mut players: Vec<&Player> = self.players.values().collect();
        players.sort_by_key(|p| p.join_seq);
        players.into_iter()
    }

    /// Players on a specific team, in join order.
    pub fn players_on_team(&self, team: Team) -> Vec<&Player> {
        self.iter().filter(|p| p.team == Some(team)).collect()
    }

    /// All teamed players, in join order.
    pub fn teamed(&self) -> Vec<&Player> {
        self.iter().filter(|p| p.team.is_some()).collect()
    }

    /// Ids of all teamed players, in join order.
    pub fn teamed_ids(&self) -> Vec<PlayerId> {
        self.teamed().iter().map(|p| p.id).collect()
    }

    /// The earliest-joined remaining player. Explicit deterministic
    /// tie-break for host transfer, instead of map iteration order.
    pub fn first_by_join(&self) -> Option<PlayerId> {
        self.players
            .values()
            .min_by_key(|p| p.join_seq)
            .map(|p| p.id)
    }

    /// Whether any player on `team` other than `except` holds `name`.
    pub fn team_holds(
        &self,
        team: Team,
        name: &str,
        except: Option<PlayerId>,
    ) -> bool {
        self.players.values().any(|p| {
            p.team == Some(team) && Some(p.id) != except && p.holds(name)
        })
    }

    /// Item names currently held by `team`, excluding `except`.
    pub fn team_held_names(
        &self,
        team: Team,
        except: Option<PlayerId>,
    ) -> HashSet<String> {
        self.players
            .values()
            .filter(|p| p.team == Some(team) && Some(p.id) != except)
            .filter_map(|p| p.item.as_ref().map(|item| item.name.clone()))
            .collect()
    }

    /// How many players on `team` still hold no item.
    pub fn open_slots(&self, team: Team) -> usize {
        self.players
            .values()
            .filter(|p| p.team == Some(team) && p.item.is_none())
            .count()
    }
}
