//! The per-participant record.

use std::collections::HashSet;

use riftdraft_protocol::{Item, MemoryPhase, PlayerId, Team};

/// A memory-pick player's private card set and phase countdown.
#[derive(Debug, Clone)]
pub struct MemoryState {
    /// The cards in their revealed order.
    pub cards: Vec<Item>,
    /// `shuffled_positions[face_down_position] == index into cards`.
    pub shuffled_positions: Vec<usize>,
    pub phase: MemoryPhase,
    /// Seconds left in the current reveal/shuffle phase.
    pub phase_remaining: u32,
    pub picked: bool,
}

/// One connected participant.
///
/// Created on join, mutated by the active strategy and by trade/lock
/// operations, discarded on leave. Strategy-specific fields are reset by
/// `strategy::initialize_player` at draft start.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub team: Option<Team>,
    pub item: Option<Item>,
    pub reroll_tokens: u32,
    pub locked: bool,
    /// `None` means unrestricted: any catalog item is eligible.
    pub pool_filter: Option<HashSet<String>>,
    /// Monotonic join order, used as the deterministic host tie-break.
    pub join_seq: u64,

    // Per-strategy state.
    pub card_options: Option<Vec<Item>>,
    pub memory: Option<MemoryState>,
    pub coins: u32,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        join_seq: u64,
        pool_filter: Option<HashSet<String>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            team: None,
            item: None,
            reroll_tokens: 1,
            locked: false,
            pool_filter,
            join_seq,
            card_options: None,
            memory: None,
            coins: 0,
        }
    }

    /// Whether this player currently holds the named item.
    pub fn holds(&self, name: &str) -> bool {
        self.item.as_ref().is_some_and(|item| item.name == name)
    }

    /// Trades require a team, an item, and an unlocked player.
    pub fn can_trade(&self) -> bool {
        self.team.is_some() && self.item.is_some() && !self.locked
    }
}
