//! Per-team benches of displaced items.
//!
//! An item lands on a bench when a player rerolls it away, declines it in
//! a two-card pick, or leaves the room while holding it. Bench items can
//! be swapped back by any unlocked teammate. Invariant: an item lives in
//! at most one place per team — held by one player or on the bench, never
//! both.

use riftdraft_protocol::{Item, Team};

/// The two team benches, ordered lists of items.
#[derive(Debug, Default)]
pub struct TeamBenches {
    blue: Vec<Item>,
    red: Vec<Item>,
}

impl TeamBenches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.blue.clear();
        self.red.clear();
    }

    pub fn team(&self, team: Team) -> &[Item] {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }

    fn team_mut(&mut self, team: Team) -> &mut Vec<Item> {
        match team {
            Team::Blue => &mut self.blue,
            Team::Red => &mut self.red,
        }
    }

    pub fn push(&mut self, team: Team, item: Item) {
        self.team_mut(team).push(item);
    }

    /// Index of an item on a team's bench, by id.
    pub fn position_of(&self, team: Team, item_id: &str) -> Option<usize> {
        self.team(team).iter().position(|item| item.id == item_id)
    }

    /// Replaces the bench slot at `index` with `item`, returning what was
    /// there. The slot keeps its position, matching swap-back semantics.
    pub fn swap_at(&mut self, team: Team, index: usize, item: Item) -> Item {
        std::mem::replace(&mut self.team_mut(team)[index], item)
    }

    /// Whether any bench slot on `team` holds the named item.
    pub fn contains_name(&self, team: Team, name: &str) -> bool {
        self.team(team).iter().any(|item| item.name == name)
    }
}
