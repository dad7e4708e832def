//! Identity and domain primitives shared by every layer.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a connected participant.
///
/// Newtype over `u64` so a player id can never be confused with any other
/// numeric id. `#[serde(transparent)]` keeps the JSON representation a
/// plain number.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A room's join code: six uppercase alphanumerics, e.g. `K7QX2B`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl RoomCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Teams
// ---------------------------------------------------------------------------

/// One of the two draft teams.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Blue,
    Red,
}

impl Team {
    /// Both teams, in a fixed order. Handy for iteration.
    pub const BOTH: [Team; 2] = [Team::Blue, Team::Red];

    /// The opposing team.
    pub fn other(self) -> Team {
        match self {
            Team::Blue => Team::Red,
            Team::Red => Team::Blue,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Blue => write!(f, "blue"),
            Team::Red => write!(f, "red"),
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// A selectable item from the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Draft modes and phases
// ---------------------------------------------------------------------------

/// The four interchangeable draft algorithms.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
pub enum DraftMode {
    /// One random item per player, with reroll tokens.
    #[default]
    DirectRandom,
    /// Each player chooses between two offered items.
    TwoCardPick,
    /// Five items are revealed, shuffled face-down, then picked by memory.
    MemoryPick,
    /// Items are auctioned between the teams with sealed per-player bids.
    Auction,
}

/// Lifecycle of a draft session.
///
/// ```text
/// Lobby → Drafting → Completed
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum SessionPhase {
    Lobby,
    Drafting,
    Completed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Lobby => write!(f, "Lobby"),
            SessionPhase::Drafting => write!(f, "Drafting"),
            SessionPhase::Completed => write!(f, "Completed"),
        }
    }
}

/// Per-lot state of the sealed-bid auction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum LotPhase {
    /// No lot on the block yet.
    Ready,
    /// The current lot is open for bids.
    Bidding,
    /// The lot has been decided; waiting out the inter-lot pause.
    Resolving,
    /// The queue is exhausted or both teams are full.
    Completed,
}

/// A memory-pick player's progression through their card set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
pub enum MemoryPhase {
    /// Cards are face-up; memorize them.
    Reveal,
    /// Cards are shuffling face-down.
    Shuffle,
    /// Pick a position.
    Pick,
}
