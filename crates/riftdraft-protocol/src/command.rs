//! The inbound operation surface of a draft session.
//!
//! Each variant maps 1:1 to a real-time message from a participant.
//! Join and leave are room-level operations handled by the room layer,
//! so they don't appear here.

use serde::{Deserialize, Serialize};

use crate::{DraftMode, PlayerId, Team};

/// Host-chosen settings for a draft, supplied with `StartDraft`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftConfig {
    /// Which of the four draft algorithms to run.
    pub mode: DraftMode,

    /// Session clock override in seconds. `None` uses the mode's default
    /// (the auction's per-lot timer is fixed and not affected by this).
    pub timer_seconds: Option<u32>,

    /// Reroll tokens per player. Only meaningful for direct-random mode.
    pub reroll_tokens: u32,
}

impl Default for DraftConfig {
    fn default() -> Self {
        Self {
            mode: DraftMode::default(),
            timer_seconds: None,
            reroll_tokens: 1,
        }
    }
}

/// A game action from a participant.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON, e.g.
/// `{ "type": "PlaceBid", "amount": 5 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientCommand {
    /// Move to a team (lobby only).
    SetTeam { team: Team },

    /// Start the draft (host only).
    StartDraft { config: DraftConfig },

    /// Exchange the current item for a fresh random one (direct-random only).
    Reroll,

    /// Choose one of the two offered cards (two-card-pick only).
    PickCard { index: usize },

    /// Pick a face-down position (memory-pick only).
    PickMemoryCard { position: usize },

    /// Raise this player's cumulative contribution to the current lot
    /// (auction only). `amount` is the new total, not an increment.
    PlaceBid { amount: u32 },

    /// Exchange the held item for one on the team bench.
    SwapWithBench { item_id: String },

    /// Lock in the current item.
    Lock,

    /// Offer to trade items with a teammate.
    OfferTrade { target: PlayerId },

    /// Accept or decline the pending inbound trade offer.
    RespondToTrade { accepted: bool },
}
