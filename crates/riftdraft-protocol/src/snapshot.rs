//! Personalized state snapshots.
//!
//! A snapshot is built *for* a specific viewer: the core redacts other
//! players' items (until teams/completion allow them), reroll tokens,
//! card options, memory cards, coin balances, and per-lot contributions
//! before the snapshot ever leaves the session. The transport layer can
//! forward these verbatim.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    Item, LotPhase, MemoryPhase, PlayerId, RoomCode, SessionPhase, Team,
};

/// What one participant is allowed to see of the whole session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub code: RoomCode,
    pub host: Option<PlayerId>,
    pub phase: SessionPhase,
    pub clock_seconds: u32,
    /// Every participant, keyed by id. `BTreeMap` keeps the wire order stable.
    pub players: BTreeMap<PlayerId, PlayerView>,
    /// The viewer's own team bench. Empty for teamless viewers.
    pub bench: Vec<Item>,
    pub pending_trades: Vec<TradeOfferView>,
    /// Present only in auction mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auction: Option<AuctionView>,
}

/// One player as seen by the snapshot's viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub team: Option<Team>,
    /// `None` when hidden from the viewer, not only when unassigned.
    pub item: Option<Item>,
    /// Zero for everyone but the viewer.
    pub reroll_tokens: u32,
    pub locked: bool,
    /// The viewer's own two-card options. Never shown for other players.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_options: Option<Vec<Item>>,
    /// The viewer's own memory-pick state. Never shown for other players.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryView>,
}

/// The viewer's own memory-pick card set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryView {
    pub phase: MemoryPhase,
    /// Face-up cards during the reveal phase; `None` once shuffled.
    pub cards: Option<Vec<Item>>,
    /// How many face-down positions can be picked.
    pub positions: usize,
}

/// A pending trade offer. Item details stay hidden; both players are on
/// the same team, so each can already see the other's item in `players`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOfferView {
    pub from: PlayerId,
    pub to: PlayerId,
}

/// The auction as seen by one viewer. Team running totals are public
/// (bids must beat the opposing total); individual contributions and
/// coin balances are the viewer's own only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionView {
    pub lot_phase: LotPhase,
    pub current_lot: Option<Item>,
    pub lot_timer: u32,
    pub blue_total: u32,
    pub red_total: u32,
    /// The viewer's cumulative contribution to the current lot.
    pub my_contribution: u32,
    /// The viewer's remaining coin balance.
    pub my_coins: u32,
    /// Append-only log of decided lots. Public.
    pub results: Vec<LotResult>,
}

/// The outcome of one auction lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotResult {
    pub item: Item,
    pub winning_team: Team,
    pub winning_bid: u32,
}
