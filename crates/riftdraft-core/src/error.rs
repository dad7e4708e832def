//! Error taxonomy for draft operations.
//!
//! Every operation validates in full before mutating, so a returned error
//! always means "nothing changed" (auction lot resolution is instead
//! protected by its phase guard). Errors are reported to the initiating
//! participant only; they never broadcast to the room.

use riftdraft_protocol::{PlayerId, Team};

/// Coarse classification of a [`DraftError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input shape — rejected before touching state.
    Validation,
    /// The operation is not legal in the current state.
    IllegalState,
    /// A join-time capacity limit was hit.
    ResourceExhaustion,
}

/// Everything a draft operation can fail with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    // -- Join-time capacity --
    #[error("room is full")]
    RoomFull,
    #[error("{0} team is full")]
    TeamFull(Team),
    #[error("name already taken")]
    NameTaken,

    // -- Input validation --
    #[error("invalid player name")]
    InvalidName,
    #[error("card index out of range")]
    BadCardIndex,
    #[error("card position out of range")]
    BadCardPosition,

    // -- Session lifecycle --
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    #[error("draft has not started")]
    NotDrafting,
    #[error("draft already in progress")]
    AlreadyStarted,
    #[error("only the host can start the draft")]
    NotHost,
    #[error("both teams need a player and at least 2 players must be teamed")]
    NotEnoughPlayers,
    #[error("item catalog is not loaded")]
    CatalogNotLoaded,
    #[error("player must join a team first")]
    NotOnTeam,

    // -- Picking and locking --
    #[error("player is locked")]
    PlayerLocked,
    #[error("no item held")]
    NoItem,
    #[error("no reroll tokens left")]
    NoRerollTokens,
    #[error("rerolls are not available in this mode")]
    RerollsDisabled,
    #[error("no card options to pick from")]
    NoCardOptions,
    #[error("memory cards are not ready to pick")]
    MemoryNotPickable,
    #[error("a teammate already took that item")]
    AlreadyTaken,

    // -- Bench --
    #[error("item is not on your team bench")]
    NotOnBench,
    #[error("item is outside your item pool")]
    OutsidePool,

    // -- Auction --
    #[error("bidding is closed for this lot")]
    BiddingClosed,
    #[error("your team has no open slot")]
    TeamHasNoSlot,
    #[error("a contribution can never decrease")]
    BidDecreased,
    #[error("bid does not beat the opposing team's total")]
    BidTooLow,
    #[error("not enough coins")]
    InsufficientCoins,

    // -- Trading --
    #[error("cannot trade with yourself")]
    SelfTrade,
    #[error("players are not on the same team")]
    NotSameTeam,
    #[error("a trade participant is locked")]
    TradeLocked,
    #[error("both players must hold an item to trade")]
    TradeMissingItem,
    #[error("no pending trade")]
    NoPendingTrade,
}

impl DraftError {
    /// Which bucket of the taxonomy this error falls into.
    pub fn kind(&self) -> ErrorKind {
        use DraftError::*;
        match self {
            RoomFull | TeamFull(_) | NameTaken => {
                ErrorKind::ResourceExhaustion
            }
            InvalidName | BadCardIndex | BadCardPosition => {
                ErrorKind::Validation
            }
            _ => ErrorKind::IllegalState,
        }
    }
}

pub type Result<T> = std::result::Result<T, DraftError>;
