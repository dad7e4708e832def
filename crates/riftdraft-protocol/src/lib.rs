//! Shared types for Riftdraft.
//!
//! This crate defines everything that crosses the boundary between the
//! draft core and whatever transport drives it:
//!
//! - **Identity** ([`PlayerId`], [`RoomCode`], [`Team`]) — who and where.
//! - **Catalog data** ([`Item`]) — the things being drafted.
//! - **Commands** ([`ClientCommand`], [`DraftConfig`]) — the full inbound
//!   operation surface of a draft session.
//! - **Snapshots** ([`SessionSnapshot`] and friends) — the personalized,
//!   already-redacted view sent back to each participant.
//!
//! The crate is pure data plus serde; it knows nothing about rooms,
//! sockets, or the draft rules themselves.

mod command;
mod snapshot;
mod types;

pub use command::{ClientCommand, DraftConfig};
pub use snapshot::{
    AuctionView, LotResult, MemoryView, PlayerView, SessionSnapshot,
    TradeOfferView,
};
pub use types::{
    DraftMode, Item, LotPhase, MemoryPhase, PlayerId, RoomCode,
    SessionPhase, Team,
};
