//! The Riftdraft session core.
//!
//! One [`DraftSession`] owns everything a single room needs: the roster,
//! team benches, the item catalog, one of four draft strategies, the
//! trade book, and the 1-second clock. The session is fully synchronous —
//! every operation, including timer ticks, is an ordinary `&mut self`
//! method — so the owner (a room actor, a test) is the single serializer
//! of its state. The only async surface is the one-time catalog load.
//!
//! # Key types
//!
//! - [`DraftSession`] — the per-room finite-state machine
//! - [`Catalog`] / [`CatalogSource`] — the item list and its loader seam
//! - [`DraftError`] / [`ErrorKind`] — the error taxonomy
//! - [`strategy::AuctionState`] — the sealed-bid auction

#![allow(async_fn_in_trait)]

mod bench;
mod catalog;
mod error;
mod player;
mod roster;
mod session;
pub mod strategy;
mod trade;

pub use bench::TeamBenches;
pub use catalog::{Catalog, CatalogError, CatalogSource, FixedCatalog};
pub use error::{DraftError, ErrorKind, Result};
pub use player::{MemoryState, Player};
pub use roster::{MAX_PLAYERS, MAX_TEAM_SIZE, Roster};
pub use session::{DraftSession, TRADE_PHASE_SECS};
pub use trade::{PendingTrade, TradeBook};
