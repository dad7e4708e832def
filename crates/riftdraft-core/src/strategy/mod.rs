//! The four interchangeable draft strategies.
//!
//! The variant set is fixed and small, so this is a closed enum dispatch
//! rather than a trait-object plugin seam: the session matches on
//! [`DraftMode`] at draft start and the per-mode modules do the work.

pub mod auction;
pub mod memory;
pub mod random;
pub mod two_card;

use riftdraft_protocol::{DraftConfig, DraftMode, Item};

pub use auction::AuctionState;

use crate::{Catalog, Player};

/// Shared per-mode settings.
#[derive(Debug, Clone, Copy)]
pub struct StrategySettings {
    pub display_name: &'static str,
    pub uses_rerolls: bool,
    pub uses_card_pick: bool,
    /// Default session clock (the auction's value is its per-lot timer).
    pub timer_seconds: u32,
}

/// Settings for each mode.
pub fn settings(mode: DraftMode) -> StrategySettings {
    match mode {
        DraftMode::DirectRandom => StrategySettings {
            display_name: "Classic Random",
            uses_rerolls: true,
            uses_card_pick: false,
            timer_seconds: 90,
        },
        DraftMode::TwoCardPick => StrategySettings {
            display_name: "Two Card Pick",
            uses_rerolls: false,
            uses_card_pick: true,
            timer_seconds: 60,
        },
        DraftMode::MemoryPick => StrategySettings {
            display_name: "Memory Pick",
            uses_rerolls: false,
            uses_card_pick: true,
            timer_seconds: 90,
        },
        DraftMode::Auction => StrategySettings {
            display_name: "Auction",
            uses_rerolls: false,
            uses_card_pick: false,
            timer_seconds: auction::LOT_TIMER_SECS,
        },
    }
}

/// Strategy-owned state held by the session while drafting.
///
/// Only the auction carries data of its own; the other modes keep their
/// per-player state on the [`Player`] records.
#[derive(Debug)]
pub enum StrategyState {
    DirectRandom,
    TwoCardPick,
    MemoryPick,
    Auction(AuctionState),
}

/// Resets a player's per-strategy fields for a fresh draft.
pub fn initialize_player(
    mode: DraftMode,
    player: &mut Player,
    config: &DraftConfig,
) {
    player.item = None;
    player.locked = false;
    player.card_options = None;
    player.memory = None;
    player.coins = 0;
    player.reroll_tokens = 0;
    match mode {
        DraftMode::DirectRandom => {
            player.reroll_tokens = config.reroll_tokens;
        }
        DraftMode::Auction => {
            player.coins = auction::STARTING_COINS;
        }
        DraftMode::TwoCardPick | DraftMode::MemoryPick => {}
    }
}

/// The items a player may draft: the full catalog, or its intersection
/// with the player's pool filter. An empty intersection falls back to the
/// full catalog so a player can never be blocked from drafting.
pub fn eligible_items(catalog: &Catalog, player: &Player) -> Vec<Item> {
    match &player.pool_filter {
        None => catalog.items().to_vec(),
        Some(filter) => {
            let filtered: Vec<Item> = catalog
                .items()
                .iter()
                .filter(|item| filter.contains(&item.name))
                .cloned()
                .collect();
            if filtered.is_empty() {
                catalog.items().to_vec()
            } else {
                filtered
            }
        }
    }
}
