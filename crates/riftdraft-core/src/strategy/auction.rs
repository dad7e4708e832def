//! Sealed-bid auction: teams bid escrowed coins on a shuffled lot queue.
//!
//! One lot is on the block at a time. Each player's bid is their
//! *cumulative* contribution to the current lot; the incremental delta is
//! escrowed from their coin balance the moment the bid lands. Losing
//! teams get every escrowed coin back before the next lot; winning
//! escrow is spent. Lot resolution is guarded by the lot phase so a
//! timer expiry racing a team-full trigger can never resolve twice.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use riftdraft_protocol::{Item, LotPhase, LotResult, PlayerId, Team};

use crate::{Catalog, DraftError, Result, Roster};

use super::eligible_items;

/// Coins issued to every teamed player at auction start.
pub const STARTING_COINS: u32 = 20;
/// Seconds of bidding per lot.
pub const LOT_TIMER_SECS: u32 = 20;
/// A successful bid tops the lot timer back up to at least this.
pub const MIN_TIMER_AFTER_BID: u32 = 5;
/// Fixed pause between a lot's resolution and the next lot.
pub const LOT_PAUSE_SECS: u32 = 3;

/// One team's escrow for the current lot.
#[derive(Debug, Default)]
struct TeamLedger {
    total: u32,
    contributions: BTreeMap<PlayerId, u32>,
}

impl TeamLedger {
    fn clear(&mut self) {
        self.total = 0;
        self.contributions.clear();
    }
}

/// The auction's full mutable state, owned by the session while the
/// strategy runs.
#[derive(Debug)]
pub struct AuctionState {
    lot_queue: Vec<Item>,
    current_index: usize,
    current_lot: Option<Item>,
    lot_phase: LotPhase,
    lot_timer: u32,
    pause_remaining: u32,
    blue: TeamLedger,
    red: TeamLedger,
    results: Vec<LotResult>,
}

impl AuctionState {
    /// Builds the lot queue (one lot per teamed player, drawn from the
    /// union of all players' eligible items) and opens the first lot.
    ///
    /// Coin balances are set by `strategy::initialize_player` before this
    /// runs. The auction can complete immediately on degenerate input
    /// (empty catalog); callers should check [`Self::is_complete`].
    pub fn start(roster: &mut Roster, catalog: &Catalog) -> Self {
        let mut union: Vec<Item> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for player in roster.teamed() {
            for item in eligible_items(catalog, player) {
                if seen.insert(item.id.clone()) {
                    union.push(item);
                }
            }
        }
        let mut rng = rand::rng();
        union.shuffle(&mut rng);
        union.truncate(roster.teamed().len());

        tracing::info!(lots = union.len(), "auction starting");
        let mut state = Self {
            lot_queue: union,
            current_index: 0,
            current_lot: None,
            lot_phase: LotPhase::Ready,
            lot_timer: 0,
            pause_remaining: 0,
            blue: TeamLedger::default(),
            red: TeamLedger::default(),
            results: Vec::new(),
        };
        state.begin_lot(roster);
        if state.lot_phase == LotPhase::Completed {
            state.finish(roster, catalog);
        }
        state
    }

    pub fn lot_phase(&self) -> LotPhase {
        self.lot_phase
    }

    pub fn current_lot(&self) -> Option<&Item> {
        self.current_lot.as_ref()
    }

    pub fn lot_timer(&self) -> u32 {
        self.lot_timer
    }

    pub fn results(&self) -> &[LotResult] {
        &self.results
    }

    pub fn is_complete(&self) -> bool {
        self.lot_phase == LotPhase::Completed
    }

    /// A team's running total for the current lot. Public information.
    pub fn total(&self, team: Team) -> u32 {
        self.ledger(team).total
    }

    /// One player's cumulative contribution to the current lot.
    pub fn contribution(&self, team: Team, id: PlayerId) -> u32 {
        self.ledger(team)
            .contributions
            .get(&id)
            .copied()
            .unwrap_or(0)
    }

    fn ledger(&self, team: Team) -> &TeamLedger {
        match team {
            Team::Blue => &self.blue,
            Team::Red => &self.red,
        }
    }

    fn ledger_mut(&mut self, team: Team) -> &mut TeamLedger {
        match team {
            Team::Blue => &mut self.blue,
            Team::Red => &mut self.red,
        }
    }

    /// Raises `id`'s cumulative contribution to `amount`.
    ///
    /// Every check runs before any mutation: the rejected bid leaves coin
    /// balances, ledgers, and the lot timer untouched.
    pub fn place_bid(
        &mut self,
        roster: &mut Roster,
        id: PlayerId,
        amount: u32,
    ) -> Result<()> {
        if self.lot_phase != LotPhase::Bidding {
            return Err(DraftError::BiddingClosed);
        }
        let player = roster.get(id).ok_or(DraftError::UnknownPlayer(id))?;
        let team = player.team.ok_or(DraftError::NotOnTeam)?;
        if roster.open_slots(team) == 0 {
            return Err(DraftError::TeamHasNoSlot);
        }

        let current = self.contribution(team, id);
        if amount < current {
            return Err(DraftError::BidDecreased);
        }
        let delta = amount - current;
        let new_total = self.ledger(team).total + delta;
        if new_total <= self.ledger(team.other()).total {
            return Err(DraftError::BidTooLow);
        }
        if player.coins < delta {
            return Err(DraftError::InsufficientCoins);
        }

        // Validated: escrow the delta and record the new contribution.
        if let Some(player) = roster.get_mut(id) {
            player.coins -= delta;
        }
        let ledger = self.ledger_mut(team);
        ledger.contributions.insert(id, amount);
        ledger.total = new_total;

        // A live bid always leaves at least a few seconds to respond,
        // but never shortens the timer.
        self.lot_timer = self.lot_timer.max(MIN_TIMER_AFTER_BID);
        tracing::debug!(%id, %team, amount, total = new_total, "bid placed");

        // No opposing player can answer: settle the lot now.
        if roster.open_slots(team.other()) == 0 {
            self.resolve(roster);
        }
        Ok(())
    }

    /// One second of auction time. Returns `true` when the auction just
    /// completed (the caller then starts the trading clock).
    pub fn tick(&mut self, roster: &mut Roster, catalog: &Catalog) -> bool {
        match self.lot_phase {
            LotPhase::Bidding => {
                self.lot_timer = self.lot_timer.saturating_sub(1);
                if self.lot_timer == 0 {
                    self.resolve(roster);
                }
                false
            }
            LotPhase::Resolving => {
                self.pause_remaining = self.pause_remaining.saturating_sub(1);
                if self.pause_remaining == 0 {
                    self.current_index += 1;
                    self.begin_lot(roster);
                    if self.lot_phase == LotPhase::Completed {
                        self.finish(roster, catalog);
                        return true;
                    }
                }
                false
            }
            LotPhase::Ready | LotPhase::Completed => false,
        }
    }

    /// Puts the lot at `current_index` on the block, or completes the
    /// auction. Evaluated exactly once per lot start; a lot that only one
    /// team can still receive is assigned free without a bidding round.
    fn begin_lot(&mut self, roster: &mut Roster) {
        self.blue.clear();
        self.red.clear();
        self.lot_timer = 0;

        let teams_full =
            Team::BOTH.iter().all(|&t| roster.open_slots(t) == 0);
        if self.current_index >= self.lot_queue.len() || teams_full {
            self.current_lot = None;
            self.lot_phase = LotPhase::Completed;
            return;
        }

        let lot = self.lot_queue[self.current_index].clone();
        let open_blue = roster.open_slots(Team::Blue) > 0;
        let open_red = roster.open_slots(Team::Red) > 0;
        match (open_blue, open_red) {
            (true, true) => {
                tracing::info!(lot = %lot.name, "lot open for bidding");
                self.current_lot = Some(lot);
                self.lot_phase = LotPhase::Bidding;
                self.lot_timer = LOT_TIMER_SECS;
            }
            (true, false) | (false, true) => {
                // Only one team can still receive: skip bidding.
                let team = if open_blue { Team::Blue } else { Team::Red };
                tracing::info!(lot = %lot.name, %team, "uncontested lot assigned free");
                self.award(roster, team, lot, 0);
                self.current_lot = None;
                self.lot_phase = LotPhase::Resolving;
                self.pause_remaining = LOT_PAUSE_SECS;
            }
            (false, false) => unreachable!("teams_full checked above"),
        }
    }

    /// Settles the current lot. Guarded by the lot phase so it fires
    /// exactly once per lot no matter how many triggers race in.
    fn resolve(&mut self, roster: &mut Roster) {
        if self.lot_phase != LotPhase::Bidding {
            return;
        }
        self.lot_phase = LotPhase::Resolving;
        self.pause_remaining = LOT_PAUSE_SECS;

        let Some(lot) = self.current_lot.take() else { return };
        let blue_total = self.blue.total;
        let red_total = self.red.total;

        let mut rng = rand::rng();
        let winner = if blue_total > red_total {
            Some(Team::Blue)
        } else if red_total > blue_total {
            Some(Team::Red)
        } else if blue_total > 0 {
            // Equal nonzero totals: coin flip.
            Some(if rng.random_bool(0.5) { Team::Blue } else { Team::Red })
        } else {
            // Nobody bid: award free to a team that can still receive.
            match (
                roster.open_slots(Team::Blue) > 0,
                roster.open_slots(Team::Red) > 0,
            ) {
                (true, true) => {
                    Some(if rng.random_bool(0.5) { Team::Blue } else { Team::Red })
                }
                (true, false) => Some(Team::Blue),
                (false, true) => Some(Team::Red),
                (false, false) => None,
            }
        };

        match winner {
            Some(team) => {
                self.refund(roster, team.other());
                let winning_bid = self.ledger(team).total;
                if !self.award(roster, team, lot, winning_bid) {
                    // Winner had no open slot after all (a mid-lot leave
                    // can do this): the escrow goes back.
                    self.refund(roster, team);
                }
            }
            None => {
                // Lot discarded; totals are zero so nothing to refund.
                tracing::info!("lot discarded, no team can receive it");
            }
        }
        self.blue.clear();
        self.red.clear();
    }

    /// Hands `lot` to the first itemless player (join order) on `team`
    /// and logs the result. Returns `false` if the team had no open slot.
    fn award(
        &mut self,
        roster: &mut Roster,
        team: Team,
        lot: Item,
        winning_bid: u32,
    ) -> bool {
        let Some(id) = roster
            .players_on_team(team)
            .iter()
            .find(|p| p.item.is_none())
            .map(|p| p.id)
        else {
            return false;
        };
        if let Some(player) = roster.get_mut(id) {
            tracing::info!(%id, %team, lot = %lot.name, winning_bid, "lot awarded");
            player.item = Some(lot.clone());
        }
        self.results.push(LotResult {
            item: lot,
            winning_team: team,
            winning_bid,
        });
        true
    }

    /// Returns every coin a team escrowed for the current lot to its
    /// individual contributors.
    fn refund(&mut self, roster: &mut Roster, team: Team) {
        let ledger = self.ledger_mut(team);
        for (&id, &amount) in &ledger.contributions {
            if let Some(player) = roster.get_mut(id) {
                player.coins += amount;
            }
        }
        ledger.clear();
    }

    /// Post-auction cleanup: any teamed player still without an item gets
    /// one, preferring items that never went to auction and avoiding
    /// teammate duplicates where possible.
    fn finish(&mut self, roster: &mut Roster, catalog: &Catalog) {
        let auctioned: HashSet<&str> =
            self.lot_queue.iter().map(|item| item.id.as_str()).collect();
        let mut rng = rand::rng();

        let ids = roster.teamed_ids();
        for id in ids {
            let Some(player) = roster.get(id) else { continue };
            if player.item.is_some() {
                continue;
            }
            let Some(team) = player.team else { continue };
            let held = roster.team_held_names(team, Some(id));

            let pick_from =
                |pool: Vec<&Item>, rng: &mut rand::rngs::ThreadRng| {
                    pool.choose(rng).map(|item| (*item).clone())
                };
            let fresh: Vec<&Item> = catalog
                .items()
                .iter()
                .filter(|item| {
                    !auctioned.contains(item.id.as_str())
                        && !held.contains(&item.name)
                })
                .collect();
            let unheld: Vec<&Item> = catalog
                .items()
                .iter()
                .filter(|item| !held.contains(&item.name))
                .collect();
            let item = pick_from(fresh, &mut rng)
                .or_else(|| pick_from(unheld, &mut rng))
                .or_else(|| catalog.items().first().cloned());

            if let Some(item) = item {
                if let Some(player) = roster.get_mut(id) {
                    tracing::info!(%id, item = %item.name, "post-auction fallback assignment");
                    player.item = Some(item);
                }
            }
        }
        tracing::info!(lots = self.results.len(), "auction complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftdraft_protocol::DraftConfig;

    use crate::strategy::initialize_player;
    use riftdraft_protocol::DraftMode;

    fn catalog_of(names: &[&str]) -> Catalog {
        Catalog::new(
            names
                .iter()
                .map(|n| Item::new(n.to_lowercase(), *n))
                .collect(),
        )
    }

    fn wide_catalog() -> Catalog {
        catalog_of(&[
            "Ahri", "Ashe", "Garen", "Jinx", "Lux", "Zed", "Teemo", "Riven",
            "Sona", "Vayne",
        ])
    }

    /// n players per team, coins initialized, auction started.
    fn auction_setup(per_team: u64, catalog: &Catalog) -> (Roster, AuctionState) {
        let mut roster = Roster::new();
        let config = DraftConfig::default();
        let mut id = 0;
        for team in Team::BOTH {
            for _ in 0..per_team {
                roster.join(PlayerId(id), &format!("p{id}"), None).unwrap();
                roster.set_team(PlayerId(id), team).unwrap();
                id += 1;
            }
        }
        let ids = roster.teamed_ids();
        for pid in ids {
            initialize_player(
                DraftMode::Auction,
                roster.get_mut(pid).unwrap(),
                &config,
            );
        }
        let auction = AuctionState::start(&mut roster, catalog);
        (roster, auction)
    }

    fn total_coins(roster: &Roster) -> u32 {
        roster.teamed().iter().map(|p| p.coins).sum()
    }

    fn escrowed(auction: &AuctionState) -> u32 {
        auction.total(Team::Blue) + auction.total(Team::Red)
    }

    fn spent(auction: &AuctionState) -> u32 {
        auction.results().iter().map(|r| r.winning_bid).sum()
    }

    #[test]
    fn test_queue_size_matches_teamed_player_count() {
        let catalog = wide_catalog();
        let (_, auction) = auction_setup(2, &catalog);
        assert_eq!(auction.lot_queue.len(), 4);
        assert_eq!(auction.lot_phase(), LotPhase::Bidding);
        assert_eq!(auction.lot_timer(), LOT_TIMER_SECS);
    }

    #[test]
    fn test_one_lot_five_vs_three_example() {
        // Red commits 3, blue answers with 5, the timer runs out: blue
        // wins at 5 and red's 3 escrowed coins come back in full.
        let catalog = wide_catalog();
        let (mut roster, mut auction) = auction_setup(1, &catalog);
        let blue = PlayerId(0);
        let red = PlayerId(1);

        auction.place_bid(&mut roster, red, 3).unwrap();
        assert_eq!(roster.get(red).unwrap().coins, STARTING_COINS - 3);
        auction.place_bid(&mut roster, blue, 5).unwrap();

        for _ in 0..LOT_TIMER_SECS {
            auction.tick(&mut roster, &catalog);
        }
        assert_eq!(roster.get(blue).unwrap().coins, STARTING_COINS - 5);
        assert_eq!(roster.get(red).unwrap().coins, STARTING_COINS);
        let result = &auction.results()[0];
        assert_eq!(result.winning_team, Team::Blue);
        assert_eq!(result.winning_bid, 5);
        assert!(roster.get(blue).unwrap().item.is_some());
        assert!(roster.get(red).unwrap().item.is_none());
    }

    #[test]
    fn test_losing_team_is_refunded_in_full() {
        let catalog = wide_catalog();
        let (mut roster, mut auction) = auction_setup(2, &catalog);
        // Blue: two contributors. Red outbids them.
        auction.place_bid(&mut roster, PlayerId(0), 2).unwrap();
        auction.place_bid(&mut roster, PlayerId(1), 1).unwrap();
        auction.place_bid(&mut roster, PlayerId(2), 4).unwrap();

        for _ in 0..LOT_TIMER_SECS {
            auction.tick(&mut roster, &catalog);
        }
        // Losing blue contributions fully refunded, red escrow spent.
        assert_eq!(roster.get(PlayerId(0)).unwrap().coins, STARTING_COINS);
        assert_eq!(roster.get(PlayerId(1)).unwrap().coins, STARTING_COINS);
        assert_eq!(roster.get(PlayerId(2)).unwrap().coins, STARTING_COINS - 4);
        assert_eq!(auction.results()[0].winning_team, Team::Red);
    }

    #[test]
    fn test_coin_conservation_holds_through_a_full_auction() {
        let catalog = wide_catalog();
        let (mut roster, mut auction) = auction_setup(2, &catalog);
        let initial = total_coins(&roster);

        let mut bid = 1;
        let mut bidder = 0u64;
        // Drive the whole auction with alternating escalating bids.
        for _ in 0..600 {
            if auction.is_complete() {
                break;
            }
            if auction.lot_phase() == LotPhase::Bidding {
                let _ = auction.place_bid(&mut roster, PlayerId(bidder % 4), bid);
                bidder += 1;
                bid += 1;
            }
            auction.tick(&mut roster, &catalog);
            // Invariant: coins in balances + live escrow + spent == start.
            assert_eq!(
                total_coins(&roster) + escrowed(&auction) + spent(&auction),
                initial
            );
        }
        assert!(auction.is_complete());
        // Every teamed player ended up with an item.
        for p in roster.teamed() {
            assert!(p.item.is_some());
        }
    }

    #[test]
    fn test_contribution_is_cumulative_and_monotonic() {
        let catalog = wide_catalog();
        let (mut roster, mut auction) = auction_setup(1, &catalog);
        let blue = PlayerId(0);

        auction.place_bid(&mut roster, blue, 3).unwrap();
        assert_eq!(auction.contribution(Team::Blue, blue), 3);
        assert_eq!(roster.get(blue).unwrap().coins, STARTING_COINS - 3);

        // Raising to 5 escrows only the delta.
        auction.place_bid(&mut roster, blue, 5).unwrap();
        assert_eq!(auction.contribution(Team::Blue, blue), 5);
        assert_eq!(roster.get(blue).unwrap().coins, STARTING_COINS - 5);

        // Lowering is rejected with no state change.
        assert_eq!(
            auction.place_bid(&mut roster, blue, 4),
            Err(DraftError::BidDecreased)
        );
        assert_eq!(auction.contribution(Team::Blue, blue), 5);
        assert_eq!(roster.get(blue).unwrap().coins, STARTING_COINS - 5);
    }

    #[test]
    fn test_bid_must_strictly_exceed_opposing_total() {
        let catalog = wide_catalog();
        let (mut roster, mut auction) = auction_setup(1, &catalog);
        auction.place_bid(&mut roster, PlayerId(0), 4).unwrap();
        assert_eq!(
            auction.place_bid(&mut roster, PlayerId(1), 4),
            Err(DraftError::BidTooLow)
        );
        auction.place_bid(&mut roster, PlayerId(1), 5).unwrap();
    }

    #[test]
    fn test_bid_rejected_when_unaffordable() {
        let catalog = wide_catalog();
        let (mut roster, mut auction) = auction_setup(1, &catalog);
        assert_eq!(
            auction.place_bid(&mut roster, PlayerId(0), STARTING_COINS + 1),
            Err(DraftError::InsufficientCoins)
        );
        assert_eq!(roster.get(PlayerId(0)).unwrap().coins, STARTING_COINS);
        assert_eq!(auction.total(Team::Blue), 0);
    }

    #[test]
    fn test_successful_bid_tops_up_short_timer() {
        let catalog = wide_catalog();
        let (mut roster, mut auction) = auction_setup(1, &catalog);
        // Run the timer down to 2 seconds.
        for _ in 0..(LOT_TIMER_SECS - 2) {
            auction.tick(&mut roster, &catalog);
        }
        assert_eq!(auction.lot_timer(), 2);
        auction.place_bid(&mut roster, PlayerId(0), 1).unwrap();
        assert_eq!(auction.lot_timer(), MIN_TIMER_AFTER_BID);

        // A bid with plenty of time left never shortens the timer.
        auction.place_bid(&mut roster, PlayerId(1), 2).unwrap();
        assert_eq!(auction.lot_timer(), MIN_TIMER_AFTER_BID);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let catalog = wide_catalog();
        let (mut roster, mut auction) = auction_setup(1, &catalog);
        auction.place_bid(&mut roster, PlayerId(0), 5).unwrap();

        auction.resolve(&mut roster);
        let coins_after = roster.get(PlayerId(0)).unwrap().coins;
        let results_after = auction.results().len();

        // A racing second trigger is swallowed by the phase guard.
        auction.resolve(&mut roster);
        assert_eq!(roster.get(PlayerId(0)).unwrap().coins, coins_after);
        assert_eq!(auction.results().len(), results_after);
    }

    #[test]
    fn test_zero_bid_lot_goes_free_to_an_open_team() {
        let catalog = wide_catalog();
        let (mut roster, mut auction) = auction_setup(1, &catalog);
        for _ in 0..LOT_TIMER_SECS {
            auction.tick(&mut roster, &catalog);
        }
        let result = &auction.results()[0];
        assert_eq!(result.winning_bid, 0);
        let winner_count = roster
            .teamed()
            .iter()
            .filter(|p| p.item.is_some())
            .count();
        assert_eq!(winner_count, 1);
        assert_eq!(total_coins(&roster), 2 * STARTING_COINS);
    }

    #[test]
    fn test_uncontested_lot_skips_bidding() {
        // Two blue players, one red: once red's slot fills, remaining
        // lots go to blue for free without a bidding round.
        let catalog = wide_catalog();
        let mut roster = Roster::new();
        let config = DraftConfig::default();
        for (id, team) in [
            (0, Team::Blue),
            (1, Team::Blue),
            (2, Team::Red),
        ] {
            roster.join(PlayerId(id), &format!("p{id}"), None).unwrap();
            roster.set_team(PlayerId(id), team).unwrap();
            initialize_player(
                DraftMode::Auction,
                roster.get_mut(PlayerId(id)).unwrap(),
                &config,
            );
        }
        let mut auction = AuctionState::start(&mut roster, &catalog);

        // Red wins the first lot outright.
        auction.place_bid(&mut roster, PlayerId(2), 1).unwrap();
        for _ in 0..LOT_TIMER_SECS {
            auction.tick(&mut roster, &catalog);
        }
        assert_eq!(auction.results()[0].winning_team, Team::Red);

        // Everything after that is uncontested: drive to completion and
        // confirm no further coins moved.
        for _ in 0..200 {
            if auction.is_complete() {
                break;
            }
            auction.tick(&mut roster, &catalog);
        }
        assert!(auction.is_complete());
        for result in &auction.results()[1..] {
            assert_eq!(result.winning_team, Team::Blue);
            assert_eq!(result.winning_bid, 0);
        }
        for p in roster.teamed() {
            assert!(p.item.is_some());
        }
    }

    #[test]
    fn test_bid_from_full_team_is_rejected() {
        let catalog = wide_catalog();
        let (mut roster, mut auction) = auction_setup(1, &catalog);
        // Hand blue's only player an item: blue is now full.
        roster.get_mut(PlayerId(0)).unwrap().item =
            Some(Item::new("sona", "Sona"));
        assert_eq!(
            auction.place_bid(&mut roster, PlayerId(0), 1),
            Err(DraftError::TeamHasNoSlot)
        );
    }

    #[test]
    fn test_bid_against_full_opponent_resolves_immediately() {
        let catalog = wide_catalog();
        let (mut roster, mut auction) = auction_setup(1, &catalog);
        roster.get_mut(PlayerId(1)).unwrap().item =
            Some(Item::new("sona", "Sona"));

        auction.place_bid(&mut roster, PlayerId(0), 2).unwrap();
        assert_eq!(auction.lot_phase(), LotPhase::Resolving);
        assert_eq!(auction.results()[0].winning_team, Team::Blue);
    }

    #[test]
    fn test_nonzero_tie_is_broken_for_either_team() {
        let catalog = wide_catalog();
        let mut saw = std::collections::HashSet::new();
        for _ in 0..60 {
            let (mut roster, mut auction) = auction_setup(1, &catalog);
            auction.place_bid(&mut roster, PlayerId(0), 2).unwrap();
            auction.place_bid(&mut roster, PlayerId(1), 3).unwrap();
            // Equal totals can't arise through place_bid (equality is
            // rejected), so stage the 3-3 tie directly and resolve.
            auction.blue.total = 3;
            auction.blue.contributions.insert(PlayerId(0), 3);
            roster.get_mut(PlayerId(0)).unwrap().coins = STARTING_COINS - 3;
            auction.resolve(&mut roster);
            saw.insert(auction.results()[0].winning_team);
        }
        assert!(saw.contains(&Team::Blue));
        assert!(saw.contains(&Team::Red));
    }

    #[test]
    fn test_post_auction_cleanup_assigns_leftover_players() {
        // A 2-item catalog with 4 teamed players: the queue runs out
        // before demand is met, so cleanup must cover the rest.
        let catalog = catalog_of(&["Ahri", "Ashe"]);
        let (mut roster, mut auction) = auction_setup(2, &catalog);
        // Queue wanted 4 lots but only 2 items exist.
        assert_eq!(auction.lot_queue.len(), 2);

        for _ in 0..400 {
            if auction.is_complete() {
                break;
            }
            auction.tick(&mut roster, &catalog);
        }
        assert!(auction.is_complete());
        for p in roster.teamed() {
            assert!(p.item.is_some(), "cleanup must leave nobody itemless");
        }
    }
}
