//! The per-room draft session: one finite-state machine owning roster,
//! benches, catalog, strategy, trades, and the clock.
//!
//! ```text
//! Lobby → Drafting → Completed
//! ```
//!
//! Every externally triggered operation — player actions and the
//! 1-second tick alike — is a `&mut self` method, so whoever owns the
//! session (normally a room actor) is its single serializer. Each
//! operation validates in full before mutating, and errors belong to the
//! initiator only.

use std::collections::HashSet;

use riftdraft_protocol::{
    AuctionView, ClientCommand, DraftConfig, DraftMode, MemoryView, PlayerId,
    PlayerView, RoomCode, SessionPhase, SessionSnapshot, Team, TradeOfferView,
};

use crate::strategy::{
    self, AuctionState, StrategyState, memory, random, two_card,
};
use crate::{
    Catalog, DraftError, Result, Roster, TeamBenches, TradeBook,
};

/// Trading window after an auction finishes, in seconds.
pub const TRADE_PHASE_SECS: u32 = 60;

/// One room's draft session.
#[derive(Debug)]
pub struct DraftSession {
    code: RoomCode,
    host: Option<PlayerId>,
    phase: SessionPhase,
    roster: Roster,
    benches: TeamBenches,
    trades: TradeBook,
    /// Loaded once, before the first draft runs. Memoized.
    catalog: Option<Catalog>,
    mode: DraftMode,
    strategy: StrategyState,
    clock_seconds: u32,
}

impl DraftSession {
    pub fn new(code: RoomCode) -> Self {
        tracing::info!(%code, "session created");
        Self {
            code,
            host: None,
            phase: SessionPhase::Lobby,
            roster: Roster::new(),
            benches: TeamBenches::new(),
            trades: TradeBook::new(),
            catalog: None,
            mode: DraftMode::default(),
            strategy: StrategyState::DirectRandom,
            clock_seconds: 0,
        }
    }

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn host(&self) -> Option<PlayerId> {
        self.host
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn clock_seconds(&self) -> u32 {
        self.clock_seconds
    }

    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Stores the loaded catalog. Later loads are ignored; the catalog
    /// is immutable for the life of the session.
    pub fn attach_catalog(&mut self, catalog: Catalog) {
        if self.catalog.is_none() {
            self.catalog = Some(catalog);
        }
    }

    pub fn catalog_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    // -----------------------------------------------------------------
    // Lobby operations
    // -----------------------------------------------------------------

    /// Adds a participant. The first joiner becomes host.
    pub fn join(
        &mut self,
        id: PlayerId,
        name: &str,
        pool_filter: Option<HashSet<String>>,
    ) -> Result<()> {
        if self.phase != SessionPhase::Lobby {
            return Err(DraftError::AlreadyStarted);
        }
        self.roster.join(id, name, pool_filter)?;
        if self.host.is_none() {
            self.host = Some(id);
        }
        Ok(())
    }

    /// Removes a participant (disconnect is modeled as an ordinary
    /// leave). Their held item returns to the team bench; the host role
    /// transfers to the earliest-joined remaining player.
    ///
    /// Returns `false` if the player was not in the session.
    pub fn leave(&mut self, id: PlayerId) -> bool {
        let Some(player) = self.roster.remove(id) else {
            return false;
        };
        if let (Some(team), Some(item)) = (player.team, player.item) {
            tracing::info!(%id, item = %item.name, %team, "benching departing player's item");
            self.benches.push(team, item);
        }
        self.trades.drop_involving(id);
        if self.host == Some(id) {
            self.host = self.roster.first_by_join();
        }
        // The departure may leave everyone remaining locked.
        if self.phase == SessionPhase::Drafting && self.all_teamed_locked() {
            self.complete();
        }
        true
    }

    pub fn set_team(&mut self, id: PlayerId, team: Team) -> Result<()> {
        if self.phase != SessionPhase::Lobby {
            return Err(DraftError::AlreadyStarted);
        }
        self.roster.set_team(id, team)
    }

    /// Starts the draft: validates team makeup, picks the strategy, and
    /// runs its distribution. The catalog must be attached first (the
    /// room layer awaits the one-time load before calling this).
    pub fn start_draft(
        &mut self,
        actor: PlayerId,
        config: DraftConfig,
    ) -> Result<()> {
        if self.phase != SessionPhase::Lobby {
            return Err(DraftError::AlreadyStarted);
        }
        if self.host != Some(actor) {
            return Err(DraftError::NotHost);
        }
        let blue = self.roster.players_on_team(Team::Blue).len();
        let red = self.roster.players_on_team(Team::Red).len();
        if blue == 0 || red == 0 || blue + red < 2 {
            return Err(DraftError::NotEnoughPlayers);
        }
        let Some(catalog) = self.catalog.as_ref() else {
            return Err(DraftError::CatalogNotLoaded);
        };

        self.mode = config.mode;
        self.benches.clear();
        self.trades.clear();
        let ids = self.roster.teamed_ids();
        for id in ids {
            if let Some(player) = self.roster.get_mut(id) {
                strategy::initialize_player(config.mode, player, &config);
            }
        }

        let settings = strategy::settings(config.mode);
        tracing::info!(
            code = %self.code,
            mode = settings.display_name,
            players = blue + red,
            "draft starting"
        );
        self.phase = SessionPhase::Drafting;
        match config.mode {
            DraftMode::DirectRandom => {
                random::assign(&mut self.roster, catalog);
                self.strategy = StrategyState::DirectRandom;
                self.clock_seconds =
                    config.timer_seconds.unwrap_or(settings.timer_seconds);
            }
            DraftMode::TwoCardPick => {
                two_card::deal(&mut self.roster, catalog);
                self.strategy = StrategyState::TwoCardPick;
                self.clock_seconds =
                    config.timer_seconds.unwrap_or(settings.timer_seconds);
            }
            DraftMode::MemoryPick => {
                memory::deal(&mut self.roster, catalog);
                self.strategy = StrategyState::MemoryPick;
                self.clock_seconds =
                    config.timer_seconds.unwrap_or(settings.timer_seconds);
            }
            DraftMode::Auction => {
                let auction = AuctionState::start(&mut self.roster, catalog);
                // The session clock is held while the auction runs; it
                // becomes the trading window once the lots are gone.
                self.clock_seconds = if auction.is_complete() {
                    TRADE_PHASE_SECS
                } else {
                    0
                };
                self.strategy = StrategyState::Auction(auction);
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // The clock
    // -----------------------------------------------------------------

    /// One second of session time. Serialized with every other operation
    /// by the owner; drives the session clock, memory-pick phases, and
    /// the auction.
    pub fn tick(&mut self) {
        if self.phase != SessionPhase::Drafting {
            return;
        }

        match &mut self.strategy {
            StrategyState::MemoryPick => memory::tick(&mut self.roster),
            StrategyState::Auction(auction) if !auction.is_complete() => {
                let Some(catalog) = self.catalog.as_ref() else { return };
                if auction.tick(&mut self.roster, catalog) {
                    self.clock_seconds = TRADE_PHASE_SECS;
                }
                return;
            }
            _ => {}
        }

        self.clock_seconds = self.clock_seconds.saturating_sub(1);
        if self.clock_seconds == 0 {
            tracing::info!(code = %self.code, "clock expired, auto-locking");
            self.auto_lock_all();
            self.complete();
        }
    }

    // -----------------------------------------------------------------
    // Drafting operations
    // -----------------------------------------------------------------

    /// Direct-random only: bench the current item and draw a fresh one,
    /// spending a reroll token.
    pub fn reroll(&mut self, id: PlayerId) -> Result<()> {
        if self.phase != SessionPhase::Drafting {
            return Err(DraftError::NotDrafting);
        }
        if !strategy::settings(self.mode).uses_rerolls {
            return Err(DraftError::RerollsDisabled);
        }
        let Some(catalog) = self.catalog.as_ref() else {
            return Err(DraftError::CatalogNotLoaded);
        };
        let player = self.roster.get(id).ok_or(DraftError::UnknownPlayer(id))?;
        let team = player.team.ok_or(DraftError::NotOnTeam)?;
        if player.locked {
            return Err(DraftError::PlayerLocked);
        }
        if player.item.is_none() {
            return Err(DraftError::NoItem);
        }
        if player.reroll_tokens == 0 {
            return Err(DraftError::NoRerollTokens);
        }

        // Validated. Bench the old item, then draw excluding teammate
        // holdings and the bench (which now includes the old item).
        if let Some(player) = self.roster.get_mut(id) {
            if let Some(old) = player.item.take() {
                self.benches.push(team, old);
            }
        }
        let replacement =
            random::draw(&self.roster, catalog, id, Some(&self.benches));
        if let Some(player) = self.roster.get_mut(id) {
            player.item = replacement;
            player.reroll_tokens -= 1;
            tracing::debug!(%id, tokens_left = player.reroll_tokens, "rerolled");
        }
        Ok(())
    }

    /// Two-card-pick only: resolve the player's choice.
    pub fn pick_card(&mut self, id: PlayerId, index: usize) -> Result<()> {
        if self.phase != SessionPhase::Drafting {
            return Err(DraftError::NotDrafting);
        }
        two_card::pick(&mut self.roster, &mut self.benches, id, index)
    }

    /// Memory-pick only: resolve the player's remembered position.
    pub fn pick_memory_card(
        &mut self,
        id: PlayerId,
        position: usize,
    ) -> Result<()> {
        if self.phase != SessionPhase::Drafting {
            return Err(DraftError::NotDrafting);
        }
        memory::pick(&mut self.roster, id, position)
    }

    /// Auction only: raise the player's cumulative contribution.
    pub fn place_bid(&mut self, id: PlayerId, amount: u32) -> Result<()> {
        if self.phase != SessionPhase::Drafting {
            return Err(DraftError::NotDrafting);
        }
        match &mut self.strategy {
            StrategyState::Auction(auction) => {
                auction.place_bid(&mut self.roster, id, amount)
            }
            _ => Err(DraftError::BiddingClosed),
        }
    }

    /// Exchanges the player's held item with one on their team bench.
    pub fn swap_with_bench(&mut self, id: PlayerId, item_id: &str) -> Result<()> {
        if self.phase != SessionPhase::Drafting {
            return Err(DraftError::NotDrafting);
        }
        let player = self.roster.get(id).ok_or(DraftError::UnknownPlayer(id))?;
        let team = player.team.ok_or(DraftError::NotOnTeam)?;
        if player.locked {
            return Err(DraftError::PlayerLocked);
        }
        if player.item.is_none() {
            return Err(DraftError::NoItem);
        }
        let index = self
            .benches
            .position_of(team, item_id)
            .ok_or(DraftError::NotOnBench)?;
        let wanted = &self.benches.team(team)[index];
        if let Some(filter) = &player.pool_filter {
            if !filter.contains(&wanted.name) {
                return Err(DraftError::OutsidePool);
            }
        }
        if self.roster.team_holds(team, &wanted.name, Some(id)) {
            return Err(DraftError::AlreadyTaken);
        }

        let player = self.roster.get_mut(id).ok_or(DraftError::UnknownPlayer(id))?;
        let held = player.item.take().ok_or(DraftError::NoItem)?;
        player.item = Some(self.benches.swap_at(team, index, held));
        Ok(())
    }

    /// Locks in the player's current item. When the last teamed player
    /// locks, the session completes.
    pub fn lock(&mut self, id: PlayerId) -> Result<()> {
        if self.phase != SessionPhase::Drafting {
            return Err(DraftError::NotDrafting);
        }
        let player = self.roster.get_mut(id).ok_or(DraftError::UnknownPlayer(id))?;
        if player.item.is_none() {
            return Err(DraftError::NoItem);
        }
        player.locked = true;
        // A locked player can no longer honor offers in either role.
        self.trades.drop_involving(id);
        if self.all_teamed_locked() {
            self.complete();
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // Trading
    // -----------------------------------------------------------------

    pub fn offer_trade(&mut self, from: PlayerId, to: PlayerId) -> Result<()> {
        if self.phase != SessionPhase::Drafting {
            return Err(DraftError::NotDrafting);
        }
        self.trades.offer(&self.roster, from, to)
    }

    pub fn respond_to_trade(
        &mut self,
        target: PlayerId,
        accepted: bool,
    ) -> Result<()> {
        if self.phase != SessionPhase::Drafting {
            return Err(DraftError::NotDrafting);
        }
        if accepted {
            self.trades.accept(&mut self.roster, target)
        } else {
            self.trades.decline(target);
            Ok(())
        }
    }

    /// Routes a [`ClientCommand`] to the matching operation.
    pub fn apply(&mut self, actor: PlayerId, cmd: ClientCommand) -> Result<()> {
        match cmd {
            ClientCommand::SetTeam { team } => self.set_team(actor, team),
            ClientCommand::StartDraft { config } => {
                self.start_draft(actor, config)
            }
            ClientCommand::Reroll => self.reroll(actor),
            ClientCommand::PickCard { index } => self.pick_card(actor, index),
            ClientCommand::PickMemoryCard { position } => {
                self.pick_memory_card(actor, position)
            }
            ClientCommand::PlaceBid { amount } => self.place_bid(actor, amount),
            ClientCommand::SwapWithBench { item_id } => {
                self.swap_with_bench(actor, &item_id)
            }
            ClientCommand::Lock => self.lock(actor),
            ClientCommand::OfferTrade { target } => {
                self.offer_trade(actor, target)
            }
            ClientCommand::RespondToTrade { accepted } => {
                self.respond_to_trade(actor, accepted)
            }
        }
    }

    // -----------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------

    /// Builds the personalized snapshot for `viewer`. Redaction happens
    /// here: the result can go on the wire as-is.
    pub fn snapshot_for(&self, viewer: PlayerId) -> SessionSnapshot {
        let viewer_team = self.roster.get(viewer).and_then(|p| p.team);
        let auction_done = matches!(
            &self.strategy,
            StrategyState::Auction(a) if a.is_complete()
        );
        let completed = self.phase == SessionPhase::Completed;

        let players = self
            .roster
            .iter()
            .map(|p| {
                let own = p.id == viewer;
                let visible = own
                    || completed
                    || auction_done
                    || (viewer_team.is_some() && p.team == viewer_team);
                let view = PlayerView {
                    id: p.id,
                    name: p.name.clone(),
                    team: p.team,
                    item: if visible { p.item.clone() } else { None },
                    reroll_tokens: if own { p.reroll_tokens } else { 0 },
                    locked: p.locked,
                    card_options: if own { p.card_options.clone() } else { None },
                    memory: if own {
                        p.memory.as_ref().map(|m| MemoryView {
                            phase: m.phase,
                            cards: (m.phase
                                == riftdraft_protocol::MemoryPhase::Reveal)
                                .then(|| m.cards.clone()),
                            positions: m.shuffled_positions.len(),
                        })
                    } else {
                        None
                    },
                };
                (p.id, view)
            })
            .collect();

        let bench = viewer_team
            .map(|team| self.benches.team(team).to_vec())
            .unwrap_or_default();

        let auction = match &self.strategy {
            StrategyState::Auction(a) => Some(AuctionView {
                lot_phase: a.lot_phase(),
                current_lot: a.current_lot().cloned(),
                lot_timer: a.lot_timer(),
                blue_total: a.total(Team::Blue),
                red_total: a.total(Team::Red),
                my_contribution: viewer_team
                    .map(|team| a.contribution(team, viewer))
                    .unwrap_or(0),
                my_coins: self
                    .roster
                    .get(viewer)
                    .map(|p| p.coins)
                    .unwrap_or(0),
                results: a.results().to_vec(),
            }),
            _ => None,
        };

        SessionSnapshot {
            code: self.code.clone(),
            host: self.host,
            phase: self.phase,
            clock_seconds: self.clock_seconds,
            players,
            bench,
            pending_trades: self
                .trades
                .iter()
                .map(|t| TradeOfferView {
                    from: t.from,
                    to: t.to,
                })
                .collect(),
            auction,
        }
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn all_teamed_locked(&self) -> bool {
        let teamed = self.roster.teamed();
        !teamed.is_empty() && teamed.iter().all(|p| p.locked)
    }

    /// Locks every unlocked teamed player, drawing a fallback item for
    /// anyone still empty-handed.
    fn auto_lock_all(&mut self) {
        let ids = self.roster.teamed_ids();
        for id in ids {
            let needs_item =
                self.roster.get(id).is_some_and(|p| p.item.is_none());
            let fallback = if needs_item {
                self.catalog.as_ref().and_then(|catalog| {
                    random::draw(&self.roster, catalog, id, Some(&self.benches))
                })
            } else {
                None
            };
            if let Some(player) = self.roster.get_mut(id) {
                if player.item.is_none() {
                    player.item = fallback;
                }
                player.locked = true;
            }
        }
    }

    fn complete(&mut self) {
        tracing::info!(code = %self.code, "session completed");
        self.phase = SessionPhase::Completed;
        self.clock_seconds = 0;
        self.trades.clear();
    }
}
