//! The trade mediator: offer/accept/decline between two teammates.

use std::collections::HashMap;

use riftdraft_protocol::PlayerId;

use crate::{DraftError, Result, Roster};

/// A recorded offer. Keyed by target, so each player has at most one
/// pending inbound offer; a newer offer to the same target overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTrade {
    pub from: PlayerId,
    pub to: PlayerId,
}

/// All pending trades in a session.
#[derive(Debug, Default)]
pub struct TradeBook {
    pending: HashMap<PlayerId, PendingTrade>,
}

impl TradeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an offer after validating both sides.
    ///
    /// Trades are only legal between two distinct, unlocked players on
    /// the same team who both already hold an item.
    pub fn offer(
        &mut self,
        roster: &Roster,
        from: PlayerId,
        to: PlayerId,
    ) -> Result<()> {
        if from == to {
            return Err(DraftError::SelfTrade);
        }
        let a = roster.get(from).ok_or(DraftError::UnknownPlayer(from))?;
        let b = roster.get(to).ok_or(DraftError::UnknownPlayer(to))?;

        if a.team.is_none() || a.team != b.team {
            return Err(DraftError::NotSameTeam);
        }
        if a.locked || b.locked {
            return Err(DraftError::TradeLocked);
        }
        if a.item.is_none() || b.item.is_none() {
            return Err(DraftError::TradeMissingItem);
        }

        self.pending.insert(to, PendingTrade { from, to });
        tracing::debug!(%from, %to, "trade offered");
        Ok(())
    }

    /// Swaps the two items atomically and clears the pending entry.
    ///
    /// The offer is revalidated first: if a participant has locked or
    /// left since the offer, the stale entry is cleared and the accept
    /// fails without touching any item.
    pub fn accept(&mut self, roster: &mut Roster, target: PlayerId) -> Result<()> {
        let trade = self
            .pending
            .get(&target)
            .copied()
            .ok_or(DraftError::NoPendingTrade)?;

        let check = |id: PlayerId| -> Result<()> {
            let p = roster.get(id).ok_or(DraftError::UnknownPlayer(id))?;
            if p.locked {
                return Err(DraftError::TradeLocked);
            }
            if p.item.is_none() {
                return Err(DraftError::TradeMissingItem);
            }
            Ok(())
        };
        if let Err(err) = check(trade.from).and_then(|()| check(trade.to)) {
            self.pending.remove(&target);
            return Err(err);
        }

        // Both sides validated above, so the takes cannot fail.
        let item_from = roster
            .get_mut(trade.from)
            .and_then(|p| p.item.take())
            .ok_or(DraftError::TradeMissingItem)?;
        let item_to = roster
            .get_mut(trade.to)
            .and_then(|p| p.item.take())
            .ok_or(DraftError::TradeMissingItem)?;
        if let Some(p) = roster.get_mut(trade.from) {
            p.item = Some(item_to);
        }
        if let Some(p) = roster.get_mut(trade.to) {
            p.item = Some(item_from);
        }

        self.pending.remove(&target);
        tracing::info!(from = %trade.from, to = %trade.to, "trade accepted");
        Ok(())
    }

    /// Clears the pending entry without effect. A no-op if none exists.
    pub fn decline(&mut self, target: PlayerId) {
        self.pending.remove(&target);
    }

    /// Drops every pending trade involving `id`, in either role.
    pub fn drop_involving(&mut self, id: PlayerId) {
        self.pending
            .retain(|_, trade| trade.from != id && trade.to != id);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingTrade> {
        self.pending.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftdraft_protocol::{Item, Team};

    fn roster_with_pair() -> Roster {
        let mut roster = Roster::new();
        roster.join(PlayerId(1), "ana", None).unwrap();
        roster.join(PlayerId(2), "bo", None).unwrap();
        roster.set_team(PlayerId(1), Team::Blue).unwrap();
        roster.set_team(PlayerId(2), Team::Blue).unwrap();
        roster.get_mut(PlayerId(1)).unwrap().item = Some(Item::new("lux", "Lux"));
        roster.get_mut(PlayerId(2)).unwrap().item = Some(Item::new("jinx", "Jinx"));
        roster
    }

    #[test]
    fn test_accept_swaps_exactly_the_two_items() {
        let mut roster = roster_with_pair();
        let mut trades = TradeBook::new();
        trades.offer(&roster, PlayerId(1), PlayerId(2)).unwrap();
        trades.accept(&mut roster, PlayerId(2)).unwrap();

        assert_eq!(roster.get(PlayerId(1)).unwrap().item.as_ref().unwrap().id, "jinx");
        assert_eq!(roster.get(PlayerId(2)).unwrap().item.as_ref().unwrap().id, "lux");
        assert_eq!(trades.iter().count(), 0);
    }

    #[test]
    fn test_decline_never_changes_ownership() {
        let mut roster = roster_with_pair();
        let mut trades = TradeBook::new();
        trades.offer(&roster, PlayerId(1), PlayerId(2)).unwrap();
        trades.decline(PlayerId(2));

        assert_eq!(roster.get(PlayerId(1)).unwrap().item.as_ref().unwrap().id, "lux");
        assert_eq!(roster.get(PlayerId(2)).unwrap().item.as_ref().unwrap().id, "jinx");
        assert_eq!(trades.iter().count(), 0);
    }

    #[test]
    fn test_offer_rejects_cross_team() {
        let mut roster = roster_with_pair();
        roster.set_team(PlayerId(2), Team::Red).unwrap();
        let mut trades = TradeBook::new();
        assert_eq!(
            trades.offer(&roster, PlayerId(1), PlayerId(2)),
            Err(DraftError::NotSameTeam)
        );
    }

    #[test]
    fn test_offer_rejects_locked_partner() {
        let mut roster = roster_with_pair();
        roster.get_mut(PlayerId(2)).unwrap().locked = true;
        let mut trades = TradeBook::new();
        assert_eq!(
            trades.offer(&roster, PlayerId(1), PlayerId(2)),
            Err(DraftError::TradeLocked)
        );
    }

    #[test]
    fn test_offer_rejects_itemless_partner() {
        let mut roster = roster_with_pair();
        roster.get_mut(PlayerId(2)).unwrap().item = None;
        let mut trades = TradeBook::new();
        assert_eq!(
            trades.offer(&roster, PlayerId(1), PlayerId(2)),
            Err(DraftError::TradeMissingItem)
        );
    }

    #[test]
    fn test_newer_offer_overwrites_older_one() {
        let mut roster = roster_with_pair();
        roster.join(PlayerId(3), "cy", None).unwrap();
        roster.set_team(PlayerId(3), Team::Blue).unwrap();
        roster.get_mut(PlayerId(3)).unwrap().item = Some(Item::new("zed", "Zed"));

        let mut trades = TradeBook::new();
        trades.offer(&roster, PlayerId(1), PlayerId(2)).unwrap();
        trades.offer(&roster, PlayerId(3), PlayerId(2)).unwrap();
        trades.accept(&mut roster, PlayerId(2)).unwrap();

        // The second offer won: 3 <-> 2.
        assert_eq!(roster.get(PlayerId(3)).unwrap().item.as_ref().unwrap().id, "jinx");
        assert_eq!(roster.get(PlayerId(2)).unwrap().item.as_ref().unwrap().id, "zed");
        assert_eq!(roster.get(PlayerId(1)).unwrap().item.as_ref().unwrap().id, "lux");
    }

    #[test]
    fn test_accept_fails_and_clears_if_partner_locked_meanwhile() {
        let mut roster = roster_with_pair();
        let mut trades = TradeBook::new();
        trades.offer(&roster, PlayerId(1), PlayerId(2)).unwrap();
        roster.get_mut(PlayerId(1)).unwrap().locked = true;

        assert_eq!(
            trades.accept(&mut roster, PlayerId(2)),
            Err(DraftError::TradeLocked)
        );
        // No swap happened, entry is gone.
        assert_eq!(roster.get(PlayerId(1)).unwrap().item.as_ref().unwrap().id, "lux");
        assert_eq!(
            trades.accept(&mut roster, PlayerId(2)),
            Err(DraftError::NoPendingTrade)
        );
    }

    #[test]
    fn test_drop_involving_clears_both_roles() {
        let mut roster = roster_with_pair();
        let mut trades = TradeBook::new();
        trades.offer(&roster, PlayerId(1), PlayerId(2)).unwrap();
        trades.drop_involving(PlayerId(1));
        assert_eq!(trades.iter().count(), 0);
    }
}
