//! Memory pick: five cards are revealed, shuffled face-down, then picked
//! by remembered position.
//!
//! The reveal/shuffle countdowns ride the session's 1-second tick rather
//! than free-running timers, so they are serialized with every other
//! operation and die naturally once the player has picked or the session
//! has completed.

use rand::seq::SliceRandom;
use riftdraft_protocol::{Item, MemoryPhase, PlayerId};

use crate::{Catalog, DraftError, MemoryState, Result, Roster};

use super::eligible_items;

/// Seconds the cards stay face-up.
pub const REVEAL_SECS: u32 = 5;
/// Seconds the shuffle animation runs before picking opens.
pub const SHUFFLE_SECS: u32 = 3;
/// Cards offered per player.
pub const CARD_COUNT: usize = 5;

/// Deals each teamed player their card set and starts the reveal phase.
pub fn deal(roster: &mut Roster, catalog: &Catalog) {
    let ids = roster.teamed_ids();
    let mut rng = rand::rng();

    for id in ids {
        let Some(player) = roster.get(id) else { continue };
        let Some(team) = player.team else { continue };

        let held = roster.team_held_names(team, Some(id));
        let mut pool: Vec<Item> = eligible_items(catalog, player)
            .into_iter()
            .filter(|item| !held.contains(&item.name))
            .collect();
        pool.shuffle(&mut rng);
        let mut cards: Vec<Item> = pool.into_iter().take(CARD_COUNT).collect();

        if cards.len() < CARD_COUNT {
            // Scarcity: top up from the catalog, keeping the set distinct.
            let mut rest: Vec<Item> = catalog
                .items()
                .iter()
                .filter(|item| !cards.iter().any(|c| c.id == item.id))
                .cloned()
                .collect();
            rest.shuffle(&mut rng);
            cards.extend(rest.into_iter().take(CARD_COUNT - cards.len()));
        }

        let mut positions: Vec<usize> = (0..cards.len()).collect();
        positions.shuffle(&mut rng);

        if let Some(player) = roster.get_mut(id) {
            player.memory = Some(MemoryState {
                cards,
                shuffled_positions: positions,
                phase: MemoryPhase::Reveal,
                phase_remaining: REVEAL_SECS,
                picked: false,
            });
        }
    }
}

/// Advances every unpicked player's reveal/shuffle countdown by one second.
pub fn tick(roster: &mut Roster) {
    let ids = roster.teamed_ids();
    for id in ids {
        let Some(player) = roster.get_mut(id) else { continue };
        let Some(memory) = player.memory.as_mut() else { continue };
        if memory.picked {
            continue;
        }
        match memory.phase {
            MemoryPhase::Reveal => {
                memory.phase_remaining = memory.phase_remaining.saturating_sub(1);
                if memory.phase_remaining == 0 {
                    memory.phase = MemoryPhase::Shuffle;
                    memory.phase_remaining = SHUFFLE_SECS;
                }
            }
            MemoryPhase::Shuffle => {
                memory.phase_remaining = memory.phase_remaining.saturating_sub(1);
                if memory.phase_remaining == 0 {
                    memory.phase = MemoryPhase::Pick;
                }
            }
            MemoryPhase::Pick => {}
        }
    }
}

/// Resolves a player's position choice, mapping the face-down position
/// back to the underlying card.
pub fn pick(roster: &mut Roster, id: PlayerId, position: usize) -> Result<()> {
    let player = roster.get(id).ok_or(DraftError::UnknownPlayer(id))?;
    let team = player.team.ok_or(DraftError::NotOnTeam)?;
    let memory = player.memory.as_ref().ok_or(DraftError::NoCardOptions)?;
    if memory.phase != MemoryPhase::Pick || memory.picked {
        return Err(DraftError::MemoryNotPickable);
    }
    if position >= memory.shuffled_positions.len() {
        return Err(DraftError::BadCardPosition);
    }
    let card = memory.cards[memory.shuffled_positions[position]].clone();

    // A teammate may have claimed the same item in the interim.
    if roster.team_holds(team, &card.name, Some(id)) {
        return Err(DraftError::AlreadyTaken);
    }

    let player = roster.get_mut(id).ok_or(DraftError::UnknownPlayer(id))?;
    if let Some(memory) = player.memory.as_mut() {
        memory.picked = true;
    }
    tracing::debug!(%id, item = %card.name, "memory card picked");
    player.item = Some(card);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftdraft_protocol::Team;

    fn catalog_of(names: &[&str]) -> Catalog {
        Catalog::new(
            names
                .iter()
                .map(|n| Item::new(n.to_lowercase(), *n))
                .collect(),
        )
    }

    fn solo_roster() -> Roster {
        let mut roster = Roster::new();
        roster.join(PlayerId(1), "ana", None).unwrap();
        roster.set_team(PlayerId(1), Team::Blue).unwrap();
        roster
    }

    fn full_catalog() -> Catalog {
        catalog_of(&["Ahri", "Ashe", "Garen", "Jinx", "Lux", "Zed", "Teemo"])
    }

    #[test]
    fn test_deal_gives_five_distinct_cards_and_a_permutation() {
        let mut roster = solo_roster();
        deal(&mut roster, &full_catalog());

        let memory = roster.get(PlayerId(1)).unwrap().memory.as_ref().unwrap();
        assert_eq!(memory.cards.len(), CARD_COUNT);
        let unique: std::collections::HashSet<&str> =
            memory.cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(unique.len(), CARD_COUNT);

        let mut positions = memory.shuffled_positions.clone();
        positions.sort_unstable();
        assert_eq!(positions, (0..CARD_COUNT).collect::<Vec<_>>());
        assert_eq!(memory.phase, MemoryPhase::Reveal);
    }

    #[test]
    fn test_phases_advance_reveal_then_shuffle_then_pick() {
        let mut roster = solo_roster();
        deal(&mut roster, &full_catalog());

        for _ in 0..REVEAL_SECS {
            assert_eq!(
                roster.get(PlayerId(1)).unwrap().memory.as_ref().unwrap().phase,
                MemoryPhase::Reveal
            );
            tick(&mut roster);
        }
        for _ in 0..SHUFFLE_SECS {
            assert_eq!(
                roster.get(PlayerId(1)).unwrap().memory.as_ref().unwrap().phase,
                MemoryPhase::Shuffle
            );
            tick(&mut roster);
        }
        assert_eq!(
            roster.get(PlayerId(1)).unwrap().memory.as_ref().unwrap().phase,
            MemoryPhase::Pick
        );
    }

    #[test]
    fn test_pick_before_pick_phase_fails() {
        let mut roster = solo_roster();
        deal(&mut roster, &full_catalog());
        assert_eq!(
            pick(&mut roster, PlayerId(1), 0),
            Err(DraftError::MemoryNotPickable)
        );
    }

    #[test]
    fn test_pick_maps_position_through_the_permutation() {
        let mut roster = solo_roster();
        deal(&mut roster, &full_catalog());
        for _ in 0..(REVEAL_SECS + SHUFFLE_SECS) {
            tick(&mut roster);
        }

        let memory = roster.get(PlayerId(1)).unwrap().memory.clone().unwrap();
        let expected = memory.cards[memory.shuffled_positions[2]].clone();
        pick(&mut roster, PlayerId(1), 2).unwrap();
        assert_eq!(roster.get(PlayerId(1)).unwrap().item, Some(expected));
    }

    #[test]
    fn test_pick_fails_when_teammate_claimed_the_card() {
        let mut roster = solo_roster();
        roster.join(PlayerId(2), "bo", None).unwrap();
        roster.set_team(PlayerId(2), Team::Blue).unwrap();
        deal(&mut roster, &full_catalog());
        for _ in 0..(REVEAL_SECS + SHUFFLE_SECS) {
            tick(&mut roster);
        }

        // Teammate grabs the exact card player 1 is about to pick.
        let memory = roster.get(PlayerId(1)).unwrap().memory.clone().unwrap();
        let contested = memory.cards[memory.shuffled_positions[0]].clone();
        roster.get_mut(PlayerId(2)).unwrap().item = Some(contested);

        assert_eq!(
            pick(&mut roster, PlayerId(1), 0),
            Err(DraftError::AlreadyTaken)
        );
        // Nothing assigned; the player may pick a different position.
        assert!(roster.get(PlayerId(1)).unwrap().item.is_none());
        assert!(!roster.get(PlayerId(1)).unwrap().memory.as_ref().unwrap().picked);
    }

    #[test]
    fn test_tick_stops_after_pick() {
        let mut roster = solo_roster();
        deal(&mut roster, &full_catalog());
        for _ in 0..(REVEAL_SECS + SHUFFLE_SECS) {
            tick(&mut roster);
        }
        pick(&mut roster, PlayerId(1), 1).unwrap();
        assert_eq!(
            pick(&mut roster, PlayerId(1), 0),
            Err(DraftError::MemoryNotPickable)
        );
    }
}
