//! Two-option pick: each player chooses between two offered items.

use rand::seq::SliceRandom;
use riftdraft_protocol::{Item, PlayerId};

use crate::{Catalog, DraftError, Result, Roster, TeamBenches};

use super::eligible_items;

/// Deals two card options to every teamed player.
///
/// Options are kept distinct within a team: an item offered to one
/// teammate is not offered to another, falling back to the full catalog
/// under scarcity so everyone always gets two cards when the catalog
/// allows it.
pub fn deal(roster: &mut Roster, catalog: &Catalog) {
    let ids = roster.teamed_ids();
    let mut rng = rand::rng();

    for id in ids {
        let Some(player) = roster.get(id) else { continue };
        let Some(team) = player.team else { continue };

        let held = roster.team_held_names(team, Some(id));
        let offered: std::collections::HashSet<String> = roster
            .players_on_team(team)
            .iter()
            .filter(|p| p.id != id)
            .filter_map(|p| p.card_options.as_ref())
            .flatten()
            .map(|item| item.name.clone())
            .collect();

        let mut pool: Vec<Item> = eligible_items(catalog, player)
            .into_iter()
            .filter(|item| !held.contains(&item.name) && !offered.contains(&item.name))
            .collect();
        pool.shuffle(&mut rng);
        let mut options: Vec<Item> = pool.into_iter().take(2).collect();

        if options.len() < 2 {
            // Scarcity: pad from the whole catalog, still distinct within
            // this player's own pair.
            let mut rest: Vec<Item> = catalog
                .items()
                .iter()
                .filter(|item| !options.iter().any(|o| o.id == item.id))
                .cloned()
                .collect();
            rest.shuffle(&mut rng);
            options.extend(rest.into_iter().take(2 - options.len()));
        }

        if let Some(player) = roster.get_mut(id) {
            player.card_options = Some(options);
        }
    }
}

/// Resolves a player's choice: the chosen card is assigned, the unchosen
/// one goes to the team bench.
pub fn pick(
    roster: &mut Roster,
    benches: &mut TeamBenches,
    id: PlayerId,
    index: usize,
) -> Result<()> {
    let player = roster.get(id).ok_or(DraftError::UnknownPlayer(id))?;
    let team = player.team.ok_or(DraftError::NotOnTeam)?;
    let options = player
        .card_options
        .as_ref()
        .ok_or(DraftError::NoCardOptions)?;
    if index >= options.len() {
        return Err(DraftError::BadCardIndex);
    }
    let chosen = options[index].clone();
    if roster.team_holds(team, &chosen.name, Some(id)) {
        return Err(DraftError::AlreadyTaken);
    }

    let player = roster.get_mut(id).ok_or(DraftError::UnknownPlayer(id))?;
    let mut options = player.card_options.take().unwrap_or_default();
    options.retain(|item| item.id != chosen.id);
    player.item = Some(chosen);
    for leftover in options {
        benches.push(team, leftover);
    }
    Ok(())
}
