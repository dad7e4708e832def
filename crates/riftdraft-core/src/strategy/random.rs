//! Direct-random assignment: one uniform draw per teamed player.

use rand::seq::IndexedRandom;
use riftdraft_protocol::{Item, PlayerId, Team};

use crate::{Catalog, Roster, TeamBenches};

use super::eligible_items;

/// Assigns a random item to every teamed player, avoiding items already
/// held by teammates. Scarcity fallbacks, in order: ignore the player's
/// pool filter, then allow a teammate duplicate rather than block.
pub fn assign(roster: &mut Roster, catalog: &Catalog) {
    let ids = roster.teamed_ids();
    for id in ids {
        if let Some(item) = draw(roster, catalog, id, None) {
            if let Some(player) = roster.get_mut(id) {
                tracing::debug!(%id, item = %item.name, "random item assigned");
                player.item = Some(item);
            }
        }
    }
}

/// Draws one item for `id`, excluding teammate holdings and, when
/// `benches` is given, the team's bench (used by rerolls).
///
/// Returns `None` only on an empty catalog.
pub fn draw(
    roster: &Roster,
    catalog: &Catalog,
    id: PlayerId,
    benches: Option<&TeamBenches>,
) -> Option<Item> {
    let player = roster.get(id)?;
    let team = player.team?;
    let held = roster.team_held_names(team, Some(id));
    let excluded = |item: &Item| {
        held.contains(&item.name)
            || benches.is_some_and(|b| b.contains_name(team, &item.name))
    };

    let mut rng = rand::rng();

    let eligible: Vec<Item> = eligible_items(catalog, player)
        .into_iter()
        .filter(|item| !excluded(item))
        .collect();
    if let Some(item) = eligible.choose(&mut rng) {
        return Some(item.clone());
    }

    // Pool filter too narrow: any unheld catalog item.
    let unheld: Vec<&Item> = catalog
        .items()
        .iter()
        .filter(|item| !excluded(item))
        .collect();
    if let Some(item) = unheld.choose(&mut rng) {
        return Some((*item).clone());
    }

    // Scarcity: the team already covers the catalog. Allow a duplicate.
    catalog.items().choose(&mut rng).cloned()
}

/// Whether every pair of teammates on `team` holds distinct items.
#[cfg(test)]
pub fn team_items_distinct(roster: &Roster, team: Team) -> bool {
    let names: Vec<&str> = roster
        .players_on_team(team)
        .iter()
        .filter_map(|p| p.item.as_ref().map(|item| item.name.as_str()))
        .collect();
    let unique: std::collections::HashSet<&str> = names.iter().copied().collect();
    names.len() == unique.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_of(names: &[&str]) -> Catalog {
        Catalog::new(
            names
                .iter()
                .map(|n| Item::new(n.to_lowercase(), *n))
                .collect(),
        )
    }

    fn teamed_roster(blue: u64, red: u64) -> Roster {
        let mut roster = Roster::new();
        let mut id = 0;
        for _ in 0..blue {
            roster.join(PlayerId(id), &format!("b{id}"), None).unwrap();
            roster.set_team(PlayerId(id), Team::Blue).unwrap();
            id += 1;
        }
        for _ in 0..red {
            roster.join(PlayerId(id), &format!("r{id}"), None).unwrap();
            roster.set_team(PlayerId(id), Team::Red).unwrap();
            id += 1;
        }
        roster
    }

    #[test]
    fn test_two_v_two_over_five_items_yields_distinct_holdings() {
        let catalog = catalog_of(&["Ahri", "Ashe", "Garen", "Jinx", "Lux"]);
        for _ in 0..50 {
            let mut roster = teamed_roster(2, 2);
            assign(&mut roster, &catalog);
            for team in Team::BOTH {
                for p in roster.players_on_team(team) {
                    assert!(p.item.is_some());
                }
                assert!(team_items_distinct(&roster, team));
            }
        }
    }

    #[test]
    fn test_scarcity_falls_back_to_duplicates_rather_than_blocking() {
        let catalog = catalog_of(&["Lux"]);
        let mut roster = teamed_roster(2, 0);
        assign(&mut roster, &catalog);
        for p in roster.players_on_team(Team::Blue) {
            assert_eq!(p.item.as_ref().unwrap().name, "Lux");
        }
    }

    #[test]
    fn test_draw_excludes_bench_items() {
        let catalog = catalog_of(&["Ahri", "Ashe"]);
        let roster = teamed_roster(1, 0);
        let mut benches = TeamBenches::new();
        benches.push(Team::Blue, Item::new("ahri", "Ahri"));

        for _ in 0..20 {
            let item = draw(&roster, &catalog, PlayerId(0), Some(&benches)).unwrap();
            assert_eq!(item.name, "Ashe");
        }
    }

    #[test]
    fn test_pool_filter_is_honored_when_possible() {
        let catalog = catalog_of(&["Ahri", "Ashe", "Lux"]);
        let filter: std::collections::HashSet<String> = ["Lux".to_string()].into();
        let mut roster = Roster::new();
        roster.join(PlayerId(1), "ana", Some(filter)).unwrap();
        roster.set_team(PlayerId(1), Team::Blue).unwrap();

        let item = draw(&roster, &catalog, PlayerId(1), None).unwrap();
        assert_eq!(item.name, "Lux");
    }
}
