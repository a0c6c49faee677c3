//! Neutral lairs and their guards

use ahash::AHashSet;
use rand::Rng;

use crate::actor::{ActorTemplate, Faction};
use crate::core::error::Result;
use crate::core::types::{ActorId, Coord};
use crate::map::{GameMap, TerrainKind};
use crate::skills::SkillRegistry;
use crate::spawning::structure::Structure;

/// Neighbor offsets tried around a lair, row by row
pub const LAIR_NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn is_lair_site(map: &GameMap, coord: Coord) -> bool {
    map.cell(coord).is_some_and(|c| {
        c.terrain.kind == TerrainKind::Plains && c.occupant.is_none() && c.structure.is_none()
    })
}

/// Drop between `min` and `max` lairs on empty plains
///
/// Gives up after `attempts` random draws. Returns the lair cells placed.
pub fn place_lairs(
    map: &mut GameMap,
    min: u32,
    max: u32,
    attempts: u32,
    rng: &mut impl Rng,
) -> Vec<Coord> {
    let wanted = rng.gen_range(min..=max.max(min)) as usize;
    let mut placed = Vec::with_capacity(wanted);
    let mut tries = 0;

    while placed.len() < wanted && tries < attempts {
        tries += 1;
        let coord = map.get_random_cell(rng);
        if !is_lair_site(map, coord) {
            continue;
        }
        if map.place_structure(coord, Structure::warg_lair()).is_ok() {
            placed.push(coord);
        }
    }

    if placed.len() < wanted {
        tracing::warn!("Placed {} of {} lairs after {} attempts", placed.len(), wanted, tries);
    } else {
        tracing::info!("Placed {} lairs", placed.len());
    }
    placed
}

/// Surround every lair with guards drawn from `template`
///
/// Lairs are visited in row-major order and each gets `min..=max` guards
/// placed into its free neighbors in [`LAIR_NEIGHBOR_OFFSETS`] order. All
/// guards are appended to `faction` as one contiguous batch.
pub fn spawn_guards_around_lairs(
    map: &mut GameMap,
    faction: &mut Faction,
    template: &ActorTemplate,
    min: u32,
    max: u32,
    skills: &SkillRegistry,
    rng: &mut impl Rng,
) -> Result<Vec<ActorId>> {
    let lairs: Vec<Coord> = map
        .cells()
        .iter()
        .filter(|c| c.structure.as_ref().is_some_and(|s| s.is_lair()))
        .map(|c| c.coord)
        .collect();

    let mut claimed: AHashSet<Coord> = AHashSet::new();
    let mut spots = Vec::new();
    for lair in &lairs {
        let wanted = rng.gen_range(min..=max.max(min)) as usize;
        let mut spawned = 0;
        for (dx, dy) in LAIR_NEIGHBOR_OFFSETS {
            if spawned == wanted {
                break;
            }
            let dest = lair.offset(dx, dy);
            if map.can_unit_enter(dest) && claimed.insert(dest) {
                spots.push(dest);
                spawned += 1;
            }
        }
    }

    let ids = faction.spawn_batch(template, spots.len(), skills)?;
    for (id, dest) in ids.iter().zip(&spots) {
        map.place_occupant(*dest, *id);
    }

    tracing::info!("{} guards spawned around {} lairs", ids.len(), lairs.len());
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GridConfig;
    use crate::core::types::{FactionId, Rgb};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn gaia() -> Faction {
        Faction::new(FactionId(2), "Gaia", Rgb::BROWN, Rgb::BLACK, false).with_sprite("warg")
    }

    #[test]
    fn test_lairs_only_on_plains() {
        let mut map = GameMap::new(GridConfig::new(30, 21), TerrainKind::Forest).unwrap();
        for x in 0..30 {
            map.set_terrain(Coord::new(x, 10), TerrainKind::Plains);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let lairs = place_lairs(&mut map, 4, 6, 1000, &mut rng);
        assert!((4..=6).contains(&lairs.len()));
        for lair in &lairs {
            assert_eq!(lair.y, 10);
            let cell = map.cell(*lair).unwrap();
            assert_eq!(cell.structure.as_ref().map(|s| s.name.as_str()), Some("Warg Lair"));
        }
    }

    #[test]
    fn test_no_plains_means_no_lairs() {
        let mut map = GameMap::new(GridConfig::new(8, 8), TerrainKind::Sea).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(place_lairs(&mut map, 4, 6, 1000, &mut rng).is_empty());
    }

    #[test]
    fn test_guards_fill_neighbors_in_order() {
        let mut map = GameMap::new(GridConfig::new(5, 5), TerrainKind::Plains).unwrap();
        map.place_structure(Coord::new(2, 2), Structure::warg_lair()).unwrap();
        let mut faction = gaia();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let ids = spawn_guards_around_lairs(
            &mut map,
            &mut faction,
            &ActorTemplate::warg(),
            3,
            3,
            &SkillRegistry::with_defaults(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(ids.len(), 3);
        assert_eq!(map.occupant_at(Coord::new(1, 1)), Some(ids[0]));
        assert_eq!(map.occupant_at(Coord::new(2, 1)), Some(ids[1]));
        assert_eq!(map.occupant_at(Coord::new(3, 1)), Some(ids[2]));
        assert!(faction.actors.iter().all(|a| a.name == "Warg" && a.sprite == "warg"));
    }

    #[test]
    fn test_guards_skip_blocked_neighbors() {
        let mut map = GameMap::new(GridConfig::new(3, 3), TerrainKind::Plains).unwrap();
        map.place_structure(Coord::new(0, 0), Structure::warg_lair()).unwrap();
        map.set_terrain(Coord::new(1, 0), TerrainKind::Sea);
        let mut faction = gaia();
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let ids = spawn_guards_around_lairs(
            &mut map,
            &mut faction,
            &ActorTemplate::warg(),
            2,
            2,
            &SkillRegistry::with_defaults(),
            &mut rng,
        )
        .unwrap();

        // Off-map and sea neighbors are skipped: (0, 1) then (1, 1)
        assert_eq!(ids.len(), 2);
        assert_eq!(map.occupant_at(Coord::new(0, 1)), Some(ids[0]));
        assert_eq!(map.occupant_at(Coord::new(1, 1)), Some(ids[1]));
    }

    #[test]
    fn test_adjacent_lairs_do_not_double_book() {
        let mut map = GameMap::new(GridConfig::new(4, 3), TerrainKind::Plains).unwrap();
        map.place_structure(Coord::new(1, 1), Structure::warg_lair()).unwrap();
        map.place_structure(Coord::new(2, 1), Structure::warg_lair()).unwrap();
        let mut faction = gaia();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        let ids = spawn_guards_around_lairs(
            &mut map,
            &mut faction,
            &ActorTemplate::warg(),
            3,
            3,
            &SkillRegistry::with_defaults(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(ids.len(), 6);
        for id in &ids {
            assert!(map.find_occupant(*id).is_some());
        }
    }
}
