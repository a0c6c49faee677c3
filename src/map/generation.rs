//! Procedural terrain: biome cores painted in layers, then a deepening pass
//!
//! Biome cores are random seed cells that spread their terrain outward.
//! Painting the whole biome list several times (layers) lets later cores
//! carve into earlier ones. Deepening then turns the interior of large
//! patches into their deep variant (sea → deep sea, hills → mountains).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Coord;
use crate::map::grid::GameMap;
use crate::map::range::spread_terrain;
use crate::map::terrain::{Terrain, TerrainKind};

/// One biome's share of the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiomeConfig {
    pub terrain: TerrainKind,
    /// Upper bound on cores per layer (actual count is 0..=max_cores)
    pub max_cores: u32,
    /// Upper bound on each core's spread radius (actual radius is 1..=max_range)
    pub max_range: u32,
}

impl BiomeConfig {
    pub fn new(terrain: TerrainKind, max_cores: u32, max_range: u32) -> Self {
        Self {
            terrain,
            max_cores,
            max_range,
        }
    }

    /// Hills, forest and sea, painted in that order
    pub fn defaults() -> Vec<BiomeConfig> {
        vec![
            BiomeConfig::new(TerrainKind::Hills, 3, 4),
            BiomeConfig::new(TerrainKind::Forest, 5, 4),
            BiomeConfig::new(TerrainKind::Sea, 2, 5),
        ]
    }
}

/// How deepening treats the part of a 3x3 neighborhood that falls off the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgePolicy {
    /// Off-map neighbors never match, so border cells stay shallow
    #[default]
    Blocks,
    /// Off-map neighbors always match, so border patches deepen too
    Matches,
}

/// Paint 0..=max_cores random cores of one biome
///
/// Returns the number of cores painted.
pub fn generate_biome_cores(map: &mut GameMap, biome: &BiomeConfig, rng: &mut impl Rng) -> u32 {
    let cores = rng.gen_range(0..=biome.max_cores);
    for _ in 0..cores {
        let core = map.get_random_cell(rng);
        let radius = rng.gen_range(1..=biome.max_range.max(1));
        spread_terrain(map, core, radius, biome.terrain);
    }
    cores
}

/// Paint every biome in order, `layers` times over
pub fn generate_all_biomes(
    map: &mut GameMap,
    biomes: &[BiomeConfig],
    layers: u32,
    rng: &mut impl Rng,
) {
    let mut total = 0;
    for _ in 0..layers {
        for biome in biomes {
            total += generate_biome_cores(map, biome, rng);
        }
    }
    tracing::debug!("Painted {} biome cores over {} layers", total, layers);
}

fn neighborhood_matches(
    snapshot: &[Terrain],
    map: &GameMap,
    center: Coord,
    terrain: Terrain,
    edge_policy: EdgePolicy,
) -> bool {
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let neighbor = center.offset(dx, dy);
            let matches = match map.index_of(neighbor) {
                Some(index) => {
                    let id = snapshot[index].id;
                    id == terrain.id || id == terrain.deep_version.id()
                }
                None => edge_policy == EdgePolicy::Matches,
            };
            if !matches {
                return false;
            }
        }
    }
    true
}

/// Promote cells whose whole neighborhood shares their terrain
///
/// Every decision reads the terrain as it was before the pass, so the result
/// does not depend on scan order. A neighbor already holding the deep variant
/// still counts as a match, which makes a second pass a no-op.
/// Returns the number of promoted cells.
pub fn generate_deep_terrain(map: &mut GameMap, edge_policy: EdgePolicy) -> usize {
    let snapshot: Vec<Terrain> = map.cells().iter().map(|c| c.terrain).collect();

    let promotions: Vec<(Coord, Terrain)> = map
        .cells()
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| {
            let terrain = snapshot[index];
            let deep = terrain.deepened()?;
            neighborhood_matches(&snapshot, map, cell.coord, terrain, edge_policy)
                .then_some((cell.coord, deep))
        })
        .collect();

    for (coord, deep) in &promotions {
        map.set_terrain(*coord, deep.kind);
    }

    tracing::debug!("Deepened {} cells", promotions.len());
    promotions.len()
}
