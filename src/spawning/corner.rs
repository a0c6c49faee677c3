//! Corner deployment zones for faction start positions

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actor::Faction;
use crate::core::types::{ActorId, Coord};
use crate::map::GameMap;

/// Map corners, clockwise from the top left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    pub fn all() -> [Corner; 4] {
        [Corner::TopLeft, Corner::TopRight, Corner::BottomRight, Corner::BottomLeft]
    }

    fn is_right(&self) -> bool {
        matches!(self, Corner::TopRight | Corner::BottomRight)
    }

    fn is_bottom(&self) -> bool {
        matches!(self, Corner::BottomRight | Corner::BottomLeft)
    }

    /// Inclusive (min, max) bounds of the corner square, clipped to the map
    pub fn zone(&self, map: &GameMap, area: u32) -> (Coord, Coord) {
        let max_x = map.width() as i32 - 1;
        let max_y = map.height() as i32 - 1;
        let area = area as i32;

        let (x0, x1) = if self.is_right() {
            ((max_x - area).max(0), max_x)
        } else {
            (0, area.min(max_x))
        };
        let (y0, y1) = if self.is_bottom() {
            ((max_y - area).max(0), max_y)
        } else {
            (0, area.min(max_y))
        };
        (Coord::new(x0, y0), Coord::new(x1, y1))
    }
}

/// Random cell `1..=area` steps in from `corner` on both axes
///
/// `None` when the offset lands off the map (area larger than the map).
pub fn get_random_corner_cell(
    map: &GameMap,
    corner: Corner,
    area: u32,
    rng: &mut impl Rng,
) -> Option<Coord> {
    let area = area.max(1) as i32;
    let dx = rng.gen_range(1..=area);
    let dy = rng.gen_range(1..=area);

    let x = if corner.is_right() { map.width() as i32 - dx } else { dx };
    let y = if corner.is_bottom() { map.height() as i32 - dy } else { dy };
    let coord = Coord::new(x, y);
    map.in_bounds(coord).then_some(coord)
}

/// Spawnable cell near `corner`
///
/// Tries random draws first, then scans the corner square, then the whole
/// board. Returns the origin if the board has nowhere left to stand.
pub fn get_random_corner_spawn_cell(
    map: &GameMap,
    corner: Corner,
    area: u32,
    max_attempts: u32,
    rng: &mut impl Rng,
) -> Coord {
    for _ in 0..max_attempts {
        if let Some(coord) = get_random_corner_cell(map, corner, area, rng) {
            if map.is_spawnable(coord) {
                return coord;
            }
        }
    }

    let (min, max) = corner.zone(map, area);
    for y in min.y..=max.y {
        for x in min.x..=max.x {
            let coord = Coord::new(x, y);
            if map.is_spawnable(coord) {
                return coord;
            }
        }
    }

    if let Some(coord) = map.first_spawnable() {
        tracing::debug!("{:?} corner is full, spawning at {}", corner, coord);
        return coord;
    }

    tracing::warn!("No spawnable cell left for {:?} corner, falling back to origin", corner);
    Coord::ORIGIN
}

/// Put each of the faction's living actors on its own cell near `corner`
///
/// Returns the actors actually placed. An actor is skipped only when the
/// board is completely full.
pub fn place_faction_in_corner(
    map: &mut GameMap,
    faction: &Faction,
    corner: Corner,
    area: u32,
    max_attempts: u32,
    rng: &mut impl Rng,
) -> Vec<ActorId> {
    let mut placed = Vec::new();
    for actor in faction.living() {
        let coord = get_random_corner_spawn_cell(map, corner, area, max_attempts, rng);
        if map.place_occupant(coord, actor.id) {
            placed.push(actor.id);
        } else {
            tracing::warn!("Could not place {} from {}", actor.id, faction.name);
        }
    }
    tracing::info!("{} deployed {} units in the {:?} corner", faction.name, placed.len(), corner);
    placed
}
