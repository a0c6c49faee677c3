//! Bounded flood fills over the grid
//!
//! Breadth-first with an explicit queue, so deep ranges cannot blow the
//! stack and every cell is recorded at its shortest step count. Neighbors are
//! expanded in the fixed order up, down, left, right.

use ahash::AHashSet;
use std::collections::VecDeque;

use crate::core::types::{Coord, Direction};
use crate::map::grid::GameMap;
use crate::map::terrain::TerrainKind;

/// Which cells a fill may start from and expand into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    /// Only passable terrain, including the start cell
    Walk,
    /// Every in-bounds cell
    Reach,
}

/// Cells within `range` steps of `start`, in visit order
pub fn flood_fill(map: &GameMap, start: Coord, range: u32, mode: FillMode) -> Vec<Coord> {
    let Some(start_index) = map.index_of(start) else {
        return Vec::new();
    };
    let allowed = |coord: Coord| match mode {
        FillMode::Walk => map.cell(coord).is_some_and(|c| c.terrain.passable),
        FillMode::Reach => map.in_bounds(coord),
    };
    if !allowed(start) {
        return Vec::new();
    }

    let mut visited: AHashSet<usize> = AHashSet::new();
    let mut queue: VecDeque<(Coord, u32)> = VecDeque::new();
    let mut order = Vec::new();

    visited.insert(start_index);
    queue.push_back((start, 0));

    while let Some((coord, depth)) = queue.pop_front() {
        order.push(coord);
        if depth == range {
            continue;
        }
        for dir in Direction::all() {
            let next = dir.step(coord);
            let Some(index) = map.index_of(next) else {
                continue;
            };
            if visited.contains(&index) || !allowed(next) {
                continue;
            }
            visited.insert(index);
            queue.push_back((next, depth + 1));
        }
    }

    order
}

/// Cells a unit could walk to. Does not touch cell flags.
pub fn movement_reach(map: &GameMap, start: Coord, range: u32) -> Vec<Coord> {
    flood_fill(map, start, range, FillMode::Walk)
}

/// Cells an attack could land on. Ignores terrain.
pub fn attack_reach(map: &GameMap, start: Coord, range: u32) -> Vec<Coord> {
    flood_fill(map, start, range, FillMode::Reach)
}

/// Mark `in_move_range` on every walkable cell within `range`
pub fn calculate_movement_range(map: &mut GameMap, start: Coord, range: u32) -> usize {
    let reach = movement_reach(map, start, range);
    for coord in &reach {
        if let Some(cell) = map.cell_mut(*coord) {
            cell.in_move_range = true;
        }
    }
    reach.len()
}

/// Mark `in_attack_range` on every cell within `range`
pub fn calculate_attack_range(map: &mut GameMap, start: Coord, range: u32) -> usize {
    let reach = attack_reach(map, start, range);
    for coord in &reach {
        if let Some(cell) = map.cell_mut(*coord) {
            cell.in_attack_range = true;
        }
    }
    reach.len()
}

/// Paint `terrain` outward from `start`, overwriting whatever was there
pub fn spread_terrain(map: &mut GameMap, start: Coord, range: u32, terrain: TerrainKind) -> usize {
    let reach = attack_reach(map, start, range);
    for coord in &reach {
        map.set_terrain(*coord, terrain);
    }
    reach.len()
}

pub fn clear_range_flags(map: &mut GameMap) {
    map.clear_range_flags();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GridConfig;

    fn open_map(w: u32, h: u32) -> GameMap {
        GameMap::new(GridConfig::new(w, h), TerrainKind::Plains).unwrap()
    }

    #[test]
    fn test_open_field_is_diamond() {
        let map = open_map(9, 9);
        let center = Coord::new(4, 4);
        let reach = movement_reach(&map, center, 2);
        // 1 + 4 + 8 cells in a radius-2 diamond
        assert_eq!(reach.len(), 13);
        assert!(reach.iter().all(|c| c.manhattan(&center) <= 2));
        assert_eq!(reach[0], center);
    }

    #[test]
    fn test_range_zero_is_start_only() {
        let map = open_map(3, 3);
        assert_eq!(movement_reach(&map, Coord::new(1, 1), 0), vec![Coord::new(1, 1)]);
    }

    #[test]
    fn test_first_ring_order() {
        let map = open_map(3, 3);
        let reach = attack_reach(&map, Coord::new(1, 1), 1);
        assert_eq!(
            reach,
            vec![
                Coord::new(1, 1),
                Coord::new(1, 0),
                Coord::new(1, 2),
                Coord::new(0, 1),
                Coord::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_wall_blocks_walk_not_reach() {
        let mut map = open_map(5, 1);
        map.set_terrain(Coord::new(2, 0), TerrainKind::Mountains);
        let walk = movement_reach(&map, Coord::new(0, 0), 4);
        assert_eq!(walk, vec![Coord::new(0, 0), Coord::new(1, 0)]);

        let reach = attack_reach(&map, Coord::new(0, 0), 4);
        assert_eq!(reach.len(), 5);
    }

    #[test]
    fn test_impassable_start_marks_nothing() {
        let mut map = open_map(3, 3);
        map.set_terrain(Coord::new(1, 1), TerrainKind::Sea);
        assert_eq!(calculate_movement_range(&mut map, Coord::new(1, 1), 2), 0);
        assert!(map.cells().iter().all(|c| !c.in_move_range));
    }

    #[test]
    fn test_flags_set_and_cleared() {
        let mut map = open_map(4, 4);
        calculate_movement_range(&mut map, Coord::new(0, 0), 1);
        calculate_attack_range(&mut map, Coord::new(3, 3), 1);
        assert!(map.get_cell(1, 0).unwrap().in_move_range);
        assert!(map.get_cell(3, 2).unwrap().in_attack_range);
        clear_range_flags(&mut map);
        assert!(map.cells().iter().all(|c| !c.in_move_range && !c.in_attack_range));
    }

    #[test]
    fn test_spread_terrain_paints_diamond() {
        let mut map = open_map(5, 5);
        let painted = spread_terrain(&mut map, Coord::new(2, 2), 1, TerrainKind::Forest);
        assert_eq!(painted, 5);
        assert_eq!(map.terrain_at(Coord::new(2, 1)), Some(TerrainKind::Forest));
        assert_eq!(map.terrain_at(Coord::new(1, 1)), Some(TerrainKind::Plains));
    }

    #[test]
    fn test_out_of_bounds_start() {
        let map = open_map(3, 3);
        assert!(attack_reach(&map, Coord::new(-1, 0), 3).is_empty());
    }
}
