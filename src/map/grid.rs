//! Dense rectangular battle map
//!
//! Cells are stored row-major (`index = y * width + x`). Every public lookup
//! goes through a bounds check, so callers can pass off-map coordinates
//! freely and get `None` back.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{GridConfig, MAX_PLACEMENT_ATTEMPTS};
use crate::core::error::{GameError, Result};
use crate::core::types::{ActorId, Coord};
use crate::map::cell::Cell;
use crate::map::terrain::TerrainKind;
use crate::spawning::structure::Structure;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    width: u32,
    height: u32,
    cell_size: u32,
    cells: Vec<Cell>,
}

impl GameMap {
    /// Allocate a map filled with `default_terrain`
    pub fn new(grid: GridConfig, default_terrain: TerrainKind) -> Result<Self> {
        if grid.width == 0 || grid.height == 0 {
            return Err(GameError::EmptyMap {
                width: grid.width,
                height: grid.height,
            });
        }

        let mut cells = Vec::with_capacity(grid.cell_count());
        for y in 0..grid.height as i32 {
            for x in 0..grid.width as i32 {
                cells.push(Cell::new(Coord::new(x, y), default_terrain));
            }
        }

        Ok(Self {
            width: grid.width,
            height: grid.height,
            cell_size: grid.cell_size,
            cells,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width as i32 && coord.y < self.height as i32
    }

    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.y as usize * self.width as usize + coord.x as usize)
        } else {
            None
        }
    }

    pub fn coord_of(&self, index: usize) -> Coord {
        let w = self.width as usize;
        Coord::new((index % w) as i32, (index / w) as i32)
    }

    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.cell(Coord::new(x, y))
    }

    pub fn get_cell_mut(&mut self, x: i32, y: i32) -> Option<&mut Cell> {
        self.cell_mut(Coord::new(x, y))
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index_of(coord).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, coord: Coord) -> Option<&mut Cell> {
        self.index_of(coord).map(move |i| &mut self.cells[i])
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn terrain_at(&self, coord: Coord) -> Option<TerrainKind> {
        self.cell(coord).map(|c| c.terrain.kind)
    }

    pub fn set_terrain(&mut self, coord: Coord, kind: TerrainKind) -> bool {
        match self.cell_mut(coord) {
            Some(cell) => {
                cell.set_terrain(kind);
                true
            }
            None => false,
        }
    }

    /// Uniformly random coordinate on the map
    pub fn get_random_cell(&self, rng: &mut impl Rng) -> Coord {
        let index = rng.gen_range(0..self.cells.len());
        self.coord_of(index)
    }

    /// Passable, unoccupied and free of blocking structures
    pub fn is_spawnable(&self, coord: Coord) -> bool {
        self.cell(coord).is_some_and(|c| c.can_unit_enter())
    }

    pub fn can_unit_enter(&self, coord: Coord) -> bool {
        self.is_spawnable(coord)
    }

    /// First spawnable cell in row-major order
    pub fn first_spawnable(&self) -> Option<Coord> {
        self.cells.iter().find(|c| c.can_unit_enter()).map(|c| c.coord)
    }

    /// Random spawnable cell
    ///
    /// Falls back to a row-major scan once the random draws run out, and to
    /// the origin if the board has no free cell at all.
    pub fn get_random_spawn_cell(&self, rng: &mut impl Rng) -> Coord {
        self.get_random_spawn_cell_within(rng, MAX_PLACEMENT_ATTEMPTS)
    }

    pub fn get_random_spawn_cell_within(&self, rng: &mut impl Rng, attempts: u32) -> Coord {
        for _ in 0..attempts {
            let coord = self.get_random_cell(rng);
            if self.is_spawnable(coord) {
                return coord;
            }
        }

        if let Some(coord) = self.first_spawnable() {
            tracing::debug!("Random spawn search exhausted, scan found {}", coord);
            return coord;
        }

        tracing::warn!("No spawnable cell on the map, falling back to origin");
        Coord::ORIGIN
    }

    pub fn occupant_at(&self, coord: Coord) -> Option<ActorId> {
        self.cell(coord).and_then(|c| c.occupant)
    }

    /// Put a unit on an empty cell. Returns false if off-map or occupied.
    pub fn place_occupant(&mut self, coord: Coord, id: ActorId) -> bool {
        match self.cell_mut(coord) {
            Some(cell) if cell.occupant.is_none() => {
                cell.occupant = Some(id);
                true
            }
            _ => false,
        }
    }

    pub fn take_occupant(&mut self, coord: Coord) -> Option<ActorId> {
        self.cell_mut(coord).and_then(|c| c.occupant.take())
    }

    /// Move whatever stands on `from` to `to`; `to` must be empty
    pub fn move_occupant(&mut self, from: Coord, to: Coord) -> bool {
        if from == to {
            return self.occupant_at(from).is_some();
        }
        if !self.in_bounds(to) || self.occupant_at(to).is_some() {
            return false;
        }
        match self.take_occupant(from) {
            Some(id) => self.place_occupant(to, id),
            None => false,
        }
    }

    pub fn find_occupant(&self, id: ActorId) -> Option<Coord> {
        self.cells
            .iter()
            .find(|c| c.occupant == Some(id))
            .map(|c| c.coord)
    }

    pub fn place_structure(&mut self, coord: Coord, structure: Structure) -> Result<()> {
        let cell = self.cell_mut(coord).ok_or(GameError::OutOfBounds(coord))?;
        if cell.structure.is_some() {
            return Err(GameError::StructureExists(coord));
        }
        cell.structure = Some(structure);
        Ok(())
    }

    /// Coordinates of every cell holding a structure, row-major
    pub fn structure_coords(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .filter(|c| c.structure.is_some())
            .map(|c| c.coord)
            .collect()
    }

    pub fn clear_range_flags(&mut self) {
        for cell in &mut self.cells {
            cell.clear_range_flags();
        }
    }
}
