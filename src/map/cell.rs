//! A single square of the battle map

use serde::{Deserialize, Serialize};

use crate::core::types::{ActorId, Coord};
use crate::map::terrain::{Terrain, TerrainKind};
use crate::spawning::structure::Structure;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub coord: Coord,
    pub terrain: Terrain,
    /// Unit standing here. The roster owns the actor; this is only a handle.
    pub occupant: Option<ActorId>,
    pub structure: Option<Structure>,
    /// Scratch flags written by range queries for the renderer
    pub in_move_range: bool,
    pub in_attack_range: bool,
}

impl Cell {
    pub fn new(coord: Coord, terrain: TerrainKind) -> Self {
        Self {
            coord,
            terrain: Terrain::of(terrain),
            occupant: None,
            structure: None,
            in_move_range: false,
            in_attack_range: false,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// A structure that units cannot walk through
    pub fn has_blocking_structure(&self) -> bool {
        self.structure.as_ref().is_some_and(|s| !s.passable)
    }

    /// Free for a unit to step onto or spawn at
    pub fn can_unit_enter(&self) -> bool {
        self.terrain.passable && !self.is_occupied() && !self.has_blocking_structure()
    }

    pub fn set_terrain(&mut self, kind: TerrainKind) {
        self.terrain = Terrain::of(kind);
    }

    pub fn clear_range_flags(&mut self) {
        self.in_move_range = false;
        self.in_attack_range = false;
    }
}
