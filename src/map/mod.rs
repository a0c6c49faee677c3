//! Battle map: cells, terrain, generation and range queries

pub mod cell;
pub mod generation;
pub mod grid;
pub mod range;
pub mod terrain;

pub use cell::Cell;
pub use generation::{
    generate_all_biomes, generate_biome_cores, generate_deep_terrain, BiomeConfig, EdgePolicy,
};
pub use grid::GameMap;
pub use range::{
    attack_reach, calculate_attack_range, calculate_movement_range, clear_range_flags,
    movement_reach, spread_terrain,
};
pub use terrain::{Terrain, TerrainKind};
