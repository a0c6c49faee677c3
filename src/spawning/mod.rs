//! Initial placement: faction deployment corners, lairs and their guards

pub mod corner;
pub mod lairs;
pub mod structure;

pub use corner::{
    get_random_corner_cell, get_random_corner_spawn_cell, place_faction_in_corner, Corner,
};
pub use lairs::{place_lairs, spawn_guards_around_lairs, LAIR_NEIGHBOR_OFFSETS};
pub use structure::Structure;
