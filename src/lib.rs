//! Water Emblem - turn-based tactical grid combat

pub mod actor;
pub mod combat;
pub mod core;
pub mod game;
pub mod map;
pub mod skills;
pub mod spawning;
