pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{ActionRejected, GameError, Result};
pub use types::{ActorId, Coord, Direction, FactionId, Rgb};
