use thiserror::Error;

use crate::core::types::{ActorId, Coord};

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Map dimensions must be non-zero (got {width}x{height})")]
    EmptyMap { width: u32, height: u32 },

    #[error("Coordinate out of bounds: {0}")]
    OutOfBounds(Coord),

    #[error("Cell {0} already holds a structure")]
    StructureExists(Coord),

    #[error("Unknown actor template: {0}")]
    UnknownTemplate(String),

    #[error("Unknown skill id: {0}")]
    UnknownSkill(u32),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;

/// Why a player or AI intent was refused
///
/// A rejected intent never mutates the simulation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRejected {
    #[error("no unit on cell {0}")]
    NoOccupant(Coord),

    #[error("cell {0} is outside the map")]
    OutOfBounds(Coord),

    #[error("{0} is dead")]
    DeadParticipant(ActorId),

    #[error("{0} has already acted this turn")]
    CannotAct(ActorId),

    #[error("{0} has already moved this turn")]
    CannotMove(ActorId),

    #[error("{0} and {1} are on the same side")]
    NotEnemies(ActorId, ActorId),

    #[error("target at distance {distance} is beyond range {range}")]
    OutOfRange { distance: u32, range: u32 },

    #[error("it is not {0}'s turn")]
    NotYourTurn(ActorId),

    #[error("destination {0} is blocked")]
    DestinationBlocked(Coord),

    #[error("destination {0} is not reachable")]
    Unreachable(Coord),

    #[error("the game is over")]
    GameOver,
}
