//! Actors, the factions that own them, and the roster that owns the factions

pub mod faction;
pub mod roster;
pub mod template;
pub mod unit;

pub use faction::Faction;
pub use roster::Roster;
pub use template::ActorTemplate;
pub use unit::{Actor, MAX_SKILLS, XP_PER_LEVEL};
