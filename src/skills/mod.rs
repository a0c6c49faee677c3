//! Skills: data-only definitions, looked up by id
//!
//! Actors carry an [`EquippedSkill`] copy whose damage is bound to the
//! actor's own stats.

pub mod definition;
pub mod registry;

pub use definition::{EquippedSkill, SkillDefinition, SkillId};
pub use registry::SkillRegistry;
