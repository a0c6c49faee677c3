//! Startup-loaded table of skill definitions

use ahash::AHashMap;

use crate::core::error::{GameError, Result};
use crate::skills::definition::{SkillDefinition, SkillId};

#[derive(Debug, Clone, Default)]
pub struct SkillRegistry {
    skills: AHashMap<SkillId, SkillDefinition>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in skills
    pub fn with_defaults() -> Self {
        Self::from_definitions(SkillDefinition::defaults())
    }

    /// Later definitions replace earlier ones with the same id
    pub fn from_definitions(defs: impl IntoIterator<Item = SkillDefinition>) -> Self {
        let mut registry = Self::new();
        for def in defs {
            registry.register(def);
        }
        registry
    }

    pub fn register(&mut self, def: SkillDefinition) {
        self.skills.insert(def.id, def);
    }

    pub fn get(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.get(&id)
    }

    pub fn require(&self, id: SkillId) -> Result<&SkillDefinition> {
        self.get(id).ok_or(GameError::UnknownSkill(id.0))
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
