//! Skill definitions and the per-actor equipped copy

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable skill identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub u32);

impl SkillId {
    pub const SPEAR_STRIKE: SkillId = SkillId(101);
    pub const BITE: SkillId = SkillId(102);
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skill#{}", self.0)
    }
}

/// Data-only description of a skill
///
/// Damage is not part of the definition. It is derived from whoever equips
/// the skill, see [`EquippedSkill`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    #[serde(default)]
    pub is_magic: bool,
    /// Turns between uses. Declared but not enforced yet.
    #[serde(default)]
    pub cooldown: u32,
    pub range: u32,
    /// Extra cells hit relative to the target, as (dx, dy)
    #[serde(default)]
    pub area_of_effect: Vec<(i32, i32)>,
}

impl SkillDefinition {
    pub fn new(id: SkillId, name: impl Into<String>, is_magic: bool, range: u32) -> Self {
        Self {
            id,
            name: name.into(),
            is_magic,
            cooldown: 0,
            range,
            area_of_effect: Vec::new(),
        }
    }

    pub fn spear_strike() -> Self {
        Self::new(SkillId::SPEAR_STRIKE, "Spear Strike", false, 1)
    }

    pub fn bite() -> Self {
        Self::new(SkillId::BITE, "Bite", false, 1)
    }

    pub fn defaults() -> Vec<SkillDefinition> {
        vec![Self::spear_strike(), Self::bite()]
    }
}

/// A skill slotted on an actor, with damage bound to that actor's stats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedSkill {
    pub id: SkillId,
    pub name: String,
    pub is_magic: bool,
    pub range: u32,
    pub damage: i32,
}

impl EquippedSkill {
    pub fn bind(def: &SkillDefinition, physical_attack: i32, magic_attack: i32) -> Self {
        let mut skill = Self {
            id: def.id,
            name: def.name.clone(),
            is_magic: def.is_magic,
            range: def.range,
            damage: 0,
        };
        skill.refresh_damage(physical_attack, magic_attack);
        skill
    }

    /// Recompute damage after the owner's stats change
    pub fn refresh_damage(&mut self, physical_attack: i32, magic_attack: i32) {
        self.damage = if self.is_magic { magic_attack } else { physical_attack };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_physical_skill_binds_to_attack() {
        let equipped = EquippedSkill::bind(&SkillDefinition::spear_strike(), 8, 2);
        assert_eq!(equipped.damage, 8);
        assert_eq!(equipped.range, 1);
    }

    #[test]
    fn test_magic_skill_binds_to_magic_attack() {
        let def = SkillDefinition::new(SkillId(200), "Spark", true, 2);
        let mut equipped = EquippedSkill::bind(&def, 8, 2);
        assert_eq!(equipped.damage, 2);
        equipped.refresh_damage(9, 3);
        assert_eq!(equipped.damage, 3);
    }
}
