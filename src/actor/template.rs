//! Stat blocks that new actors are stamped from

use serde::{Deserialize, Serialize};

use crate::skills::SkillId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorTemplate {
    pub name: String,
    pub max_health: i32,
    pub movement: u32,
    pub phys_attack: i32,
    pub phys_defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    #[serde(default)]
    pub luck: i32,
    pub attack_range: u32,
    /// Skills equipped on creation, in slot order
    #[serde(default)]
    pub skills: Vec<SkillId>,
}

impl ActorTemplate {
    /// Basic infantry fielded by both playable factions
    pub fn militia() -> Self {
        Self {
            name: "Militia".to_string(),
            max_health: 20,
            movement: 4,
            phys_attack: 8,
            phys_defense: 3,
            magic_attack: 2,
            magic_defense: 3,
            luck: 0,
            attack_range: 1,
            skills: vec![SkillId::SPEAR_STRIKE],
        }
    }

    /// Neutral beast guarding lairs
    pub fn warg() -> Self {
        Self {
            name: "Warg".to_string(),
            max_health: 16,
            movement: 4,
            phys_attack: 7,
            phys_defense: 2,
            magic_attack: 1,
            magic_defense: 1,
            luck: 0,
            attack_range: 1,
            skills: vec![SkillId::BITE],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_toml() {
        let template: ActorTemplate = toml::from_str(
            r#"
            name = "Scout"
            max_health = 12
            movement = 6
            phys_attack = 5
            phys_defense = 1
            magic_attack = 0
            magic_defense = 1
            attack_range = 2
            skills = [101]
            "#,
        )
        .unwrap();
        assert_eq!(template.name, "Scout");
        assert_eq!(template.luck, 0);
        assert_eq!(template.skills, vec![SkillId::SPEAR_STRIKE]);
    }
}
