//! Individual combatants
//!
//! An actor never leaves its faction's array. Death is `health == 0`, and
//! every roster-wide query filters on [`Actor::is_alive`].

use serde::{Deserialize, Serialize};

use crate::actor::template::ActorTemplate;
use crate::core::types::{ActorId, FactionId};
use crate::skills::{EquippedSkill, SkillDefinition};

/// Skill slots per actor
pub const MAX_SKILLS: usize = 5;

/// Experience needed for each level step
pub const XP_PER_LEVEL: i32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub sprite: String,
    pub owner: FactionId,

    // Stats
    pub max_health: i32,
    pub health: i32,
    pub phys_attack: i32,
    pub phys_defense: i32,
    pub magic_attack: i32,
    pub magic_defense: i32,
    pub luck: i32,
    pub attack_range: u32,
    pub movement: u32,

    // Progression
    pub level: u32,
    /// Total experience earned
    pub experience: i32,
    /// Experience still needed for the next level
    pub xp_to_next: i32,
    /// Set on level-up, cleared once the presentation layer has shown it
    pub level_up_pending: bool,

    // Turn flags
    pub can_move: bool,
    pub can_act: bool,

    pub skills: Vec<EquippedSkill>,
}

impl Actor {
    /// Fresh level-1 actor at full health with both turn flags set
    pub fn from_template(id: ActorId, owner: FactionId, template: &ActorTemplate) -> Self {
        Self {
            id,
            name: template.name.clone(),
            sprite: String::new(),
            owner,
            max_health: template.max_health,
            health: template.max_health,
            phys_attack: template.phys_attack,
            phys_defense: template.phys_defense,
            magic_attack: template.magic_attack,
            magic_defense: template.magic_defense,
            luck: template.luck,
            attack_range: template.attack_range,
            movement: template.movement,
            level: 1,
            experience: 0,
            xp_to_next: XP_PER_LEVEL,
            level_up_pending: false,
            can_move: true,
            can_act: true,
            skills: Vec::new(),
        }
    }

    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = sprite.into();
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn belongs_to(&self, faction: FactionId) -> bool {
        self.owner == faction
    }

    /// Actors of different factions are enemies
    pub fn is_enemy_of(&self, other: &Actor) -> bool {
        self.owner != other.owner
    }

    pub fn can_perform_action(&self) -> bool {
        self.can_move || self.can_act
    }

    /// Health as an integer percentage of max, 0 when max is 0
    pub fn health_percentage(&self) -> i32 {
        if self.max_health <= 0 {
            return 0;
        }
        self.health * 100 / self.max_health
    }

    pub fn reset_turn_flags(&mut self) {
        self.can_move = true;
        self.can_act = true;
    }

    pub fn end_turn(&mut self) {
        self.can_move = false;
        self.can_act = false;
    }

    /// Subtract health, never below zero
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount.max(0)).max(0);
        if !self.is_alive() {
            tracing::debug!("{} ({}) has been defeated", self.name, self.id);
        }
    }

    /// Add health, capped at max. Healing a dead actor brings it back.
    pub fn heal(&mut self, amount: i32) {
        self.health = self.health.saturating_add(amount.max(0)).min(self.max_health);
    }

    /// Bank experience, levelling up as many times as it covers
    ///
    /// Thresholds are cumulative: level `L + 1` needs `100 * L` total
    /// experience, and overflow carries into the next level. Total
    /// experience saturates at `i32::MAX`.
    pub fn gain_experience(&mut self, xp: i32) {
        if xp <= 0 {
            return;
        }
        self.experience = self.experience.saturating_add(xp);

        let earned_level = (self.experience / XP_PER_LEVEL) as u32 + 1;
        if earned_level > self.level {
            self.level_up(earned_level - self.level);
        }
        let threshold = i64::from(XP_PER_LEVEL) * i64::from(self.level);
        let remaining = threshold - i64::from(self.experience);
        self.xp_to_next = remaining.clamp(0, i64::from(i32::MAX)) as i32;
    }

    fn level_up(&mut self, levels: u32) {
        let gained = i32::try_from(levels).unwrap_or(i32::MAX);
        self.level = self.level.saturating_add(levels);
        self.max_health = self.max_health.saturating_add(gained.saturating_mul(3));
        self.health = self.max_health;
        self.phys_attack = self.phys_attack.saturating_add(gained);
        self.phys_defense = self.phys_defense.saturating_add(gained);
        self.magic_attack = self.magic_attack.saturating_add(gained);
        self.magic_defense = self.magic_defense.saturating_add(gained);
        self.level_up_pending = true;

        let (phys, magic) = (self.phys_attack, self.magic_attack);
        for skill in &mut self.skills {
            skill.refresh_damage(phys, magic);
        }

        tracing::info!("{} ({}) reached level {}", self.name, self.id, self.level);
    }

    /// Clear the level-up notice after it has been shown
    pub fn acknowledge_level_up(&mut self) -> bool {
        std::mem::replace(&mut self.level_up_pending, false)
    }

    /// Slot a skill; false when all slots are taken
    pub fn equip_skill(&mut self, def: &SkillDefinition) -> bool {
        if self.skills.len() >= MAX_SKILLS {
            return false;
        }
        self.skills
            .push(EquippedSkill::bind(def, self.phys_attack, self.magic_attack));
        true
    }

    /// Skill used for basic attacks: the first equipped one
    pub fn battle_skill(&self) -> Option<&EquippedSkill> {
        self.skills.first()
    }

    /// Raw damage before defense
    pub fn attack_power(&self) -> i32 {
        self.battle_skill()
            .map(|s| s.damage)
            .unwrap_or(self.phys_attack)
    }

    pub fn attacks_with_magic(&self) -> bool {
        self.battle_skill().is_some_and(|s| s.is_magic)
    }

    /// Reach of the battle skill, or the actor's own range when unarmed
    pub fn effective_range(&self) -> u32 {
        self.battle_skill()
            .map(|s| s.range)
            .unwrap_or(self.attack_range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillId;

    fn militia() -> Actor {
        Actor::from_template(
            ActorId::new(FactionId(0), 0),
            FactionId(0),
            &ActorTemplate::militia(),
        )
    }

    #[test]
    fn test_from_template() {
        let actor = militia();
        assert_eq!(actor.level, 1);
        assert_eq!(actor.xp_to_next, 100);
        assert_eq!(actor.health, 20);
        assert!(actor.can_move && actor.can_act);
        assert!(actor.skills.is_empty());
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut actor = militia();
        actor.take_damage(50);
        assert_eq!(actor.health, 0);
        assert!(!actor.is_alive());
    }

    #[test]
    fn test_heal_caps_and_revives() {
        let mut actor = militia();
        actor.take_damage(5);
        actor.heal(100);
        assert_eq!(actor.health, actor.max_health);

        actor.take_damage(100);
        actor.heal(4);
        assert!(actor.is_alive());
        assert_eq!(actor.health, 4);
    }

    #[test]
    fn test_single_level_up() {
        let mut actor = militia();
        actor.gain_experience(100);
        assert_eq!(actor.level, 2);
        assert_eq!(actor.max_health, 23);
        assert_eq!(actor.health, 23);
        assert_eq!(actor.phys_attack, 9);
        assert_eq!(actor.magic_defense, 4);
        assert_eq!(actor.xp_to_next, 100);
        assert!(actor.level_up_pending);
    }

    #[test]
    fn test_multi_level_from_one_grant() {
        let mut actor = militia();
        actor.gain_experience(250);
        assert_eq!(actor.level, 3);
        assert_eq!(actor.xp_to_next, 50);
        assert_eq!(actor.max_health, 26);
    }

    #[test]
    fn test_heal_saturates_on_huge_amounts() {
        let mut actor = militia();
        actor.take_damage(5);
        actor.heal(i32::MAX);
        assert_eq!(actor.health, actor.max_health);

        actor.take_damage(i32::MAX);
        assert_eq!(actor.health, 0);
    }

    #[test]
    fn test_huge_experience_grants_saturate() {
        let mut actor = militia();
        for _ in 0..3 {
            actor.gain_experience(1_000_000_000);
        }
        assert_eq!(actor.experience, i32::MAX);
        assert_eq!(actor.level, (i32::MAX / XP_PER_LEVEL) as u32 + 1);
        assert!(actor.xp_to_next > 0);
        assert_eq!(actor.max_health, 20 + 3 * (actor.level as i32 - 1));
        assert_eq!(actor.health, actor.max_health);

        // Further grants change nothing once saturated
        let level = actor.level;
        actor.gain_experience(i32::MAX);
        assert_eq!(actor.level, level);
        assert_eq!(actor.experience, i32::MAX);
    }

    #[test]
    fn test_skill_damage_follows_level() {
        let mut actor = militia();
        assert!(actor.equip_skill(&SkillDefinition::spear_strike()));
        assert_eq!(actor.attack_power(), 8);
        actor.gain_experience(100);
        assert_eq!(actor.attack_power(), 9);
    }

    #[test]
    fn test_skill_slots_are_capped() {
        let mut actor = militia();
        for i in 0..MAX_SKILLS {
            let def = SkillDefinition::new(SkillId(i as u32), "Jab", false, 1);
            assert!(actor.equip_skill(&def));
        }
        assert!(!actor.equip_skill(&SkillDefinition::bite()));
        assert_eq!(actor.skills.len(), MAX_SKILLS);
    }

    #[test]
    fn test_health_percentage() {
        let mut actor = militia();
        actor.take_damage(5);
        assert_eq!(actor.health_percentage(), 75);
    }

    #[test]
    fn test_acknowledge_level_up() {
        let mut actor = militia();
        actor.gain_experience(120);
        assert!(actor.acknowledge_level_up());
        assert!(!actor.acknowledge_level_up());
    }
}
