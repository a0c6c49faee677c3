//! Factions and their actor arrays

use serde::{Deserialize, Serialize};

use crate::actor::template::ActorTemplate;
use crate::actor::unit::Actor;
use crate::core::error::Result;
use crate::core::types::{ActorId, FactionId, Rgb};
use crate::skills::SkillRegistry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faction {
    pub id: FactionId,
    pub name: String,
    pub primary_color: Rgb,
    pub secondary_color: Rgb,
    pub has_turn: bool,
    pub playable: bool,
    /// Sprite key stamped onto spawned actors
    pub sprite: String,
    pub actors: Vec<Actor>,
}

impl Faction {
    pub fn new(
        id: FactionId,
        name: impl Into<String>,
        primary_color: Rgb,
        secondary_color: Rgb,
        playable: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            primary_color,
            secondary_color,
            has_turn: false,
            playable,
            sprite: String::new(),
            actors: Vec::new(),
        }
    }

    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = sprite.into();
        self
    }

    /// Append `count` actors stamped from `template`
    ///
    /// The batch is contiguous in the actor array. Template skills are
    /// looked up in `skills` and equipped in order.
    pub fn spawn_batch(
        &mut self,
        template: &ActorTemplate,
        count: usize,
        skills: &SkillRegistry,
    ) -> Result<Vec<ActorId>> {
        let defs = template
            .skills
            .iter()
            .map(|id| skills.require(*id))
            .collect::<Result<Vec<_>>>()?;

        let start = self.actors.len();
        self.actors.reserve(count);
        for index in start..start + count {
            let id = ActorId::new(self.id, index);
            let mut actor = Actor::from_template(id, self.id, template)
                .with_sprite(self.sprite.clone());
            for def in &defs {
                actor.equip_skill(def);
            }
            self.actors.push(actor);
        }

        tracing::debug!("{} spawned {} x {}", self.name, count, template.name);
        Ok((start..start + count).map(|i| ActorId::new(self.id, i)).collect())
    }

    pub fn actor(&self, index: usize) -> Option<&Actor> {
        self.actors.get(index)
    }

    pub fn living(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|a| a.is_alive())
    }

    pub fn count_alive(&self) -> usize {
        self.living().count()
    }

    pub fn is_defeated(&self) -> bool {
        self.count_alive() == 0
    }

    /// Give every living actor its move and action back
    pub fn reset_turns(&mut self) {
        for actor in self.actors.iter_mut().filter(|a| a.is_alive()) {
            actor.reset_turn_flags();
        }
    }

    pub fn end_all_turns(&mut self) {
        for actor in self.actors.iter_mut().filter(|a| a.is_alive()) {
            actor.end_turn();
        }
    }

    /// Any living actor that can still move or act
    pub fn has_actions_remaining(&self) -> bool {
        self.living().any(|a| a.can_perform_action())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::GameError;
    use crate::skills::SkillId;

    fn darkus() -> Faction {
        Faction::new(FactionId(0), "Darkus", Rgb::PURPLE, Rgb::DARK_GRAY, true)
    }

    #[test]
    fn test_spawn_batch_is_contiguous() {
        let mut faction = darkus();
        let registry = SkillRegistry::with_defaults();
        let first = faction.spawn_batch(&ActorTemplate::militia(), 2, &registry).unwrap();
        let second = faction.spawn_batch(&ActorTemplate::militia(), 3, &registry).unwrap();
        assert_eq!(first, vec![ActorId::new(FactionId(0), 0), ActorId::new(FactionId(0), 1)]);
        assert_eq!(second[0].index, 2);
        assert_eq!(faction.actors.len(), 5);
        assert!(faction.actors.iter().all(|a| a.owner == FactionId(0)));
        assert_eq!(faction.actors[0].battle_skill().map(|s| s.id), Some(SkillId::SPEAR_STRIKE));
    }

    #[test]
    fn test_spawn_with_unknown_skill_fails() {
        let mut faction = darkus();
        let mut template = ActorTemplate::militia();
        template.skills = vec![SkillId(999)];
        let result = faction.spawn_batch(&template, 1, &SkillRegistry::with_defaults());
        assert!(matches!(result, Err(GameError::UnknownSkill(999))));
        assert!(faction.actors.is_empty());
    }

    #[test]
    fn test_turn_helpers_skip_the_dead() {
        let mut faction = darkus();
        faction
            .spawn_batch(&ActorTemplate::militia(), 2, &SkillRegistry::with_defaults())
            .unwrap();
        faction.actors[1].take_damage(100);
        faction.end_all_turns();
        assert!(!faction.has_actions_remaining());

        faction.reset_turns();
        assert!(faction.actors[0].can_act && faction.actors[0].can_move);
        assert!(faction.has_actions_remaining());
        assert_eq!(faction.count_alive(), 1);
        assert!(!faction.is_defeated());
    }
}
