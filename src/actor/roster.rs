//! Owning collection of every faction in a match

use serde::{Deserialize, Serialize};

use crate::actor::faction::Faction;
use crate::actor::unit::Actor;
use crate::core::types::{ActorId, FactionId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    factions: Vec<Faction>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a faction; its id is its position in the roster
    pub fn add_faction(&mut self, mut faction: Faction) -> FactionId {
        let id = FactionId(self.factions.len());
        faction.id = id;
        self.factions.push(faction);
        id
    }

    pub fn len(&self) -> usize {
        self.factions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factions.is_empty()
    }

    pub fn factions(&self) -> &[Faction] {
        &self.factions
    }

    pub fn factions_mut(&mut self) -> &mut [Faction] {
        &mut self.factions
    }

    pub fn faction(&self, id: FactionId) -> Option<&Faction> {
        self.factions.get(id.0)
    }

    pub fn faction_mut(&mut self, id: FactionId) -> Option<&mut Faction> {
        self.factions.get_mut(id.0)
    }

    pub fn faction_by_name(&self, name: &str) -> Option<&Faction> {
        self.factions.iter().find(|f| f.name == name)
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.faction(id.faction)?.actors.get(id.index)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.faction_mut(id.faction)?.actors.get_mut(id.index)
    }

    /// Two distinct actors borrowed mutably at once
    ///
    /// `None` if either handle is stale or both name the same actor.
    pub fn pair_mut(&mut self, a: ActorId, b: ActorId) -> Option<(&mut Actor, &mut Actor)> {
        if a == b {
            return None;
        }
        if a.faction == b.faction {
            let actors = &mut self.factions.get_mut(a.faction.0)?.actors;
            if a.index.max(b.index) >= actors.len() {
                return None;
            }
            let (lo, hi) = (a.index.min(b.index), a.index.max(b.index));
            let (left, right) = actors.split_at_mut(hi);
            let (low, high) = (&mut left[lo], &mut right[0]);
            return Some(if a.index < b.index { (low, high) } else { (high, low) });
        }

        let (lo, hi) = (a.faction.0.min(b.faction.0), a.faction.0.max(b.faction.0));
        if hi >= self.factions.len() {
            return None;
        }
        let (left, right) = self.factions.split_at_mut(hi);
        let (low_faction, high_faction) = (&mut left[lo], &mut right[0]);
        let (fa, fb) = if a.faction.0 < b.faction.0 {
            (low_faction, high_faction)
        } else {
            (high_faction, low_faction)
        };
        Some((fa.actors.get_mut(a.index)?, fb.actors.get_mut(b.index)?))
    }

    pub fn is_alive(&self, id: ActorId) -> bool {
        self.actor(id).is_some_and(|a| a.is_alive())
    }

    /// Factions that still have at least one living actor
    pub fn surviving_factions(&self) -> Vec<FactionId> {
        self.factions
            .iter()
            .filter(|f| !f.is_defeated())
            .map(|f| f.id)
            .collect()
    }

    pub fn all_actors(&self) -> impl Iterator<Item = &Actor> {
        self.factions.iter().flat_map(|f| f.actors.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::template::ActorTemplate;
    use crate::core::types::Rgb;
    use crate::skills::SkillRegistry;

    fn two_sides() -> Roster {
        let registry = SkillRegistry::with_defaults();
        let mut roster = Roster::new();
        for name in ["Darkus", "Ventus"] {
            let id = roster.add_faction(Faction::new(
                FactionId(99),
                name,
                Rgb::BLACK,
                Rgb::WHITE,
                true,
            ));
            roster
                .faction_mut(id)
                .unwrap()
                .spawn_batch(&ActorTemplate::militia(), 2, &registry)
                .unwrap();
        }
        roster
    }

    #[test]
    fn test_add_faction_assigns_ids() {
        let roster = two_sides();
        assert_eq!(roster.faction(FactionId(1)).unwrap().name, "Ventus");
        assert_eq!(roster.faction_by_name("Darkus").unwrap().id, FactionId(0));
    }

    #[test]
    fn test_pair_mut_across_factions() {
        let mut roster = two_sides();
        let a = ActorId::new(FactionId(1), 1);
        let b = ActorId::new(FactionId(0), 0);
        let (x, y) = roster.pair_mut(a, b).unwrap();
        assert_eq!(x.id, a);
        assert_eq!(y.id, b);
        x.take_damage(3);
        assert_eq!(roster.actor(a).unwrap().health, 17);
    }

    #[test]
    fn test_pair_mut_same_faction() {
        let mut roster = two_sides();
        let a = ActorId::new(FactionId(0), 1);
        let b = ActorId::new(FactionId(0), 0);
        let (x, y) = roster.pair_mut(a, b).unwrap();
        assert_eq!((x.id, y.id), (a, b));
    }

    #[test]
    fn test_pair_mut_rejects_alias_and_stale() {
        let mut roster = two_sides();
        let a = ActorId::new(FactionId(0), 0);
        assert!(roster.pair_mut(a, a).is_none());
        assert!(roster.pair_mut(a, ActorId::new(FactionId(4), 0)).is_none());
        assert!(roster.pair_mut(a, ActorId::new(FactionId(1), 9)).is_none());
    }

    #[test]
    fn test_surviving_factions() {
        let mut roster = two_sides();
        for i in 0..2 {
            roster.actor_mut(ActorId::new(FactionId(0), i)).unwrap().take_damage(99);
        }
        assert_eq!(roster.surviving_factions(), vec![FactionId(1)]);
    }
}
