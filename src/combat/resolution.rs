//! Strike resolution
//!
//! One side hits, the other takes it. No rolls, no counter-attack:
//! damage is the battle skill's power minus the matching defense, never
//! less than 1.

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, Roster};
use crate::combat::experience::{calculate_experience, grant_experience};
use crate::core::error::ActionRejected;
use crate::core::types::{ActorId, Coord};
use crate::map::GameMap;
use crate::skills::SkillId;

/// Forecast hit chance; strikes always land
pub const HIT_CHANCE: u32 = 100;
/// Forecast critical chance; strikes never crit
pub const CRIT_CHANCE: u32 = 0;

/// What happened in one strike
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatResult {
    pub attacker: ActorId,
    pub defender: ActorId,
    pub skill: Option<SkillId>,
    pub damage_dealt: i32,
    pub defender_died: bool,
    pub xp_awarded: i32,
    pub attacker_leveled_up: bool,
}

/// Preview of a strike, computed without touching either actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatForecast {
    pub attacker_damage: i32,
    pub attacker_health_after: i32,
    pub defender_health_after: i32,
    pub attacker_kills_defender: bool,
    pub defender_can_counter: bool,
    pub hit_chance: u32,
    pub crit_chance: u32,
    pub xp_gain: i32,
}

/// `attack - defense`, at least 1
pub fn calculate_physical_damage(attacker: &Actor, defender: &Actor) -> i32 {
    (attacker.phys_attack - defender.phys_defense).max(1)
}

/// `magic attack - magic defense`, at least 1
pub fn calculate_magical_damage(attacker: &Actor, defender: &Actor) -> i32 {
    (attacker.magic_attack - defender.magic_defense).max(1)
}

/// Damage of the attacker's battle skill against this defender
pub fn strike_damage(attacker: &Actor, defender: &Actor) -> i32 {
    let defense = if attacker.attacks_with_magic() {
        defender.magic_defense
    } else {
        defender.phys_defense
    };
    (attacker.attack_power() - defense).max(1)
}

/// Manhattan distance between two cells
pub fn get_distance(a: Coord, b: Coord) -> u32 {
    a.manhattan(&b)
}

pub fn is_in_range(a: Coord, b: Coord, range: u32) -> bool {
    get_distance(a, b) <= range
}

/// Resolve a strike between two actors already known to be valid opponents
pub fn execute(attacker: &mut Actor, defender: &mut Actor) -> CombatResult {
    let damage = strike_damage(attacker, defender);
    defender.take_damage(damage);
    let defender_died = !defender.is_alive();

    tracing::debug!(
        "{} strikes {} for {} ({}/{} hp left)",
        attacker.id,
        defender.id,
        damage,
        defender.health,
        defender.max_health
    );

    let level_before = attacker.level;
    let xp_awarded = grant_experience(attacker, defender, defender_died);
    attacker.can_act = false;

    CombatResult {
        attacker: attacker.id,
        defender: defender.id,
        skill: attacker.battle_skill().map(|s| s.id),
        damage_dealt: damage,
        defender_died,
        xp_awarded,
        attacker_leveled_up: attacker.level > level_before,
    }
}

/// Check that the unit on `attacker_cell` may strike the unit on `defender_cell`
pub fn check_attack(
    map: &GameMap,
    roster: &Roster,
    attacker_cell: Coord,
    defender_cell: Coord,
) -> Result<(ActorId, ActorId), ActionRejected> {
    for coord in [attacker_cell, defender_cell] {
        if !map.in_bounds(coord) {
            return Err(ActionRejected::OutOfBounds(coord));
        }
    }
    let attacker_id = map
        .occupant_at(attacker_cell)
        .ok_or(ActionRejected::NoOccupant(attacker_cell))?;
    let defender_id = map
        .occupant_at(defender_cell)
        .ok_or(ActionRejected::NoOccupant(defender_cell))?;

    let attacker = roster
        .actor(attacker_id)
        .filter(|a| a.is_alive())
        .ok_or(ActionRejected::DeadParticipant(attacker_id))?;
    let defender = roster
        .actor(defender_id)
        .filter(|a| a.is_alive())
        .ok_or(ActionRejected::DeadParticipant(defender_id))?;

    if !attacker.can_act {
        return Err(ActionRejected::CannotAct(attacker_id));
    }
    if !attacker.is_enemy_of(defender) {
        return Err(ActionRejected::NotEnemies(attacker_id, defender_id));
    }
    let distance = get_distance(attacker_cell, defender_cell);
    let range = attacker.effective_range();
    if distance > range {
        return Err(ActionRejected::OutOfRange { distance, range });
    }

    Ok((attacker_id, defender_id))
}

pub fn can_attack(
    map: &GameMap,
    roster: &Roster,
    attacker_cell: Coord,
    defender_cell: Coord,
) -> bool {
    check_attack(map, roster, attacker_cell, defender_cell).is_ok()
}

/// Validate and resolve a strike between the occupants of two cells
///
/// A dead defender is taken off the map. On rejection nothing changes.
pub fn execute_at_cells(
    map: &mut GameMap,
    roster: &mut Roster,
    attacker_cell: Coord,
    defender_cell: Coord,
) -> Result<CombatResult, ActionRejected> {
    let (attacker_id, defender_id) = check_attack(map, roster, attacker_cell, defender_cell)?;
    let (attacker, defender) = roster
        .pair_mut(attacker_id, defender_id)
        .ok_or(ActionRejected::NoOccupant(defender_cell))?;

    let result = execute(attacker, defender);
    if result.defender_died {
        map.take_occupant(defender_cell);
    }
    Ok(result)
}

/// Predict a strike without mutating anything
pub fn forecast(attacker: &Actor, defender: &Actor) -> CombatForecast {
    let damage = strike_damage(attacker, defender);
    let defender_health_after = (defender.health - damage).max(0);
    let kills = defender_health_after == 0;

    CombatForecast {
        attacker_damage: damage,
        attacker_health_after: attacker.health,
        defender_health_after,
        attacker_kills_defender: kills,
        defender_can_counter: false,
        hit_chance: HIT_CHANCE,
        crit_chance: CRIT_CHANCE,
        xp_gain: calculate_experience(defender, kills),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{ActorTemplate, Faction};
    use crate::core::config::GridConfig;
    use crate::core::types::{FactionId, Rgb};
    use crate::map::TerrainKind;
    use crate::skills::{SkillDefinition, SkillRegistry};

    fn militia(faction: usize) -> Actor {
        let mut actor = Actor::from_template(
            ActorId::new(FactionId(faction), 0),
            FactionId(faction),
            &ActorTemplate::militia(),
        );
        actor.equip_skill(&SkillDefinition::spear_strike());
        actor
    }

    /// Two factions of two militia each on a 10x10 plain
    fn arena() -> (GameMap, Roster) {
        let map = GameMap::new(GridConfig::new(10, 10), TerrainKind::Plains).unwrap();
        let registry = SkillRegistry::with_defaults();
        let mut roster = Roster::new();
        for name in ["A", "B"] {
            let id = roster.add_faction(Faction::new(
                FactionId(0),
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
        (map, roster)
    }

    #[test]
    fn test_strike_damage_is_attack_minus_defense() {
        let mut a = militia(0);
        let mut b = militia(1);
        let result = execute(&mut a, &mut b);
        assert_eq!(result.damage_dealt, 5);
        assert_eq!(b.health, 15);
        assert!(!a.can_act);
        assert_eq!(a.health, a.max_health);
        assert_eq!(result.xp_awarded, 15);
    }

    #[test]
    fn test_damage_floor() {
        let mut a = militia(0);
        let mut b = militia(1);
        b.phys_defense = 50;
        assert_eq!(execute(&mut a, &mut b).damage_dealt, 1);

        let weak = militia(0);
        assert_eq!(calculate_physical_damage(&weak, &b), 1);
        assert_eq!(calculate_magical_damage(&weak, &b), 1);
    }

    #[test]
    fn test_magic_skill_uses_magic_defense() {
        let mut a = Actor::from_template(
            ActorId::new(FactionId(0), 0),
            FactionId(0),
            &ActorTemplate::militia(),
        );
        a.magic_attack = 9;
        a.equip_skill(&SkillDefinition::new(SkillId(300), "Spark", true, 2));
        let b = militia(1);
        assert_eq!(strike_damage(&a, &b), 6);
        assert_eq!(a.effective_range(), 2);
    }

    #[test]
    fn test_kill_grants_bonus() {
        let mut a = militia(0);
        let mut b = militia(1);
        b.health = 3;
        let result = execute(&mut a, &mut b);
        assert!(result.defender_died);
        assert_eq!(result.xp_awarded, 35);
    }

    #[test]
    fn test_forecast_matches_execute() {
        let a = militia(0);
        let b = militia(1);
        let preview = forecast(&a, &b);
        assert_eq!(preview.hit_chance, 100);
        assert_eq!(preview.crit_chance, 0);
        assert!(!preview.defender_can_counter);
        assert_eq!(b.health, b.max_health);

        let (mut a2, mut b2) = (a.clone(), b.clone());
        let result = execute(&mut a2, &mut b2);
        assert_eq!(preview.attacker_damage, result.damage_dealt);
        assert_eq!(preview.defender_health_after, b2.health);
    }

    #[test]
    fn test_forecast_clamps_health() {
        let a = militia(0);
        let mut b = militia(1);
        b.health = 2;
        let preview = forecast(&a, &b);
        assert_eq!(preview.defender_health_after, 0);
        assert!(preview.attacker_kills_defender);
    }

    #[test]
    fn test_execute_at_cells_adjacent() {
        let (mut map, mut roster) = arena();
        let attacker = ActorId::new(FactionId(0), 0);
        let defender = ActorId::new(FactionId(1), 0);
        map.place_occupant(Coord::new(4, 4), attacker);
        map.place_occupant(Coord::new(5, 4), defender);

        let result =
            execute_at_cells(&mut map, &mut roster, Coord::new(4, 4), Coord::new(5, 4)).unwrap();
        assert_eq!(result.damage_dealt, 5);
        assert_eq!(roster.actor(defender).unwrap().health, 15);
        assert!(!roster.actor(attacker).unwrap().can_act);
    }

    #[test]
    fn test_execute_at_cells_rejections_leave_state_alone() {
        let (mut map, mut roster) = arena();
        let a = ActorId::new(FactionId(0), 0);
        let ally = ActorId::new(FactionId(0), 1);
        let enemy = ActorId::new(FactionId(1), 0);
        map.place_occupant(Coord::new(1, 1), a);
        map.place_occupant(Coord::new(1, 2), ally);
        map.place_occupant(Coord::new(5, 5), enemy);
        let before = roster.clone();

        assert_eq!(
            execute_at_cells(&mut map, &mut roster, Coord::new(1, 1), Coord::new(1, 2)),
            Err(ActionRejected::NotEnemies(a, ally))
        );
        assert_eq!(
            execute_at_cells(&mut map, &mut roster, Coord::new(1, 1), Coord::new(5, 5)),
            Err(ActionRejected::OutOfRange { distance: 8, range: 1 })
        );
        assert_eq!(
            execute_at_cells(&mut map, &mut roster, Coord::new(1, 1), Coord::new(3, 3)),
            Err(ActionRejected::NoOccupant(Coord::new(3, 3)))
        );

        roster.actor_mut(a).unwrap().can_act = false;
        map.move_occupant(Coord::new(5, 5), Coord::new(2, 1));
        assert_eq!(
            execute_at_cells(&mut map, &mut roster, Coord::new(1, 1), Coord::new(2, 1)),
            Err(ActionRejected::CannotAct(a))
        );
        assert_eq!(roster.actor(enemy).unwrap().health, before.actor(enemy).unwrap().health);
        assert_eq!(roster.actor(ally).unwrap().health, before.actor(ally).unwrap().health);
    }

    #[test]
    fn test_dead_defender_leaves_map() {
        let (mut map, mut roster) = arena();
        let a = ActorId::new(FactionId(0), 0);
        let b = ActorId::new(FactionId(1), 0);
        map.place_occupant(Coord::new(0, 0), a);
        map.place_occupant(Coord::new(0, 1), b);
        roster.actor_mut(b).unwrap().health = 1;

        let result =
            execute_at_cells(&mut map, &mut roster, Coord::new(0, 0), Coord::new(0, 1)).unwrap();
        assert!(result.defender_died);
        assert_eq!(map.occupant_at(Coord::new(0, 1)), None);
        assert_eq!(map.occupant_at(Coord::new(0, 0)), Some(a));
    }

    #[test]
    fn test_range_helpers() {
        assert_eq!(get_distance(Coord::new(0, 0), Coord::new(2, 3)), 5);
        assert!(is_in_range(Coord::new(0, 0), Coord::new(1, 0), 1));
        assert!(!is_in_range(Coord::new(0, 0), Coord::new(1, 1), 1));
    }
}
