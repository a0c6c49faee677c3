//! Greedy scripted AI
//!
//! Each unit, in array order: strike the nearest enemy in reach, or else
//! maybe wander one step. No planning, no memory between turns.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::actor::Roster;
use crate::combat::{execute_at_cells, get_distance, CombatResult};
use crate::core::types::{ActorId, Coord, Direction, FactionId};
use crate::game::state::GameState;
use crate::map::GameMap;

/// Tuning for scripted factions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Percent chance a unit with nobody in reach stays put
    pub idle_percent: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self { idle_percent: 40 }
    }
}

/// What an AI faction did with its turn
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiReport {
    pub faction: Option<FactionId>,
    pub attacks: Vec<CombatResult>,
    pub moves: u32,
    pub idles: u32,
}

/// Closest living enemy within `range` of `from`
///
/// Ties go to the first cell in row-major order.
pub fn find_nearest_enemy(
    map: &GameMap,
    roster: &Roster,
    actor: ActorId,
    from: Coord,
    range: u32,
) -> Option<Coord> {
    let mut best: Option<(u32, Coord)> = None;
    for cell in map.cells() {
        let Some(other) = cell.occupant else {
            continue;
        };
        if other.faction == actor.faction || !roster.is_alive(other) {
            continue;
        }
        let distance = get_distance(from, cell.coord);
        if distance > range {
            continue;
        }
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, cell.coord));
        }
    }
    best.map(|(_, coord)| coord)
}

/// Try one step in a shuffled cardinal direction
fn wander(
    map: &mut GameMap,
    roster: &mut Roster,
    id: ActorId,
    from: Coord,
    rng: &mut ChaCha8Rng,
) -> bool {
    let mut dirs = Direction::all();
    dirs.shuffle(rng);
    for dir in dirs {
        let dest = dir.step(from);
        if map.can_unit_enter(dest) && map.move_occupant(from, dest) {
            if let Some(actor) = roster.actor_mut(id) {
                actor.can_move = false;
            }
            return true;
        }
    }
    false
}

/// Run every unit of `faction` once. Does not end the turn.
pub fn run_faction_turn(
    map: &mut GameMap,
    roster: &mut Roster,
    faction: FactionId,
    config: &AiConfig,
    rng: &mut ChaCha8Rng,
) -> AiReport {
    let mut report = AiReport {
        faction: Some(faction),
        ..AiReport::default()
    };
    let count = roster.faction(faction).map_or(0, |f| f.actors.len());

    for index in 0..count {
        let id = ActorId::new(faction, index);
        let Some(actor) = roster.actor(id) else {
            continue;
        };
        if !actor.is_alive() || !actor.can_perform_action() {
            continue;
        }
        let (can_act, can_move, range) = (actor.can_act, actor.can_move, actor.effective_range());
        let Some(from) = map.find_occupant(id) else {
            continue;
        };

        if let Some(target) = find_nearest_enemy(map, roster, id, from, range) {
            if can_act {
                match execute_at_cells(map, roster, from, target) {
                    Ok(result) => report.attacks.push(result),
                    Err(reason) => tracing::debug!("AI strike by {} refused: {}", id, reason),
                }
                continue;
            }
        }

        let roll = rng.gen_range(0..100);
        if roll < config.idle_percent || !can_move {
            report.idles += 1;
            continue;
        }
        if wander(map, roster, id, from, rng) {
            report.moves += 1;
        } else {
            report.idles += 1;
        }
    }

    tracing::debug!(
        "AI {} turn: {} attacks, {} moves, {} idle",
        faction,
        report.attacks.len(),
        report.moves,
        report.idles
    );
    report
}

/// Play the current faction's turn with the scripted AI, then end it
pub fn process_ai_turn(
    map: &mut GameMap,
    roster: &mut Roster,
    state: &mut GameState,
    config: &AiConfig,
    rng: &mut ChaCha8Rng,
) -> AiReport {
    if state.is_over() {
        return AiReport::default();
    }
    let report = run_faction_turn(map, roster, state.current_faction(), config, rng);
    state.end_current_turn(roster);
    report
}
