//! One running match
//!
//! `Skirmish` owns everything a match needs and is the only place that
//! mutates it. The renderer reads through the accessors; the input layer
//! sends intents (`select_cell`, `request_move`, `request_attack`,
//! `end_turn`). A rejected intent returns the reason and changes nothing.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, Faction, Roster};
use crate::combat::{check_attack, execute_at_cells, forecast, CombatForecast, CombatResult};
use crate::core::config::GameConfig;
use crate::core::error::{ActionRejected, GameError, Result};
use crate::core::types::{ActorId, Coord, FactionId};
use crate::game::ai::AiReport;
use crate::game::controller::{
    controller_for, FactionController, ScriptedAi, TurnContext, TurnOutcome,
};
use crate::game::state::GameState;
use crate::map::{
    calculate_attack_range, calculate_movement_range, generate_all_biomes, generate_deep_terrain,
    movement_reach, GameMap,
};
use crate::skills::SkillRegistry;
use crate::spawning::{place_faction_in_corner, place_lairs, spawn_guards_around_lairs};

/// Ranges revealed by selecting a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub actor: ActorId,
    pub coord: Coord,
    pub move_cells: usize,
    pub attack_cells: usize,
}

/// Final standing of one faction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionStanding {
    pub faction: FactionId,
    pub name: String,
    pub alive: usize,
    pub fielded: usize,
}

/// Outcome of a headless match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub turns: u32,
    pub finished: bool,
    pub winner: Option<String>,
    pub attacks: usize,
    pub kills: usize,
    pub standings: Vec<FactionStanding>,
}

pub struct Skirmish {
    config: GameConfig,
    seed: u64,
    map: GameMap,
    roster: Roster,
    state: GameState,
    skills: SkillRegistry,
    controllers: Vec<Box<dyn FactionController>>,
    rng: ChaCha8Rng,
    selected: Option<Coord>,
}

impl Skirmish {
    /// Build and deploy a match
    ///
    /// Setup order: map, biomes, deepening, factions, troops, corner
    /// deployment, lairs and their guards, then the turn state.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let skills = SkillRegistry::from_definitions(config.skills.iter().cloned());

        let mut map = GameMap::new(config.grid, config.generation.default_terrain)?;
        generate_all_biomes(
            &mut map,
            &config.generation.biomes,
            config.generation.layers,
            &mut rng,
        );
        generate_deep_terrain(&mut map, config.generation.edge_policy);

        let mut roster = Roster::new();
        for fc in &config.factions {
            roster.add_faction(
                Faction::new(
                    FactionId(0),
                    fc.name.clone(),
                    fc.primary_color,
                    fc.secondary_color,
                    fc.playable,
                )
                    .with_sprite(fc.sprite.clone()),
            );
        }

        for (i, fc) in config.factions.iter().enumerate() {
            if fc.troops == 0 {
                continue;
            }
            let name = fc.template.clone().unwrap_or_default();
            let template = config
                .template(&name)
                .ok_or_else(|| GameError::UnknownTemplate(name.clone()))?;
            if let Some(faction) = roster.faction_mut(FactionId(i)) {
                faction.spawn_batch(template, fc.troops as usize, &skills)?;
            }
        }

        for (i, fc) in config.factions.iter().enumerate() {
            let Some(faction) = roster.faction(FactionId(i)) else {
                continue;
            };
            match fc.corner {
                Some(corner) => {
                    place_faction_in_corner(
                        &mut map,
                        faction,
                        corner,
                        config.spawn.corner_area,
                        config.spawn.corner_attempts,
                        &mut rng,
                    );
                }
                None => {
                    for actor in faction.living() {
                        let coord = map
                            .get_random_spawn_cell_within(&mut rng, config.spawn.random_attempts);
                        map.place_occupant(coord, actor.id);
                    }
                }
            }
        }

        if config.lairs.max_count > 0 {
            let lairs = &config.lairs;
            place_lairs(&mut map, lairs.min_count, lairs.max_count, lairs.attempts, &mut rng);
            let owner = roster
                .faction_by_name(&lairs.faction)
                .map(|f| f.id)
                .ok_or_else(|| {
                    GameError::InvalidConfig(format!("unknown lair faction '{}'", lairs.faction))
                })?;
            let template = config
                .template(&lairs.guard_template)
                .ok_or_else(|| GameError::UnknownTemplate(lairs.guard_template.clone()))?;
            if let Some(faction) = roster.faction_mut(owner) {
                spawn_guards_around_lairs(
                    &mut map,
                    faction,
                    template,
                    lairs.min_guards,
                    lairs.max_guards,
                    &skills,
                    &mut rng,
                )?;
            }
        }

        let state = GameState::new(&mut roster);
        let controllers = config
            .factions
            .iter()
            .map(|fc| controller_for(fc.playable, config.ai))
            .collect();

        tracing::info!(
            "Skirmish ready: {}x{} map, {} factions, seed {}",
            map.width(),
            map.height(),
            roster.len(),
            seed
        );

        Ok(Self {
            config,
            seed,
            map,
            roster,
            state,
            skills,
            controllers,
            rng,
            selected: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn map(&self) -> &GameMap {
        &self.map
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn skills(&self) -> &SkillRegistry {
        &self.skills
    }

    pub fn selected(&self) -> Option<Coord> {
        self.selected
    }

    pub fn current_faction(&self) -> Option<&Faction> {
        self.roster.faction(self.state.current_faction())
    }

    pub fn actor_at(&self, coord: Coord) -> Option<&Actor> {
        self.map.occupant_at(coord).and_then(|id| self.roster.actor(id))
    }

    /// Swap who drives a faction
    pub fn set_controller(&mut self, faction: FactionId, controller: Box<dyn FactionController>) {
        if let Some(slot) = self.controllers.get_mut(faction.0) {
            *slot = controller;
        }
    }

    /// Hand every faction to the scripted AI
    pub fn automate_all(&mut self) {
        let ai = self.config.ai;
        for slot in &mut self.controllers {
            *slot = Box::new(ScriptedAi::new(ai));
        }
    }

    /// True when the faction on turn is driven by intents
    pub fn awaiting_input(&self) -> bool {
        !self.state.is_over()
            && self
                .controllers
                .get(self.state.current_faction)
                .is_some_and(|c| c.awaits_input())
    }

    fn reject<T>(&self, reason: ActionRejected) -> std::result::Result<T, ActionRejected> {
        tracing::debug!("Intent rejected: {}", reason);
        Err(reason)
    }

    /// Unit on `coord` that the active human faction may command
    fn commandable(&self, coord: Coord) -> std::result::Result<(ActorId, &Actor), ActionRejected> {
        if self.state.is_over() {
            return Err(ActionRejected::GameOver);
        }
        if !self.map.in_bounds(coord) {
            return Err(ActionRejected::OutOfBounds(coord));
        }
        let id = self.map.occupant_at(coord).ok_or(ActionRejected::NoOccupant(coord))?;
        let actor = self
            .roster
            .actor(id)
            .filter(|a| a.is_alive())
            .ok_or(ActionRejected::DeadParticipant(id))?;
        if !actor.belongs_to(self.state.current_faction()) || !self.awaiting_input() {
            return Err(ActionRejected::NotYourTurn(id));
        }
        Ok((id, actor))
    }

    /// Select the unit on `coord` and flag the cells it can reach
    ///
    /// Any unit can be inspected. Move and attack flags are only drawn for
    /// the moves the unit still has.
    pub fn select_cell(&mut self, coord: Coord) -> std::result::Result<Selection, ActionRejected> {
        self.map.clear_range_flags();
        self.selected = None;

        if !self.map.in_bounds(coord) {
            return self.reject(ActionRejected::OutOfBounds(coord));
        }
        let Some(id) = self.map.occupant_at(coord) else {
            return self.reject(ActionRejected::NoOccupant(coord));
        };
        let Some(actor) = self.roster.actor(id).filter(|a| a.is_alive()) else {
            return self.reject(ActionRejected::DeadParticipant(id));
        };

        let (can_move, can_act) = (actor.can_move, actor.can_act);
        let (movement, range) = (actor.movement, actor.effective_range());
        let move_cells = if can_move {
            calculate_movement_range(&mut self.map, coord, movement)
        } else {
            0
        };
        let attack_cells = if can_act {
            calculate_attack_range(&mut self.map, coord, range)
        } else {
            0
        };

        self.selected = Some(coord);
        Ok(Selection {
            actor: id,
            coord,
            move_cells,
            attack_cells,
        })
    }

    pub fn deselect(&mut self) {
        self.selected = None;
        self.map.clear_range_flags();
    }

    /// Move the unit on `from` to `to`
    ///
    /// Reachability is recomputed here; cell flags are never trusted.
    pub fn request_move(
        &mut self,
        from: Coord,
        to: Coord,
    ) -> std::result::Result<(), ActionRejected> {
        let (id, actor) = match self.commandable(from) {
            Ok(found) => found,
            Err(reason) => return self.reject(reason),
        };
        if !actor.can_move {
            return self.reject(ActionRejected::CannotMove(id));
        }
        if !self.map.in_bounds(to) {
            return self.reject(ActionRejected::OutOfBounds(to));
        }
        if !self.map.can_unit_enter(to) {
            return self.reject(ActionRejected::DestinationBlocked(to));
        }
        if !movement_reach(&self.map, from, actor.movement).contains(&to) {
            return self.reject(ActionRejected::Unreachable(to));
        }

        self.map.move_occupant(from, to);
        if let Some(actor) = self.roster.actor_mut(id) {
            actor.can_move = false;
        }
        self.deselect();
        tracing::debug!("{} moved {} -> {}", id, from, to);
        Ok(())
    }

    /// Strike from the unit on `from` at the unit on `target`
    pub fn request_attack(
        &mut self,
        from: Coord,
        target: Coord,
    ) -> std::result::Result<CombatResult, ActionRejected> {
        if let Err(reason) = self.commandable(from) {
            return self.reject(reason);
        }
        let result = match execute_at_cells(&mut self.map, &mut self.roster, from, target) {
            Ok(result) => result,
            Err(reason) => return self.reject(reason),
        };
        self.deselect();
        self.state.check_victory_conditions(&self.roster);
        Ok(result)
    }

    /// Preview a strike without changing anything
    pub fn forecast_at(
        &self,
        from: Coord,
        target: Coord,
    ) -> std::result::Result<CombatForecast, ActionRejected> {
        let (attacker, defender) = check_attack(&self.map, &self.roster, from, target)?;
        match (self.roster.actor(attacker), self.roster.actor(defender)) {
            (Some(a), Some(d)) => Ok(forecast(a, d)),
            _ => Err(ActionRejected::NoOccupant(target)),
        }
    }

    /// Close the human faction's turn, then let any AI factions play
    pub fn end_turn(&mut self) -> std::result::Result<Vec<AiReport>, ActionRejected> {
        if self.state.is_over() {
            return self.reject(ActionRejected::GameOver);
        }
        self.deselect();
        self.state.end_current_turn(&mut self.roster);
        Ok(self.run_pending_ai())
    }

    /// Play AI turns until a human faction is due or the game ends
    ///
    /// Plays at most one full round, so a match with no human seats
    /// returns control instead of running forever.
    pub fn run_pending_ai(&mut self) -> Vec<AiReport> {
        let mut reports = Vec::new();
        for _ in 0..self.roster.len() {
            if self.state.is_over() || self.awaiting_input() {
                break;
            }
            let faction = self.state.current_faction();
            let Some(controller) = self.controllers.get_mut(faction.0) else {
                break;
            };
            let outcome = controller.take_turn(TurnContext {
                map: &mut self.map,
                roster: &mut self.roster,
                faction,
                rng: &mut self.rng,
            });
            if let TurnOutcome::Finished(report) = outcome {
                reports.push(report);
            }
            self.state.end_current_turn(&mut self.roster);
        }
        reports
    }

    /// Play until someone wins or `max_turns` rounds have started
    ///
    /// Human seats pass their turn without acting.
    pub fn run_to_completion(&mut self, max_turns: u32) -> MatchSummary {
        let mut attacks = 0;
        let mut kills = 0;
        while !self.state.is_over() && self.state.turn_number <= max_turns {
            if self.awaiting_input() {
                self.state.end_current_turn(&mut self.roster);
                continue;
            }
            for report in self.run_pending_ai() {
                attacks += report.attacks.len();
                kills += report.attacks.iter().filter(|a| a.defender_died).count();
            }
        }
        self.summary(attacks, kills)
    }

    fn summary(&self, attacks: usize, kills: usize) -> MatchSummary {
        let standings = self
            .roster
            .factions()
            .iter()
            .map(|f| FactionStanding {
                faction: f.id,
                name: f.name.clone(),
                alive: f.count_alive(),
                fielded: f.actors.len(),
            })
            .collect();
        MatchSummary {
            seed: self.seed,
            turns: self.state.turn_number,
            finished: self.state.is_over(),
            winner: self
                .state
                .winner()
                .and_then(|id| self.roster.faction(id))
                .map(|f| f.name.clone()),
            attacks,
            kills,
            standings,
        }
    }

    /// Actors that levelled up since the last call; clears their flag
    pub fn take_level_ups(&mut self) -> Vec<ActorId> {
        let mut ids = Vec::new();
        for faction in self.roster.factions_mut() {
            for actor in &mut faction.actors {
                if actor.acknowledge_level_up() {
                    ids.push(actor.id);
                }
            }
        }
        ids
    }
}
