//! Turn and phase bookkeeping
//!
//! `GameState` does not own the factions. Every transition takes the roster
//! so faction turn flags and unit flags stay in step with the state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::actor::{Faction, Roster};
use crate::core::types::FactionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    PlayerTurn,
    EnemyTurn,
    TurnTransition,
    GameOver,
    Victory,
}

impl GamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            GamePhase::PlayerTurn => "Player Turn",
            GamePhase::EnemyTurn => "Enemy Turn",
            GamePhase::TurnTransition => "Turn Transition",
            GamePhase::GameOver => "Game Over",
            GamePhase::Victory => "Victory",
        }
    }

    fn for_faction(faction: Option<&Faction>) -> Self {
        match faction {
            Some(f) if f.playable => GamePhase::PlayerTurn,
            _ => GamePhase::EnemyTurn,
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub current_faction: usize,
    /// Full rounds started, beginning at 1
    pub turn_number: u32,
    pub game_over: bool,
    pub winner: Option<FactionId>,
}

impl GameState {
    /// Faction 0 opens turn 1
    pub fn new(roster: &mut Roster) -> Self {
        for (i, faction) in roster.factions_mut().iter_mut().enumerate() {
            faction.has_turn = i == 0;
        }
        let phase = GamePhase::for_faction(roster.faction(FactionId(0)));

        if let Some(first) = roster.faction(FactionId(0)) {
            tracing::info!("Game start. Turn 1: {}", first.name);
        }

        Self {
            phase,
            current_faction: 0,
            turn_number: 1,
            game_over: false,
            winner: None,
        }
    }

    pub fn current_faction(&self) -> FactionId {
        FactionId(self.current_faction)
    }

    pub fn is_player_turn(&self) -> bool {
        self.phase == GamePhase::PlayerTurn
    }

    pub fn is_ai_turn(&self) -> bool {
        self.phase == GamePhase::EnemyTurn
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<FactionId> {
        self.winner
    }

    /// Close the current faction's turn and hand over to the next one
    ///
    /// Returns false once the game is over.
    pub fn end_current_turn(&mut self, roster: &mut Roster) -> bool {
        if self.game_over {
            return false;
        }
        if let Some(faction) = roster.faction_mut(self.current_faction()) {
            tracing::debug!("Ending turn for {}", faction.name);
            faction.end_all_turns();
        }
        self.next_turn(roster)
    }

    /// Advance to the next faction, wrapping into a new round
    pub fn next_turn(&mut self, roster: &mut Roster) -> bool {
        if self.game_over || roster.is_empty() {
            return false;
        }

        self.current_faction += 1;
        if self.current_faction >= roster.len() {
            self.current_faction = 0;
            self.turn_number += 1;
            tracing::info!("=== Turn {} ===", self.turn_number);
        }

        let current = self.current_faction;
        for (i, faction) in roster.factions_mut().iter_mut().enumerate() {
            faction.has_turn = i == current;
        }

        let id = self.current_faction();
        if let Some(faction) = roster.faction_mut(id) {
            faction.reset_turns();
            tracing::debug!("{}'s turn", faction.name);
        }
        self.phase = GamePhase::for_faction(roster.faction(id));

        self.check_victory_conditions(roster);
        true
    }

    /// End the game once at most one faction has a living unit
    ///
    /// The winner is the last faction standing, or nobody if all fell.
    pub fn check_victory_conditions(&mut self, roster: &Roster) -> bool {
        if self.game_over {
            return true;
        }
        let survivors = roster.surviving_factions();
        if survivors.len() > 1 {
            return false;
        }

        self.game_over = true;
        self.phase = GamePhase::GameOver;
        self.winner = survivors.first().copied();
        match self.winner.and_then(|id| roster.faction(id)) {
            Some(faction) => tracing::info!("Victory: {} has won the game", faction.name),
            None => tracing::info!("Game over with no survivors"),
        }
        true
    }
}
