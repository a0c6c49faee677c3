//! Turn flow: phase state, faction controllers, the scripted AI and the
//! session that ties a match together

pub mod ai;
pub mod controller;
pub mod skirmish;
pub mod state;

pub use ai::{find_nearest_enemy, process_ai_turn, run_faction_turn, AiConfig, AiReport};
pub use controller::{
    controller_for, FactionController, PlayerControlled, ScriptedAi, TurnContext, TurnOutcome,
};
pub use skirmish::{FactionStanding, MatchSummary, Selection, Skirmish};
pub use state::{GamePhase, GameState};
