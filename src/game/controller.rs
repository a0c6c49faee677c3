//! Who drives a faction: a human at the controls or the scripted AI

use rand_chacha::ChaCha8Rng;

use crate::actor::Roster;
use crate::core::types::FactionId;
use crate::game::ai::{run_faction_turn, AiConfig, AiReport};
use crate::map::GameMap;

/// Mutable view of the match handed to a controller for one turn
pub struct TurnContext<'a> {
    pub map: &'a mut GameMap,
    pub roster: &'a mut Roster,
    pub faction: FactionId,
    pub rng: &'a mut ChaCha8Rng,
}

/// Result of asking a controller to play
#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// Waiting on player intents; the turn stays open
    AwaitingInput,
    /// Done; the caller ends the turn
    Finished(AiReport),
}

/// Strategy for playing a faction's turn
pub trait FactionController {
    fn label(&self) -> &str;

    /// True when turns are driven by external intents rather than `take_turn`
    fn awaits_input(&self) -> bool;

    fn take_turn(&mut self, ctx: TurnContext<'_>) -> TurnOutcome;
}

/// Human seat: never acts on its own
#[derive(Debug, Clone, Default)]
pub struct PlayerControlled;

impl FactionController for PlayerControlled {
    fn label(&self) -> &str {
        "player"
    }

    fn awaits_input(&self) -> bool {
        true
    }

    fn take_turn(&mut self, _ctx: TurnContext<'_>) -> TurnOutcome {
        TurnOutcome::AwaitingInput
    }
}

/// Greedy nearest-enemy-or-wander AI
#[derive(Debug, Clone, Default)]
pub struct ScriptedAi {
    pub config: AiConfig,
}

impl ScriptedAi {
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }
}

impl FactionController for ScriptedAi {
    fn label(&self) -> &str {
        "scripted-ai"
    }

    fn awaits_input(&self) -> bool {
        false
    }

    fn take_turn(&mut self, ctx: TurnContext<'_>) -> TurnOutcome {
        let report = run_faction_turn(ctx.map, ctx.roster, ctx.faction, &self.config, ctx.rng);
        TurnOutcome::Finished(report)
    }
}

/// Default seat assignment: playable factions get a human, the rest the AI
pub fn controller_for(playable: bool, ai: AiConfig) -> Box<dyn FactionController> {
    if playable {
        Box::new(PlayerControlled)
    } else {
        Box::new(ScriptedAi::new(ai))
    }
}
