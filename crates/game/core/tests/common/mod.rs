#![allow(dead_code)]

use std::sync::Arc;

use gridiron_core::decision::kinds;
use gridiron_core::{
    DecisionRegistry, GameConfig, GameOrchestrator, GameRecord, GameSetup, GameState, Matchup,
    NflRules, PlayOutcome, RulesOracle,
};

/// Stock registry whose offense always calls `call` and whose snaps always end in `outcome`.
pub fn scripted_registry(call: &'static str, outcome: PlayOutcome) -> DecisionRegistry {
    let mut registry = DecisionRegistry::with_defaults();
    registry
        .register_fn::<kinds::OffensivePlayCall, _>(
            move |ctx, _| {
                ctx.offense()
                    .playbook()
                    .find(call)
                    .cloned()
                    .expect("call is in the standard playbook")
            },
            false,
        )
        .expect("fresh binding");
    registry
        .register_fn::<kinds::ScrimmageOutcome, _>(move |_, _| outcome, false)
        .expect("fresh binding");
    registry
}

/// Scrimmage state with the home offense on `ball_on`, clock stopped.
pub fn scrimmage_state(rules: &dyn RulesOracle, ball_on: u8, down: u8, distance: u8) -> GameState {
    let mut state = GameState::new(rules.format());
    state.possession.ball_on = ball_on;
    state.possession.down = down;
    state.possession.distance = distance;
    state
}

pub fn nfl_orchestrator() -> GameOrchestrator {
    GameOrchestrator::new(
        Arc::new(NflRules::new()),
        DecisionRegistry::with_defaults(),
        GameConfig::new(),
    )
}

pub fn nfl_game(seed: u64) -> GameRecord {
    nfl_orchestrator().run(&GameSetup::new(Matchup::standard(11), seed))
}
