use std::sync::Arc;

use crate::config::GameConfig;
use crate::decision::{DecisionRegistry, kinds};
use crate::engine::StateUpdater;
use crate::execution::ExecutionDraft;
use crate::record::{
    Boundary, BoundaryChoices, DriveRecord, GameRecord, GameRecordParts, PlayRecord, Termination,
    TransitionRecord,
};
use crate::rng::SimRng;
use crate::rules::{
    BoundaryRuling, Chooser, CoinToss, GameStart, GameVerdict, RulesOracle, RulesTransition,
    check_transition,
};
use crate::state::{GameState, Snapshot};
use crate::team::{Matchup, Side};

use super::{CancelFlag, SimEnv, SimError, drive};

/// Inputs that vary between replications of the same configured engine.
#[derive(Clone, Debug)]
pub struct GameSetup {
    pub matchup: Matchup,
    pub seed: u64,
}

impl GameSetup {
    pub fn new(matchup: Matchup, seed: u64) -> Self {
        Self { matchup, seed }
    }
}

/// Runs whole games: opening toss, drives, halftime and overtime boundaries.
///
/// An orchestrator holds only shared, read-only configuration; every call to
/// [`run`](Self::run) builds a fresh state and rng, so one orchestrator can
/// drive any number of games, concurrently if needed.
#[derive(Clone)]
pub struct GameOrchestrator {
    rules: Arc<dyn RulesOracle>,
    registry: DecisionRegistry,
    config: GameConfig,
}

/// Mutable bookkeeping of one game in progress.
struct GameRun {
    state: GameState,
    rng: SimRng,
    opening: Option<TransitionRecord>,
    drives: Vec<DriveRecord>,
    boundaries: Vec<Boundary>,
    interrupted: Vec<PlayRecord>,
}

impl GameOrchestrator {
    pub fn new(rules: Arc<dyn RulesOracle>, registry: DecisionRegistry, config: GameConfig) -> Self {
        Self {
            rules,
            registry,
            config,
        }
    }

    pub fn rules(&self) -> &dyn RulesOracle {
        self.rules.as_ref()
    }

    pub fn registry(&self) -> &DecisionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Plays one game to completion or abort.
    ///
    /// Always returns a record; an aborted game carries its partial record
    /// chain and the error in [`GameRecord::termination`].
    pub fn run(&self, setup: &GameSetup) -> GameRecord {
        self.run_with_cancel(setup, &CancelFlag::new())
    }

    pub fn run_with_cancel(&self, setup: &GameSetup, cancel: &CancelFlag) -> GameRecord {
        let env = SimEnv {
            registry: &self.registry,
            rules: self.rules.as_ref(),
            matchup: &setup.matchup,
            config: &self.config,
        };
        let mut run = GameRun {
            state: GameState::new(self.rules.format()),
            rng: SimRng::from_seed(setup.seed),
            opening: None,
            drives: Vec::new(),
            boundaries: Vec::new(),
            interrupted: Vec::new(),
        };

        let _span = tracing::debug_span!("game", seed = setup.seed, league = self.rules.league())
            .entered();

        let termination = match play_game(&env, &mut run, cancel) {
            Ok(termination) => termination,
            Err(error) => {
                tracing::warn!(
                    %error,
                    drives = run.drives.len(),
                    interrupted = run.interrupted.len(),
                    "game aborted"
                );
                Termination::Aborted(error)
            }
        };
        if let Termination::Completed(reason) = &termination {
            tracing::info!(
                %reason,
                home = run.state.scoreboard.home,
                away = run.state.scoreboard.away,
                drives = run.drives.len(),
                "game completed"
            );
        }

        GameRecord::new(GameRecordParts {
            seed: setup.seed,
            league: self.rules.league().to_string(),
            opening: run.opening,
            drives: run.drives,
            boundaries: run.boundaries,
            interrupted: run.interrupted,
            final_state: run.state,
            termination,
        })
    }
}

fn play_game(env: &SimEnv<'_>, run: &mut GameRun, cancel: &CancelFlag) -> Result<Termination, SimError> {
    run.opening = Some(open_game(env, &mut run.state, &mut run.rng)?);

    loop {
        let snapshot = Snapshot::capture(&run.state);
        if let GameVerdict::Over(reason) = env.rules.game_verdict(&snapshot) {
            return Ok(Termination::Completed(reason));
        }
        if cancel.is_cancelled() {
            return Err(SimError::Cancelled);
        }
        let max_drives = env.config.max_drives;
        if run.drives.len() >= max_drives as usize {
            return Err(SimError::GameStalled { max_drives });
        }

        if let Some(ruling) = env.rules.boundary(&snapshot) {
            let transition = apply_boundary(env, &mut run.state, &mut run.rng, &ruling)?;
            tracing::debug!(
                kind = %ruling.kind,
                quarter = ruling.period.quarter,
                "boundary applied"
            );
            run.boundaries.push(Boundary {
                before_drive: run.drives.len() as u32,
                transition,
            });
            continue;
        }

        let index = run.drives.len() as u32;
        match drive::advance(&mut run.state, env, &mut run.rng, index, cancel) {
            Ok(record) => run.drives.push(record),
            Err(abort) => {
                if !abort.rejected.is_empty() {
                    tracing::debug!(rejected = abort.rejected.len(), "interrupted drive had rejected attempts");
                }
                run.interrupted = abort.plays;
                return Err(abort.error);
            }
        }
    }
}

/// Resolves the opening toss and installs the opening kickoff.
fn open_game(
    env: &SimEnv<'_>,
    state: &mut GameState,
    rng: &mut SimRng,
) -> Result<TransitionRecord, SimError> {
    let snapshot = Snapshot::capture(state);
    let (transition, choices) = match env.rules.game_start(&snapshot) {
        GameStart::CoinToss => {
            let (toss, choices) = coin_toss(env, &snapshot, rng)?;
            let transition = RulesTransition {
                kickoff: Some(env.rules.opening_kickoff(&snapshot, &toss)),
                toss: Some(toss),
                ..RulesTransition::default()
            };
            (transition, choices)
        }
        GameStart::Fixed(kickoff) => (
            RulesTransition {
                kickoff: Some(kickoff),
                ..RulesTransition::default()
            },
            BoundaryChoices::default(),
        ),
    };
    commit_transition(env, state, snapshot, choices, transition)
}

fn apply_boundary(
    env: &SimEnv<'_>,
    state: &mut GameState,
    rng: &mut SimRng,
    ruling: &BoundaryRuling,
) -> Result<TransitionRecord, SimError> {
    let snapshot = Snapshot::capture(state);
    let (toss, choices) = match ruling.chooser {
        Chooser::Nobody => (None, BoundaryChoices::default()),
        Chooser::Side(chooser) => {
            let choice = kick_receive(env, &snapshot, chooser, rng)?;
            let toss = CoinToss {
                winner: chooser,
                choice,
            };
            let choices = BoundaryChoices {
                toss_winner: None,
                chooser: Some(chooser),
                choice: Some(choice),
            };
            (Some(toss), choices)
        }
        Chooser::CoinToss => {
            let (toss, choices) = coin_toss(env, &snapshot, rng)?;
            (Some(toss), choices)
        }
    };
    let transition = env.rules.resolve_boundary(&snapshot, ruling, toss);
    commit_transition(env, state, snapshot, choices, transition)
}

fn coin_toss(
    env: &SimEnv<'_>,
    snapshot: &Snapshot,
    rng: &mut SimRng,
) -> Result<(CoinToss, BoundaryChoices), SimError> {
    let draft = ExecutionDraft::default();
    let winner = env.decide::<kinds::CoinTossWinner>(snapshot, &draft, None, rng)?;
    let choice = kick_receive(env, snapshot, winner, rng)?;
    tracing::debug!(%winner, %choice, "coin toss");
    Ok((
        CoinToss { winner, choice },
        BoundaryChoices {
            toss_winner: Some(winner),
            chooser: Some(winner),
            choice: Some(choice),
        },
    ))
}

fn kick_receive(
    env: &SimEnv<'_>,
    snapshot: &Snapshot,
    chooser: Side,
    rng: &mut SimRng,
) -> Result<crate::rules::TossChoice, SimError> {
    let draft = ExecutionDraft::default();
    env.decide::<kinds::KickReceiveChoice>(snapshot, &draft, Some(chooser), rng)
}

fn commit_transition(
    env: &SimEnv<'_>,
    state: &mut GameState,
    snapshot: Snapshot,
    choices: BoundaryChoices,
    transition: RulesTransition,
) -> Result<TransitionRecord, SimError> {
    check_transition(&transition, env.rules.scoring_table(), &snapshot.format)?;
    let events = StateUpdater::new(state).apply_transition(&snapshot, &transition)?;
    Ok(TransitionRecord::new(snapshot, choices, transition, events))
}
