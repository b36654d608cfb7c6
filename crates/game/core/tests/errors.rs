//! Error taxonomy and abort behavior.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use common::{nfl_game, scripted_registry, scrimmage_state};
use gridiron_core::decision::kinds;
use gridiron_core::rules::{OvertimeRule, PlayRuling};
use gridiron_core::sim::{SimEnv, drive, play};
use gridiron_core::state::GameFormat;
use gridiron_core::{
    ApplyError, CancelFlag, DecisionPoint, DecisionRegistry, ErrorSeverity, ExecutionData,
    GameConfig, GameError, GameOrchestrator, GameSetup, Matchup, NflRules,
    PlayOutcome, RegistryError, ReplayError, RulesOracle, ScoreAward, ScoringKind, ScoringTable,
    SimError, SimRng, Snapshot, StateInvariantError, StateUpdater, Termination, TransitionPhase,
    replay,
};

#[test]
fn binding_twice_without_override_conflicts() {
    let mut registry = DecisionRegistry::with_defaults();
    registry
        .register_fn::<kinds::PlayClock, _>(|_, _| 5, false)
        .unwrap();

    let err = registry
        .register_fn::<kinds::PlayClock, _>(|_, _| 6, false)
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::Conflict {
            point: DecisionPoint::PlayClock
        }
    );
    assert_eq!(err.severity(), ErrorSeverity::Fatal);

    registry
        .register_fn::<kinds::PlayClock, _>(|_, _| 6, true)
        .unwrap();
    assert_eq!(registry.bound_points(), vec![DecisionPoint::PlayClock]);
}

#[test]
fn unbound_point_aborts_before_the_opening() {
    let orchestrator = GameOrchestrator::new(
        Arc::new(NflRules::new()),
        DecisionRegistry::new(),
        GameConfig::new(),
    );
    let record = orchestrator.run(&GameSetup::new(Matchup::standard(11), 1));

    assert_eq!(
        record.termination(),
        &Termination::Aborted(SimError::Registry(RegistryError::MissingModel {
            point: DecisionPoint::CoinTossWinner
        }))
    );
    assert!(record.opening().is_none());
    assert!(record.drives().is_empty());
    assert_eq!(record.final_state().revision(), 0);
    assert_eq!(replay(&record), Err(ReplayError::MissingOpening));
}

#[test]
fn contract_violation_leaves_state_untouched() {
    let rules = NflRules::new();
    let matchup = Matchup::standard(11);
    let config = GameConfig::new();
    let mut registry = scripted_registry("power", PlayOutcome::gain(3));
    registry
        .register_fn::<kinds::PlayClock, _>(|ctx, _| ctx.format().max_play_seconds + 1, false)
        .unwrap();
    let env = SimEnv {
        registry: &registry,
        rules: &rules,
        matchup: &matchup,
        config: &config,
    };

    let mut state = scrimmage_state(&rules, 30, 2, 7);
    let before = state.clone();
    let mut rng = SimRng::from_seed(9);

    match play::execute(&mut state, &env, &mut rng, 0, None) {
        Err(SimError::Model(error)) => {
            assert_eq!(error.point, DecisionPoint::PlayClock);
            assert!(SimError::Model(error).severity().is_recoverable());
        }
        other => panic!("expected a model error, got {other:?}"),
    }
    assert_eq!(state, before);
}

#[test]
fn retry_policy_discards_rejected_attempts() {
    let rules = NflRules::new();
    let matchup = Matchup::standard(11);
    let config = GameConfig::new().retrying();
    let mut registry = scripted_registry("power", PlayOutcome::gain(12));

    // First call breaks the contract, later calls behave.
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    registry
        .register_fn::<kinds::PlayClock, _>(
            move |ctx, _| {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    ctx.format().max_play_seconds + 1
                } else {
                    6
                }
            },
            false,
        )
        .unwrap();
    registry
        .register_fn::<kinds::OffensivePlayCall, _>(
            |ctx, _| {
                let name = if ctx.snapshot.possession.ball_on >= 50 {
                    "punt"
                } else {
                    "power"
                };
                ctx.offense().playbook().find(name).cloned().unwrap()
            },
            true,
        )
        .unwrap();
    registry
        .register_fn::<kinds::ScrimmageOutcome, _>(
            |ctx, _| {
                if ctx.snapshot.possession.ball_on >= 50 {
                    PlayOutcome::gain(40)
                } else {
                    PlayOutcome::gain(12)
                }
            },
            true,
        )
        .unwrap();
    let env = SimEnv {
        registry: &registry,
        rules: &rules,
        matchup: &matchup,
        config: &config,
    };

    let mut state = scrimmage_state(&rules, 30, 1, 10);
    let mut rng = SimRng::from_seed(11);
    let drive = drive::advance(&mut state, &env, &mut rng, 0, &CancelFlag::new()).unwrap();

    assert_eq!(drive.rejected().len(), 1);
    assert_eq!(drive.rejected()[0].index, 0);
    assert_eq!(drive.rejected()[0].attempt, 1);
    assert_eq!(drive.rejected()[0].error.point, DecisionPoint::PlayClock);
    // 30 -> 42 -> 54, then the punt.
    assert_eq!(drive.plays().len(), 3);
    assert_eq!(drive.plays()[0].snapshot().possession.ball_on, 30);
    assert_eq!(drive.plays()[0].execution().seconds_requested(), 6);
}

#[test]
fn abort_policy_stops_the_game_with_partial_records() {
    let mut registry = DecisionRegistry::with_defaults();
    registry
        .register_fn::<kinds::PlayClock, _>(
            |ctx, _| {
                if ctx.snapshot.clock.quarter >= 2 {
                    ctx.format().max_play_seconds + 1
                } else {
                    8
                }
            },
            false,
        )
        .unwrap();
    let orchestrator =
        GameOrchestrator::new(Arc::new(NflRules::new()), registry, GameConfig::new());
    let record = orchestrator.run(&GameSetup::new(Matchup::standard(11), 3));

    assert!(matches!(
        record.termination(),
        Termination::Aborted(SimError::Model(e)) if e.point == DecisionPoint::PlayClock
    ));
    assert!(!record.drives().is_empty());
    for drive in record.drives() {
        assert!(drive.end().clock.quarter <= 2);
    }
    replay(&record).expect("partial record replays");

    let aborted = record.clone().into_result().unwrap_err();
    assert_eq!(*aborted.record, record);
}

/// Power runs for three yards in the first quarter; from the second quarter on
/// every outcome runs off the field.
fn breaks_after_first_quarter() -> DecisionRegistry {
    let mut registry = scripted_registry("power", PlayOutcome::gain(3));
    registry
        .register_fn::<kinds::ScrimmageOutcome, _>(
            |ctx, _| {
                if ctx.snapshot.clock.quarter >= 2 {
                    PlayOutcome::gain(500)
                } else {
                    PlayOutcome::gain(3)
                }
            },
            true,
        )
        .unwrap();
    registry
}

#[test]
fn failed_snap_drops_its_quarter_change() {
    let rules = NflRules::new();
    let matchup = Matchup::standard(11);
    let config = GameConfig::new();
    let registry = breaks_after_first_quarter();
    let env = SimEnv {
        registry: &registry,
        rules: &rules,
        matchup: &matchup,
        config: &config,
    };

    let mut state = scrimmage_state(&rules, 40, 2, 5);
    state.clock.quarter = 1;
    state.clock.seconds_remaining = 0;
    state.clock.running = false;
    let before = state.clone();
    let mut rng = SimRng::from_seed(13);

    let abort = drive::advance(&mut state, &env, &mut rng, 0, &CancelFlag::new())
        .expect_err("second-quarter snap breaks its contract");
    assert!(matches!(
        &abort.error,
        SimError::Model(e) if e.point == DecisionPoint::ScrimmageOutcome
    ));
    assert!(abort.plays.is_empty());
    assert_eq!(state, before);
    assert_eq!(state.clock.quarter, 1);
}

#[test]
fn aborted_game_final_state_matches_its_records() {
    for seed in [3, 21, 40] {
        let orchestrator = GameOrchestrator::new(
            Arc::new(NflRules::new()),
            breaks_after_first_quarter(),
            GameConfig::new(),
        );
        let record = orchestrator.run(&GameSetup::new(Matchup::standard(11), seed));

        assert!(matches!(
            record.termination(),
            Termination::Aborted(SimError::Model(e)) if e.point == DecisionPoint::ScrimmageOutcome
        ));
        let trajectory = replay(&record).expect("aborted record replays");
        assert_eq!(trajectory.last(), Some(record.final_state()));

        // A second-quarter state is only reachable through a recorded play.
        if record.final_state().clock.quarter >= 2 {
            assert!(record.play_records().any(|p| p.period_start().is_some()));
        }
    }
}

#[test]
fn stale_snapshot_is_refused() {
    let record = nfl_game(5);
    let play = record.drives()[0].plays()[0].clone();
    let mut state = record.final_state().clone();
    let before = state.clone();

    let err = StateUpdater::new(&mut state)
        .apply_play(play.snapshot(), play.execution(), play.ruling())
        .unwrap_err();
    assert!(matches!(
        &err,
        ApplyError::Play(e)
            if e.phase == TransitionPhase::PreValidate
                && matches!(e.error, StateInvariantError::StaleSnapshot { .. })
    ));
    assert!(err.severity().is_internal());
    assert_eq!(state, before);
}

#[test]
fn edit_outside_the_updater_is_refused() {
    let record = nfl_game(6);
    let play = &record.drives()[0].plays()[0];
    let mut state = play.snapshot().state().clone();
    state.scoreboard.home += 7;
    let before = state.clone();

    let err = StateUpdater::new(&mut state)
        .apply_play(play.snapshot(), play.execution(), play.ruling())
        .unwrap_err();
    assert!(matches!(
        &err,
        ApplyError::Play(e)
            if e.phase == TransitionPhase::PreValidate
                && matches!(e.error, StateInvariantError::SnapshotMismatch { .. })
    ));
    assert_eq!(state, before);
    assert_eq!(state.revision(), play.snapshot().revision());
}

#[test]
fn cancelled_game_returns_partial_record() {
    let orchestrator = common::nfl_orchestrator();
    let cancel = CancelFlag::new();
    cancel.cancel();
    let record = orchestrator.run_with_cancel(&GameSetup::new(Matchup::standard(11), 4), &cancel);

    assert_eq!(record.termination(), &Termination::Aborted(SimError::Cancelled));
    assert!(record.opening().is_some());
    assert!(record.drives().is_empty());
}

/// Awards one point too many on every score after the first quarter.
struct InflatedScoring {
    inner: NflRules,
}

impl RulesOracle for InflatedScoring {
    fn league(&self) -> &'static str {
        "inflated"
    }

    fn format(&self) -> GameFormat {
        self.inner.format()
    }

    fn scoring_table(&self) -> &ScoringTable {
        self.inner.scoring_table()
    }

    fn overtime(&self) -> OvertimeRule {
        self.inner.overtime()
    }

    fn adjudicate(&self, snapshot: &Snapshot, execution: &ExecutionData) -> PlayRuling {
        let mut ruling = self.inner.adjudicate(snapshot, execution);
        if snapshot.clock.quarter >= 2 {
            ruling.award = Some(ScoreAward {
                side: snapshot.possession.offense,
                kind: ScoringKind::Touchdown,
                points: 5,
            });
        }
        ruling
    }
}

#[test]
fn inconsistent_ruling_is_a_rule_violation() {
    let orchestrator = GameOrchestrator::new(
        Arc::new(InflatedScoring {
            inner: NflRules::new(),
        }),
        DecisionRegistry::with_defaults(),
        GameConfig::new().retrying(),
    );
    let record = orchestrator.run(&GameSetup::new(Matchup::standard(11), 12));

    let Termination::Aborted(error) = record.termination() else {
        panic!("game should abort");
    };
    assert!(matches!(error, SimError::Rule(_)));
    assert_eq!(error.severity(), ErrorSeverity::Fatal);
    assert_eq!(record.league(), "inflated");

    // Everything finalized before the bad ruling is intact and replays.
    assert!(record.total_plays() > 0);
    assert!(record.play_records().all(|p| p.snapshot().clock.quarter == 1));
    let recorded: u32 = record
        .play_records()
        .map(|p| p.delta().home_points + p.delta().away_points)
        .sum();
    let score = record.final_score();
    assert_eq!(recorded, score.home + score.away);
    replay(&record).expect("partial record replays");
}
