//! Whole-game properties checked over stock-model games.

mod common;

use std::sync::Arc;

use common::{nfl_game, nfl_orchestrator};
use gridiron_core::{
    CflRules, DecisionRegistry, GameConfig, GameEndReason, GameOrchestrator, GameSetup, Matchup,
    NflRules, RulesOracle, SCHEMA_VERSION, replay,
};

const SEEDS: [u64; 6] = [0, 1, 7, 42, 1_000, 0xdead_beef];

#[test]
fn same_seed_produces_byte_identical_records() {
    let orchestrator = nfl_orchestrator();
    let setup = GameSetup::new(Matchup::standard(11), 42);

    let first = orchestrator.run(&setup);
    let second = orchestrator.run(&setup);
    assert_eq!(first, second);

    let a = first.digest().expect("record encodes");
    let b = second.digest().expect("record encodes");
    assert_eq!(hex::encode(a), hex::encode(b));

    let other = orchestrator.run(&GameSetup::new(Matchup::standard(11), 43));
    assert_ne!(other.digest().unwrap(), a);
}

#[test]
fn stock_games_complete() {
    for seed in SEEDS {
        let record = nfl_game(seed);
        assert!(record.is_completed(), "seed {seed}: {:?}", record.termination());
        assert_eq!(record.schema_version(), SCHEMA_VERSION);
        assert_eq!(record.league(), "nfl");
        assert!(record.opening().is_some());
        assert!(record.interrupted().is_empty());
        assert_eq!(record.final_score(), record.final_state().scoreboard);
    }
}

#[test]
fn game_clock_is_conserved() {
    let format = NflRules::new().format();
    for seed in SEEDS {
        let record = nfl_game(seed);
        let by_drive: u32 = record.drives().iter().map(|d| d.seconds_elapsed()).sum();
        assert_eq!(by_drive, record.seconds_played());

        for drive in record.drives() {
            assert!(
                drive.seconds_elapsed() <= format.quarter_seconds,
                "seed {seed}: drive {} ran {}s",
                drive.index(),
                drive.seconds_elapsed()
            );
        }

        let regulation = format.regulation_seconds();
        match record.end_reason() {
            Some(GameEndReason::RegulationExpired) => {
                assert_eq!(record.seconds_played(), regulation, "seed {seed}");
            }
            Some(GameEndReason::OvertimeExpired) => {
                assert_eq!(
                    record.seconds_played(),
                    regulation + format.overtime_seconds,
                    "seed {seed}"
                );
            }
            Some(GameEndReason::OvertimeScore) => {
                assert!(record.seconds_played() > regulation);
                assert!(record.seconds_played() <= regulation + format.overtime_seconds);
            }
            other => panic!("seed {seed}: unexpected ending {other:?}"),
        }
    }
}

#[test]
fn clock_never_runs_backwards_inside_a_drive() {
    for seed in SEEDS {
        let record = nfl_game(seed);
        for drive in record.drives() {
            let mut last = drive.start().clock;
            for play in drive.plays() {
                let clock = play.snapshot().clock;
                if play.period_start().is_none() {
                    assert_eq!(clock.quarter, last.quarter, "seed {seed}");
                    assert!(clock.seconds_remaining <= last.seconds_remaining, "seed {seed}");
                } else {
                    assert_eq!(clock.quarter, last.quarter + 1, "seed {seed}");
                }
                let delta = play.delta();
                assert_eq!(delta.quarter_before, delta.quarter_after);
                last = clock;
            }
            assert!(drive.end().clock.seconds_remaining <= last.seconds_remaining);
        }
    }
}

#[test]
fn drive_points_sum_to_final_score() {
    for seed in SEEDS {
        let record = nfl_game(seed);
        let score = record.final_score();
        for side in [gridiron_core::Side::Home, gridiron_core::Side::Away] {
            let by_drive: u32 = record.drives().iter().map(|d| d.points(side)).sum();
            assert_eq!(by_drive, score.points(side), "seed {seed}");
        }
    }
}

#[test]
fn finalized_records_do_not_change() {
    let orchestrator = nfl_orchestrator();
    let record = orchestrator.run(&GameSetup::new(Matchup::standard(11), 7));
    let frozen = record.clone();
    let digest = record.digest().unwrap();

    // Further engine work, including replaying the record itself.
    let _ = orchestrator.run(&GameSetup::new(Matchup::standard(11), 8));
    let _ = replay(&record).unwrap();

    assert_eq!(record, frozen);
    assert_eq!(record.digest().unwrap(), digest);
}

#[test]
fn replay_reproduces_the_state_trajectory() {
    for seed in SEEDS {
        let record = nfl_game(seed);
        let trajectory = replay(&record).expect("record replays");

        let period_starts = record
            .play_records()
            .filter(|p| p.period_start().is_some())
            .count();
        // Pre-game state, the opening, every boundary, every quarter start and every play.
        let expected = 2 + record.boundaries().len() + period_starts + record.total_plays();
        assert_eq!(trajectory.len(), expected, "seed {seed}");

        assert_eq!(trajectory.last(), Some(record.final_state()));
        for pair in trajectory.windows(2) {
            assert_eq!(pair[1].revision(), pair[0].revision() + 1);
        }

        let mut states = trajectory.iter();
        for play in record.play_records() {
            assert!(states.any(|s| s == play.snapshot().state()), "seed {seed}");
        }
    }
}

#[test]
fn cfl_games_complete_without_overtime() {
    let orchestrator = GameOrchestrator::new(
        Arc::new(CflRules::new()),
        DecisionRegistry::with_defaults(),
        GameConfig::new(),
    );
    for seed in SEEDS {
        let record = orchestrator.run(&GameSetup::new(Matchup::standard(12), seed));
        assert!(record.is_completed(), "seed {seed}: {:?}", record.termination());
        assert_eq!(record.league(), "cfl");
        assert!(matches!(
            record.end_reason(),
            Some(GameEndReason::RegulationExpired | GameEndReason::Tie)
        ));
        assert!(record.final_state().clock.quarter <= 4);
        replay(&record).expect("cfl record replays");
    }
}
