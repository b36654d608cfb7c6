use std::sync::Arc;

use gridiron_core::decision::kinds;
use gridiron_core::{DecisionRegistry, GameConfig, Matchup, NflRules, Termination, replay};
use gridiron_runtime::{League, MemorySink, RunSummary, RunnerConfig, RuntimeError, SimulationRunner};

fn nfl_runner(replications: u32) -> SimulationRunner {
    SimulationRunner::new(Arc::new(NflRules::new()), Matchup::standard(11))
        .with_replications(replications)
        .with_base_seed(2024)
        .with_batch_size(3)
}

#[test]
fn replications_arrive_in_order_with_derived_seeds() {
    let runner = nfl_runner(7);
    let (records, summary) = runner.run_collect().expect("runner succeeds");

    assert_eq!(records.len(), 7);
    for (replication, record) in records.iter().enumerate() {
        assert_eq!(record.seed(), runner.seed_for(replication as u32));
    }
    assert_eq!(summary.games, 7);
    assert_eq!(summary, RunSummary::from_records(&records));
    assert_eq!(
        summary.home_wins + summary.away_wins + summary.ties + summary.aborted,
        summary.games
    );
}

#[test]
fn parallel_runs_match_sequential_games() {
    let runner = nfl_runner(4);
    let (records, _) = runner.run_collect().unwrap();

    for (replication, record) in records.iter().enumerate() {
        let alone = runner.run_one(replication as u32);
        assert_eq!(
            hex::encode(alone.digest().unwrap()),
            hex::encode(record.digest().unwrap())
        );
        replay(record).expect("record replays");
    }
}

#[test]
fn summary_averages_completed_games() {
    let (records, summary) = nfl_runner(5).run_collect().unwrap();
    let completed: Vec<_> = records.iter().filter(|r| r.is_completed()).collect();
    assert_eq!(summary.completed() as usize, completed.len());

    let home: u32 = completed.iter().map(|r| r.final_score().home).sum();
    let expected = f64::from(home) / completed.len() as f64;
    assert!((summary.avg_home_score - expected).abs() < 1e-9);
    assert!(summary.avg_drives > 0.0);
    assert!(summary.avg_plays > summary.avg_drives);
}

#[test]
fn registry_factory_builds_one_registry_per_game() {
    let runner = nfl_runner(2).with_registry_factory(DecisionRegistry::new);
    let (records, summary) = runner.run_collect().unwrap();

    assert_eq!(summary.aborted, 2);
    assert_eq!(summary.avg_home_score, 0.0);
    for record in &records {
        assert!(matches!(record.termination(), Termination::Aborted(_)));
    }
}

#[test]
fn model_errors_are_retried_when_configured() {
    let runner = nfl_runner(2)
        .with_game_config(GameConfig::new().retrying())
        .with_registry_factory(|| {
            let mut registry = DecisionRegistry::with_defaults();
            // Every fourth play clock breaks the contract.
            registry
                .register_fn::<kinds::PlayClock, _>(
                    |ctx, rng| {
                        if rng.percent(25) {
                            ctx.format().max_play_seconds + 1
                        } else {
                            6
                        }
                    },
                    false,
                )
                .expect("fresh binding");
            registry
        });
    let (records, summary) = runner.run_collect().unwrap();

    let rejected: usize = records
        .iter()
        .flat_map(|r| r.drives())
        .map(|d| d.rejected().len())
        .sum();
    assert!(rejected > 0);
    assert_eq!(summary.games, 2);
}

#[test]
fn zero_replications_is_an_error() {
    let err = nfl_runner(0).run(&mut MemorySink::new()).unwrap_err();
    assert!(matches!(err, RuntimeError::NoReplications));
}

#[test]
fn config_selects_the_league() {
    let config = RunnerConfig {
        replications: 2,
        base_seed: 9,
        league: League::Cfl,
        ..RunnerConfig::default()
    };
    let (records, _) = SimulationRunner::from_config(&config).run_collect().unwrap();
    assert!(records.iter().all(|r| r.league() == "cfl"));
}
