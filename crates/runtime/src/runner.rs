//! Monte Carlo replications over one configured matchup.
//!
//! Each replication is an independent game: its own registry (built by the
//! registry factory), its own state and its own rng seeded with
//! [`derive_seed`]`(base_seed, replication)`. Replications inside a batch run
//! on the rayon pool; their records reach the sink in replication order.

use std::sync::Arc;

use gridiron_core::{
    CancelFlag, DecisionRegistry, GameConfig, GameOrchestrator, GameRecord, GameSetup, Matchup,
    RulesOracle, Side, derive_seed,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::RunnerConfig;
use crate::error::{Result, RuntimeError};
use crate::sink::{MemorySink, RecordSink};

/// Builds a fresh registry for every replication.
pub type RegistryFactory = Arc<dyn Fn() -> DecisionRegistry + Send + Sync>;

#[derive(Clone)]
pub struct SimulationRunner {
    rules: Arc<dyn RulesOracle>,
    matchup: Matchup,
    replications: u32,
    base_seed: u64,
    batch_size: u32,
    game_config: GameConfig,
    registry_factory: RegistryFactory,
    cancel: CancelFlag,
}

impl SimulationRunner {
    pub fn new(rules: Arc<dyn RulesOracle>, matchup: Matchup) -> Self {
        Self {
            rules,
            matchup,
            replications: 1,
            base_seed: 0,
            batch_size: RunnerConfig::default().batch_size,
            game_config: GameConfig::default(),
            registry_factory: Arc::new(DecisionRegistry::with_defaults),
            cancel: CancelFlag::new(),
        }
    }

    /// Runner for the league, seed and limits in `config`.
    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::new(config.league.rules(), config.league.matchup())
            .with_replications(config.replications)
            .with_base_seed(config.base_seed)
            .with_batch_size(config.batch_size)
            .with_game_config(config.game.clone())
    }

    #[must_use]
    pub fn with_replications(mut self, replications: u32) -> Self {
        self.replications = replications;
        self
    }

    #[must_use]
    pub fn with_base_seed(mut self, base_seed: u64) -> Self {
        self.base_seed = base_seed;
        self
    }

    #[must_use]
    pub fn with_batch_size(mut self, batch_size: u32) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub fn with_game_config(mut self, config: GameConfig) -> Self {
        self.game_config = config;
        self
    }

    #[must_use]
    pub fn with_registry_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> DecisionRegistry + Send + Sync + 'static,
    {
        self.registry_factory = Arc::new(factory);
        self
    }

    /// Shares `cancel` with every game this runner starts.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn replications(&self) -> u32 {
        self.replications
    }

    /// Seed replication `replication` runs with.
    pub fn seed_for(&self, replication: u32) -> u64 {
        derive_seed(self.base_seed, u64::from(replication))
    }

    /// Runs one replication on the calling thread.
    pub fn run_one(&self, replication: u32) -> GameRecord {
        let orchestrator = GameOrchestrator::new(
            Arc::clone(&self.rules),
            (self.registry_factory)(),
            self.game_config.clone(),
        );
        let setup = GameSetup::new(self.matchup.clone(), self.seed_for(replication));
        orchestrator.run_with_cancel(&setup, &self.cancel)
    }

    /// Runs every replication and feeds the records to `sink` in order.
    pub fn run(&self, sink: &mut dyn RecordSink) -> Result<RunSummary> {
        if self.replications == 0 {
            return Err(RuntimeError::NoReplications);
        }

        let mut summary = SummaryBuilder::default();
        let mut start = 0;
        while start < self.replications {
            let end = start.saturating_add(self.batch_size).min(self.replications);
            let records: Vec<GameRecord> = (start..end)
                .into_par_iter()
                .map(|replication| self.run_one(replication))
                .collect();

            for record in &records {
                sink.ingest(record)?;
                summary.add(record);
            }
            tracing::info!(
                league = self.rules.league(),
                from = start,
                to = end,
                aborted = summary.aborted,
                "batch finished"
            );
            start = end;
        }
        sink.flush()?;

        Ok(summary.finish())
    }

    /// Runs every replication and returns the records with their summary.
    pub fn run_collect(&self) -> Result<(Vec<GameRecord>, RunSummary)> {
        let mut sink = MemorySink::new();
        let summary = self.run(&mut sink)?;
        Ok((sink.into_records(), summary))
    }
}

/// Aggregate outcome of a batch of replications.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub games: u32,
    pub home_wins: u32,
    pub away_wins: u32,
    pub ties: u32,
    pub aborted: u32,
    pub avg_home_score: f64,
    pub avg_away_score: f64,
    pub avg_plays: f64,
    pub avg_drives: f64,
}

impl RunSummary {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a GameRecord>) -> Self {
        let mut builder = SummaryBuilder::default();
        for record in records {
            builder.add(record);
        }
        builder.finish()
    }

    pub fn completed(&self) -> u32 {
        self.games - self.aborted
    }
}

/// Running totals; averages are taken over completed games only.
#[derive(Default)]
struct SummaryBuilder {
    games: u32,
    home_wins: u32,
    away_wins: u32,
    ties: u32,
    aborted: u32,
    home_points: u64,
    away_points: u64,
    plays: u64,
    drives: u64,
}

impl SummaryBuilder {
    fn add(&mut self, record: &GameRecord) {
        self.games += 1;
        if !record.is_completed() {
            self.aborted += 1;
            return;
        }
        match record.winner() {
            Some(Side::Home) => self.home_wins += 1,
            Some(Side::Away) => self.away_wins += 1,
            None => self.ties += 1,
        }
        let score = record.final_score();
        self.home_points += u64::from(score.home);
        self.away_points += u64::from(score.away);
        self.plays += record.total_plays() as u64;
        self.drives += record.drives().len() as u64;
    }

    fn finish(self) -> RunSummary {
        let completed = self.games - self.aborted;
        let avg = |total: u64| {
            if completed == 0 {
                0.0
            } else {
                total as f64 / f64::from(completed)
            }
        };
        RunSummary {
            games: self.games,
            home_wins: self.home_wins,
            away_wins: self.away_wins,
            ties: self.ties,
            aborted: self.aborted,
            avg_home_score: avg(self.home_points),
            avg_away_score: avg(self.away_points),
            avg_plays: avg(self.plays),
            avg_drives: avg(self.drives),
        }
    }
}
