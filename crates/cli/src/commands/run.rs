use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gridiron_runtime::{
    DiscardSink, JsonLinesSink, League, RecordSink, RunnerConfig, SimulationRunner,
};

/// Simulate a batch of replications
#[derive(Parser)]
pub struct Run {
    /// League rules (nfl, cfl)
    #[arg(long, value_parser = super::parse_league)]
    league: Option<League>,

    /// Number of games to simulate
    #[arg(short = 'n', long)]
    reps: Option<u32>,

    /// Base seed; replication i runs with a seed derived from it
    #[arg(long)]
    seed: Option<u64>,

    /// JSON-lines file for the finalized records (must not exist)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Append to an existing output file instead of refusing it
    #[arg(long, requires = "output")]
    append: bool,
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let config = self.config();
        tracing::info!(
            league = %config.league,
            replications = config.replications,
            seed = config.base_seed,
            "starting run"
        );

        let runner = SimulationRunner::from_config(&config);
        let mut sink: Box<dyn RecordSink> = match &config.output {
            Some(path) if self.append => Box::new(
                JsonLinesSink::open(path).with_context(|| format!("opening {}", path.display()))?,
            ),
            Some(path) => Box::new(
                JsonLinesSink::create(path)
                    .with_context(|| format!("creating {}", path.display()))?,
            ),
            None => Box::new(DiscardSink),
        };

        let summary = runner.run(sink.as_mut())?;
        if summary.aborted > 0 {
            tracing::warn!(aborted = summary.aborted, "some games did not complete");
        }
        println!("{}", serde_json::to_string_pretty(&summary)?);
        Ok(())
    }

    fn config(&self) -> RunnerConfig {
        let mut config = RunnerConfig::from_env();
        if let Some(league) = self.league {
            config.league = league;
        }
        if let Some(reps) = self.reps {
            config.replications = reps;
        }
        if let Some(seed) = self.seed {
            config.base_seed = seed;
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        config
    }
}
