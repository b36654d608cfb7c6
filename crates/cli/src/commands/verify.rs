use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use gridiron_core::replay;
use gridiron_runtime::{JsonLinesSink, RunSummary};

/// Replay every record in a JSON-lines file
#[derive(Parser)]
pub struct Verify {
    /// Record file written by `gridiron run --output`
    path: PathBuf,
}

impl Verify {
    pub fn execute(self) -> Result<()> {
        let records = JsonLinesSink::read_all(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;

        let mut failures = 0;
        for (line, record) in records.iter().enumerate() {
            match replay(record) {
                Ok(states) => {
                    tracing::debug!(line = line + 1, seed = record.seed(), states = states.len(), "replayed")
                }
                Err(err) => {
                    failures += 1;
                    tracing::error!(line = line + 1, seed = record.seed(), %err, "replay failed");
                }
            }
        }

        println!("{}", serde_json::to_string_pretty(&RunSummary::from_records(&records))?);
        if failures > 0 {
            bail!("{failures} of {} records failed to replay", records.len());
        }
        tracing::info!(records = records.len(), "all records replay");
        Ok(())
    }
}
