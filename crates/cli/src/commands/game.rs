use anyhow::{Result, bail};
use clap::Parser;
use gridiron_core::{GameOrchestrator, GameRecord, GameSetup, Side, Termination};
use gridiron_runtime::{League, RunnerConfig};

/// Simulate one game and print it
#[derive(Parser)]
pub struct Game {
    /// League rules (nfl, cfl)
    #[arg(long, value_parser = super::parse_league)]
    league: Option<League>,

    /// Game seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print the full record as JSON instead of the drive chart
    #[arg(long)]
    json: bool,
}

impl Game {
    pub fn execute(self) -> Result<()> {
        let mut config = RunnerConfig::from_env();
        if let Some(league) = self.league {
            config.league = league;
        }

        let orchestrator = GameOrchestrator::new(
            config.league.rules(),
            gridiron_core::DecisionRegistry::with_defaults(),
            config.game.clone(),
        );
        let record = orchestrator.run(&GameSetup::new(config.league.matchup(), self.seed));

        if self.json {
            println!("{}", serde_json::to_string_pretty(&record)?);
        } else {
            print_drive_chart(&record);
        }

        if let Termination::Aborted(err) = record.termination() {
            bail!("game aborted: {err}");
        }
        Ok(())
    }
}

fn print_drive_chart(record: &GameRecord) {
    println!("{} game, seed {}", record.league(), record.seed());
    for drive in record.drives() {
        let start = drive.start().state();
        println!(
            "{:>3}  Q{} {:>5}  {:<4}  {:>2} plays  {:<18}  {:>3}-{:<3}",
            drive.index(),
            start.clock.quarter,
            clock(start.clock.seconds_remaining),
            side(drive.offense()),
            drive.plays().len(),
            drive.end_reason(),
            drive.end().state().scoreboard.home,
            drive.end().state().scoreboard.away,
        );
    }

    let score = record.final_score();
    match record.termination() {
        Termination::Completed(reason) => {
            println!("final: home {} away {} ({reason})", score.home, score.away)
        }
        Termination::Aborted(_) => {
            println!("stopped at: home {} away {}", score.home, score.away)
        }
    }
    if let Ok(digest) = record.digest() {
        println!("digest: {}", hex::encode(digest));
    }
}

fn side(side: Side) -> &'static str {
    match side {
        Side::Home => "HOME",
        Side::Away => "AWAY",
    }
}

fn clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
