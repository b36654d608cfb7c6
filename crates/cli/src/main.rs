//! `gridiron` command line: batch simulation, record inspection and replay checks.
//!
//! Settings come from `GRIDIRON_*` variables (and a `.env` file); flags override them.

mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Game, Run, Verify};

/// Deterministic football simulation
#[derive(Parser)]
#[command(name = "gridiron")]
#[command(about = "Deterministic American football simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Log directory (default: platform cache dir)
    #[arg(long, global = true)]
    log_dir: Option<std::path::PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Simulate a batch of replications and print their summary
    Run(Run),

    /// Simulate one game and print it drive by drive
    Game(Game),

    /// Replay every record in a JSON-lines file
    Verify(Verify),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = logging::init(cli.log_dir.as_deref(), cli.verbose)?;

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Game(cmd) => cmd.execute(),
        Command::Verify(cmd) => cmd.execute(),
    }
}
