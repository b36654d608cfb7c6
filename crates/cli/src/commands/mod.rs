mod game;
mod run;
mod verify;

pub use game::Game;
pub use run::Run;
pub use verify::Verify;

use gridiron_runtime::League;

/// clap parser for league names (`nfl`, `cfl`).
pub(crate) fn parse_league(value: &str) -> Result<League, String> {
    value
        .parse()
        .map_err(|_| format!("unknown league '{value}' (expected nfl or cfl)"))
}
