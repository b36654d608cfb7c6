//! Runner configuration loaded from `GRIDIRON_*` environment variables.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use gridiron_core::{CflRules, GameConfig, Matchup, ModelErrorPolicy, NflRules, RulesOracle};

/// League rule sets the runner can load by name.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum League {
    #[default]
    Nfl,
    Cfl,
}

impl League {
    pub fn rules(&self) -> Arc<dyn RulesOracle> {
        match self {
            League::Nfl => Arc::new(NflRules::new()),
            League::Cfl => Arc::new(CflRules::new()),
        }
    }

    /// Two stock teams sized for the league's field.
    pub fn matchup(&self) -> Matchup {
        Matchup::standard(self.rules().format().players_on_field)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunnerConfig {
    pub replications: u32,
    pub base_seed: u64,
    pub league: League,
    /// JSON-lines file receiving every finalized record, if any.
    pub output: Option<PathBuf>,
    /// Replications simulated in parallel before their records are ingested.
    pub batch_size: u32,
    pub game: GameConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            replications: 1,
            base_seed: 0,
            league: League::default(),
            output: None,
            batch_size: 64,
            game: GameConfig::default(),
        }
    }
}

impl RunnerConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    ///
    /// Recognised variables:
    /// - `GRIDIRON_REPLICATIONS` - number of games (default: 1)
    /// - `GRIDIRON_SEED` - base seed (default: 0)
    /// - `GRIDIRON_LEAGUE` - `nfl` or `cfl` (default: nfl)
    /// - `GRIDIRON_OUTPUT` - JSON-lines record file
    /// - `GRIDIRON_BATCH_SIZE` - parallel batch size (default: 64)
    /// - `GRIDIRON_MAX_DRIVES` - drive cap per game
    /// - `GRIDIRON_MAX_PLAYS_PER_DRIVE` - play cap per drive
    /// - `GRIDIRON_RETRY_ATTEMPTS` - retry plays on model errors with this many attempts
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(replications) = read_env::<u32>("GRIDIRON_REPLICATIONS") {
            config.replications = replications.max(1);
        }
        if let Some(seed) = read_env::<u64>("GRIDIRON_SEED") {
            config.base_seed = seed;
        }
        if let Some(league) = read_env::<League>("GRIDIRON_LEAGUE") {
            config.league = league;
        }
        if let Some(output) = env::var_os("GRIDIRON_OUTPUT") {
            config.output = Some(PathBuf::from(output));
        }
        if let Some(batch) = read_env::<u32>("GRIDIRON_BATCH_SIZE") {
            config.batch_size = batch.max(1);
        }

        if let Some(max_drives) = read_env::<u32>("GRIDIRON_MAX_DRIVES") {
            config.game = config.game.with_max_drives(max_drives.max(1));
        }
        if let Some(max_plays) = read_env::<u32>("GRIDIRON_MAX_PLAYS_PER_DRIVE") {
            config.game = config.game.with_max_plays_per_drive(max_plays.max(1));
        }
        if let Some(attempts) = read_env::<u32>("GRIDIRON_RETRY_ATTEMPTS") {
            config.game = config.game.with_model_error_policy(ModelErrorPolicy::Retry {
                max_attempts: attempts.max(1),
            });
        }

        config
    }
}

/// Platform cache directory for log files.
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "gridiron")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("/tmp/gridiron/logs"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    parse_env(key, env::var(key).ok()?)
}

/// Parses `raw`, warning instead of failing so a typo falls back to the default.
fn parse_env<T>(key: &str, raw: String) -> Option<T>
where
    T: std::str::FromStr,
{
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring malformed environment variable");
            None
        }
    }
}
