/// What a drive does when a decision model violates its output contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelErrorPolicy {
    /// Stop the game and surface the partial record chain.
    Abort,
    /// Discard the attempt and run the play again with fresh draws.
    ///
    /// `max_attempts` counts every attempt including the first one.
    Retry { max_attempts: u32 },
}

/// Engine limits and error policy for a single game.
///
/// League constants (quarter length, downs, field size) are not configured
/// here; they come from the rules oracle as a [`GameFormat`](crate::GameFormat).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Upper bound on plays in one drive before the game is declared stalled.
    pub max_plays_per_drive: u32,
    /// Upper bound on drives in one game before the game is declared stalled.
    pub max_drives: u32,
    pub on_model_error: ModelErrorPolicy,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_PLAYS_PER_DRIVE: u32 = 50;
    pub const DEFAULT_MAX_DRIVES: u32 = 80;
    pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

    pub fn new() -> Self {
        Self {
            max_plays_per_drive: Self::DEFAULT_MAX_PLAYS_PER_DRIVE,
            max_drives: Self::DEFAULT_MAX_DRIVES,
            on_model_error: ModelErrorPolicy::Abort,
        }
    }

    #[must_use]
    pub fn with_max_plays_per_drive(mut self, max_plays_per_drive: u32) -> Self {
        self.max_plays_per_drive = max_plays_per_drive;
        self
    }

    #[must_use]
    pub fn with_max_drives(mut self, max_drives: u32) -> Self {
        self.max_drives = max_drives;
        self
    }

    #[must_use]
    pub fn with_model_error_policy(mut self, policy: ModelErrorPolicy) -> Self {
        self.on_model_error = policy;
        self
    }

    /// Shorthand for `Retry` with the default attempt budget.
    #[must_use]
    pub fn retrying(self) -> Self {
        self.with_model_error_policy(ModelErrorPolicy::Retry {
            max_attempts: Self::DEFAULT_RETRY_ATTEMPTS,
        })
    }

    /// Number of attempts a single play gets under the configured policy.
    pub fn attempts_per_play(&self) -> u32 {
        match self.on_model_error {
            ModelErrorPolicy::Abort => 1,
            ModelErrorPolicy::Retry { max_attempts } => max_attempts.max(1),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
