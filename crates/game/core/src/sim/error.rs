use crate::decision::{DecideError, ModelError, RegistryError};
use crate::engine::ApplyError;
use crate::error::{ErrorSeverity, GameError};
use crate::rules::RuleViolation;

/// Reason a game stopped before its rules said it was over.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SimError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("rules oracle returned an inconsistent decision: {0}")]
    Rule(#[from] RuleViolation),

    #[error("state update rejected: {0}")]
    State(#[from] ApplyError),

    #[error("simulation cancelled")]
    Cancelled,

    #[error("drive exceeded {max_plays} plays")]
    DriveStalled { max_plays: u32 },

    #[error("game exceeded {max_drives} drives")]
    GameStalled { max_drives: u32 },
}

impl From<DecideError> for SimError {
    fn from(err: DecideError) -> Self {
        match err {
            DecideError::Registry(e) => Self::Registry(e),
            DecideError::Model(e) => Self::Model(e),
        }
    }
}

impl GameError for SimError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Model(e) => e.severity(),
            Self::Registry(e) => e.severity(),
            Self::Rule(e) => e.severity(),
            Self::State(e) => e.severity(),
            Self::Cancelled => ErrorSeverity::Recoverable,
            Self::DriveStalled { .. } | Self::GameStalled { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Model(e) => e.error_code(),
            Self::Registry(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::State(e) => e.error_code(),
            Self::Cancelled => "SIM_CANCELLED",
            Self::DriveStalled { .. } => "SIM_DRIVE_STALLED",
            Self::GameStalled { .. } => "SIM_GAME_STALLED",
        }
    }
}
