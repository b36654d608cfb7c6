use crate::error::{ErrorSeverity, GameError};

use super::DecisionPoint;

/// Registry misconfiguration. Fatal for the game that hits it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    #[error("no model registered for decision point {point}")]
    MissingModel { point: DecisionPoint },

    #[error("decision point {point} is already bound")]
    Conflict { point: DecisionPoint },

    #[error("model bound to {point} has the wrong output type")]
    KindMismatch { point: DecisionPoint },
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingModel { .. } => "REGISTRY_MISSING_MODEL",
            Self::Conflict { .. } => "REGISTRY_CONFLICT",
            Self::KindMismatch { .. } => "REGISTRY_KIND_MISMATCH",
        }
    }
}

/// A model produced output that violates its decision point's contract.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("model for {point} returned an invalid output: {reason}")]
pub struct ModelError {
    pub point: DecisionPoint,
    pub reason: String,
}

impl ModelError {
    pub fn new(point: DecisionPoint, reason: impl Into<String>) -> Self {
        Self {
            point,
            reason: reason.into(),
        }
    }
}

impl GameError for ModelError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "MODEL_CONTRACT_VIOLATION"
    }
}
