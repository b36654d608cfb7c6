//! Error types for the state application pipeline.

use crate::error::{ErrorSeverity, GameError};
use crate::state::StateInvariantError;

/// Identifies which stage of the application pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a pipeline phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while applying a play or a rules transition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ApplyError {
    #[error("play application failed: {0}")]
    Play(TransitionPhaseError<StateInvariantError>),

    #[error("rules transition failed: {0}")]
    Transition(TransitionPhaseError<StateInvariantError>),
}

impl ApplyError {
    pub fn phase(&self) -> TransitionPhase {
        match self {
            Self::Play(e) | Self::Transition(e) => e.phase,
        }
    }

    pub fn invariant(&self) -> &StateInvariantError {
        match self {
            Self::Play(e) | Self::Transition(e) => &e.error,
        }
    }
}

impl GameError for ApplyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        self.invariant().error_code()
    }
}
