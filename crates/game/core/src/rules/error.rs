use crate::error::{ErrorSeverity, GameError};
use crate::team::Side;

use super::{PointAfterChoice, ScoringKind};

/// A rules oracle returned a decision that cannot be applied consistently.
///
/// Fatal to the current game: the engine stops and returns the records
/// finalized so far.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleViolation {
    #[error("{kind} is not in the scoring table")]
    ScoreNotInTable { kind: ScoringKind },

    #[error("{kind} awarded {awarded} points, scoring table says {table}")]
    ScoreValueMismatch {
        kind: ScoringKind,
        awarded: u8,
        table: u8,
    },

    #[error("point-after setup offers no attempt")]
    EmptyPointAfterSetup,

    #[error("point-after {choice} offers {offered} points, scoring table says {table}")]
    PointAfterValueMismatch {
        choice: PointAfterChoice,
        offered: u8,
        table: u8,
    },

    /// The ruling scored a point-after the setup never offered.
    #[error("impossible point-after outcome: {choice} was not offered")]
    PointAfterNotOffered { choice: PointAfterChoice },

    #[error("point-after scored on a failed {choice} attempt")]
    UnearnedPointAfter { choice: PointAfterChoice },

    #[error("{side} cannot kick off to itself")]
    KickoffToSelf { side: Side },

    #[error("ball placement {placement} is outside a {field_length}-yard field")]
    PlacementOutOfBounds { placement: u8, field_length: u8 },

    #[error("period start for quarter {quarter} with {seconds}s does not match the league format")]
    InvalidPeriod { quarter: u8, seconds: u32 },
}

impl GameError for RuleViolation {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ScoreNotInTable { .. } => "RULES_SCORE_NOT_IN_TABLE",
            Self::ScoreValueMismatch { .. } => "RULES_SCORE_VALUE_MISMATCH",
            Self::EmptyPointAfterSetup => "RULES_EMPTY_POINT_AFTER_SETUP",
            Self::PointAfterValueMismatch { .. } => "RULES_POINT_AFTER_VALUE_MISMATCH",
            Self::PointAfterNotOffered { .. } => "RULES_POINT_AFTER_NOT_OFFERED",
            Self::UnearnedPointAfter { .. } => "RULES_UNEARNED_POINT_AFTER",
            Self::KickoffToSelf { .. } => "RULES_KICKOFF_TO_SELF",
            Self::PlacementOutOfBounds { .. } => "RULES_PLACEMENT_OUT_OF_BOUNDS",
            Self::InvalidPeriod { .. } => "RULES_INVALID_PERIOD",
        }
    }
}
