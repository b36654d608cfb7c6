//! State invariant errors.
//!
//! Raised by the [`StateUpdater`](crate::StateUpdater) when a caller tries to
//! mutate the state from a stale snapshot, or when an application would leave
//! the state outside its invariants. Always fatal to the game.

use crate::error::{ErrorSeverity, GameError};
use crate::execution::PlayKind;
use crate::team::Side;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateInvariantError {
    /// The snapshot was taken at a different revision than the live state.
    #[error("stale snapshot: taken at revision {snapshot}, state is at revision {state}")]
    StaleSnapshot {
        /// Revision recorded in the snapshot.
        snapshot: u64,
        /// Revision of the live state.
        state: u64,
    },

    /// Same revision, different contents: the state was modified outside the updater.
    #[error("snapshot does not match live state at revision {revision}")]
    SnapshotMismatch { revision: u64 },

    #[error("{executed} play executed while pending play is {pending:?}")]
    PendingMismatch {
        pending: Option<PlayKind>,
        executed: PlayKind,
    },

    #[error("ball on {ball_on} is outside a {field_length}-yard field")]
    BallOutOfBounds { ball_on: u8, field_length: u8 },

    #[error("down {down} outside 1..={max_downs}")]
    DownOutOfRange { down: u8, max_downs: u8 },

    #[error("distance to gain must be positive")]
    NonPositiveDistance,

    #[error("clock shows {seconds}s in quarter {quarter} (period length {period}s)")]
    ClockOutOfRange {
        quarter: u8,
        seconds: u32,
        period: u32,
    },

    /// Time went back up without a period start.
    #[error("clock moved backwards in quarter {quarter}: {before}s -> {after}s")]
    ClockReversed { quarter: u8, before: u32, after: u32 },

    #[error("{side} score decreased")]
    ScoreDecreased { side: Side },

    #[error("{side} has no timeouts left")]
    NoTimeoutsLeft { side: Side },
}

impl GameError for StateInvariantError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::StaleSnapshot { .. } => "STATE_STALE_SNAPSHOT",
            Self::SnapshotMismatch { .. } => "STATE_SNAPSHOT_MISMATCH",
            Self::PendingMismatch { .. } => "STATE_PENDING_MISMATCH",
            Self::BallOutOfBounds { .. } => "STATE_BALL_OUT_OF_BOUNDS",
            Self::DownOutOfRange { .. } => "STATE_DOWN_OUT_OF_RANGE",
            Self::NonPositiveDistance => "STATE_NON_POSITIVE_DISTANCE",
            Self::ClockOutOfRange { .. } => "STATE_CLOCK_OUT_OF_RANGE",
            Self::ClockReversed { .. } => "STATE_CLOCK_REVERSED",
            Self::ScoreDecreased { .. } => "STATE_SCORE_DECREASED",
            Self::NoTimeoutsLeft { .. } => "STATE_NO_TIMEOUTS_LEFT",
        }
    }
}
