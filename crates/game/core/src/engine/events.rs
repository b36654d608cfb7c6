use crate::rules::ScoringKind;
use crate::team::Side;

/// Facts derived by the updater while applying a play or transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameEvent {
    Score {
        side: Side,
        kind: ScoringKind,
        points: u8,
    },
    FirstDown {
        side: Side,
        ball_on: u8,
    },
    Turnover {
        lost_by: Side,
    },
    TurnoverOnDowns {
        lost_by: Side,
    },
    Punt {
        kicking: Side,
    },
    MissedFieldGoal {
        kicking: Side,
    },
    Touchback {
        receiving: Side,
    },
    KickoffReturned {
        receiving: Side,
        ball_on: u8,
    },
    TimeoutCharged {
        side: Side,
        remaining: u8,
    },
    QuarterEnded {
        quarter: u8,
    },
    QuarterStarted {
        quarter: u8,
    },
    TimeoutsReset,
    KickoffPending {
        kicking: Side,
    },
    PointAfterPending {
        side: Side,
    },
}

impl GameEvent {
    pub const fn is_score(&self) -> bool {
        matches!(self, Self::Score { .. })
    }
}
