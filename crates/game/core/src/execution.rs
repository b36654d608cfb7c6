//! Raw decision outputs for one play.
//!
//! [`ExecutionDraft`] accumulates outputs while the play step queries models;
//! models see the draft so later decisions can depend on earlier ones.
//! [`ExecutionData`] is the finished payload handed to the rules oracle and
//! the state updater.

use crate::rules::{ExtraPointSetup, KickoffSetup, PointAfterChoice};
use crate::team::{Assignment, PlayCall, Side};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum PlayKind {
    Scrimmage,
    Kickoff,
    PointAfter,
}

/// Result of a scrimmage snap as reported by the outcome model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayOutcome {
    /// Net yards from the line of scrimmage. For punts: net punt yards.
    pub yards: i16,
    /// Set for passes only.
    pub completed: Option<bool>,
    /// Defense gains possession at the end spot.
    pub turnover: bool,
    /// Accepted penalty; the yardage is already folded into `yards`.
    pub penalty: bool,
    /// Set for field goal attempts only.
    pub field_goal_good: Option<bool>,
}

impl PlayOutcome {
    pub const fn gain(yards: i16) -> Self {
        Self {
            yards,
            completed: None,
            turnover: false,
            penalty: false,
            field_goal_good: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KickoffResult {
    /// Air distance from the kicking spot.
    pub distance: u8,
    /// Receiver downs the ball in the end zone.
    pub touchback: bool,
    /// Return yards measured from where the ball was caught.
    pub return_yards: i16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrimmageExecution {
    /// Seconds run off between the previous play and the snap.
    pub runoff: u32,
    pub timeout: Option<Side>,
    pub offense_call: PlayCall,
    pub defense_call: PlayCall,
    pub offense_personnel: Assignment,
    pub defense_personnel: Assignment,
    pub outcome: PlayOutcome,
    pub elapsed: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KickoffExecution {
    pub setup: KickoffSetup,
    pub result: KickoffResult,
    pub elapsed: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointAfterExecution {
    pub setup: ExtraPointSetup,
    pub choice: PointAfterChoice,
    pub good: bool,
}

/// Everything the models decided for one play.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExecutionData {
    Scrimmage(ScrimmageExecution),
    Kickoff(KickoffExecution),
    PointAfter(PointAfterExecution),
}

impl ExecutionData {
    pub const fn kind(&self) -> PlayKind {
        match self {
            Self::Scrimmage(_) => PlayKind::Scrimmage,
            Self::Kickoff(_) => PlayKind::Kickoff,
            Self::PointAfter(_) => PlayKind::PointAfter,
        }
    }

    /// Game time the play asks for: pre-snap runoff plus play time.
    pub fn seconds_requested(&self) -> u32 {
        match self {
            Self::Scrimmage(s) => s.runoff + s.elapsed,
            Self::Kickoff(k) => k.elapsed,
            Self::PointAfter(_) => 0,
        }
    }
}

/// Partial [`ExecutionData`] visible to models while a play is being assembled.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionDraft {
    pub kickoff: Option<KickoffSetup>,
    pub point_after: Option<ExtraPointSetup>,
    pub timeout: Option<Side>,
    pub runoff: Option<u32>,
    pub offense_call: Option<PlayCall>,
    pub defense_call: Option<PlayCall>,
    pub offense_personnel: Option<Assignment>,
    pub defense_personnel: Option<Assignment>,
    pub outcome: Option<PlayOutcome>,
    pub kickoff_result: Option<KickoffResult>,
    pub point_after_choice: Option<PointAfterChoice>,
}

impl ExecutionDraft {
    pub fn kind(&self) -> PlayKind {
        if self.kickoff.is_some() {
            PlayKind::Kickoff
        } else if self.point_after.is_some() {
            PlayKind::PointAfter
        } else {
            PlayKind::Scrimmage
        }
    }
}
