//! Immutable decision objects returned by a [`RulesOracle`](super::RulesOracle).
//!
//! The oracle never touches state. It answers a query with one of these
//! values and the [`StateUpdater`](crate::StateUpdater) consumes it.

use crate::state::PendingPlay;
use crate::team::Side;

// ============================================================================
// Scoring
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ScoringKind {
    Touchdown,
    FieldGoal,
    Safety,
    ExtraPointKick,
    TwoPointConversion,
    /// Canadian rouge: a kick that dies in the end zone.
    Single,
}

/// Point value of every scoring play a league recognises.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoringTable {
    entries: Vec<(ScoringKind, u8)>,
}

impl ScoringTable {
    pub fn new(entries: impl IntoIterator<Item = (ScoringKind, u8)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn points(&self, kind: ScoringKind) -> Option<u8> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, points)| *points)
    }

    pub fn entries(&self) -> &[(ScoringKind, u8)] {
        &self.entries
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreAward {
    pub side: Side,
    pub kind: ScoringKind,
    pub points: u8,
}

// ============================================================================
// Kickoff / point after
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum KickType {
    Kickoff,
    /// Free kick by the team that conceded a safety.
    SafetyKick,
}

/// A kickoff the state must perform next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KickoffSetup {
    pub kicking: Side,
    pub receiving: Side,
    pub kick_type: KickType,
    /// Kicking spot, in yards from the kicking team's goal line.
    pub spot: u8,
    /// Where the receiving team starts after a touchback, from its own goal line.
    pub touchback_spot: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum PointAfterChoice {
    Kick,
    TwoPoint,
}

impl PointAfterChoice {
    pub const fn scoring_kind(self) -> ScoringKind {
        match self {
            Self::Kick => ScoringKind::ExtraPointKick,
            Self::TwoPoint => ScoringKind::TwoPointConversion,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointAfterOption {
    pub choice: PointAfterChoice,
    pub points: u8,
    /// Yards from the goal line the attempt is snapped at.
    pub distance: u8,
}

/// Point-after attempt owed by the team that just scored a touchdown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraPointSetup {
    pub scoring: Side,
    pub options: Vec<PointAfterOption>,
}

impl ExtraPointSetup {
    pub fn option(&self, choice: PointAfterChoice) -> Option<&PointAfterOption> {
        self.options.iter().find(|o| o.choice == choice)
    }
}

// ============================================================================
// Game start and period boundaries
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum TossChoice {
    Receive,
    /// Kick now, choose again at the next half.
    Defer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoinToss {
    pub winner: Side,
    pub choice: TossChoice,
}

impl CoinToss {
    /// Side that receives the kickoff this toss governs.
    pub const fn receiving(&self) -> Side {
        match self.choice {
            TossChoice::Receive => self.winner,
            TossChoice::Defer => self.winner.opponent(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameStart {
    /// Opening possession is decided by a coin toss and the winner's choice.
    CoinToss,
    Fixed(KickoffSetup),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeriodStart {
    pub quarter: u8,
    pub seconds: u32,
}

/// State change required between plays or drives.
///
/// Applied through [`StateUpdater::apply_transition`](crate::StateUpdater::apply_transition).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RulesTransition {
    pub period: Option<PeriodStart>,
    pub kickoff: Option<KickoffSetup>,
    pub reset_timeouts: bool,
    pub toss: Option<CoinToss>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BoundaryKind {
    Halftime,
    Overtime,
}

/// Who makes the kick/receive choice at a boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Chooser {
    /// No choice; `default_kicking` kicks.
    Nobody,
    Side(Side),
    /// A fresh coin toss decides who chooses.
    CoinToss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryRuling {
    pub kind: BoundaryKind,
    pub period: PeriodStart,
    pub chooser: Chooser,
    pub default_kicking: Side,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OvertimeRule {
    None,
    /// First score wins; a scoreless period ends in a tie.
    SuddenDeath { period_seconds: u32 },
}

// ============================================================================
// Play adjudication
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum PossessionChange {
    Turnover,
    Punt,
    MissedFieldGoal,
    Downs,
    Kickoff,
}

/// Rules consequences of one play, computed before any mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayRuling {
    pub award: Option<ScoreAward>,
    pub change: Option<PossessionChange>,
    /// Ball spot for the team in possession after the play, overriding yardage arithmetic.
    pub placement: Option<u8>,
    pub touchback: bool,
    /// Untimed play the state owes next (kickoff, point after).
    pub follow_up: Option<PendingPlay>,
}

// ============================================================================
// Verdicts
// ============================================================================

/// Why a drive ended.
///
/// Declaration order is precedence order: when several conditions hold after
/// the same play, the smallest variant is the drive's reason.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DriveEndReason {
    Score,
    Turnover,
    Punt,
    MissedFieldGoal,
    ClockExpiry,
    #[strum(serialize = "turnover_on_downs")]
    #[cfg_attr(feature = "serde", serde(rename = "turnover_on_downs"))]
    DownsExhausted,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DriveVerdict {
    Continue,
    Ended { reasons: Vec<DriveEndReason> },
}

impl DriveVerdict {
    /// Highest-precedence reason, or `None` while the drive continues.
    pub fn resolved(&self) -> Option<DriveEndReason> {
        match self {
            Self::Continue => None,
            Self::Ended { reasons } => reasons.iter().min().copied(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum GameEndReason {
    RegulationExpired,
    OvertimeScore,
    OvertimeExpired,
    Tie,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameVerdict {
    Continue,
    Over(GameEndReason),
}

impl GameVerdict {
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::Over(_))
    }
}
