//! Immutable records of a simulated game.
//!
//! Records are built bottom-up: a [`PlayRecord`] is finalized after the state
//! updater commits the play, a [`DriveRecord`] after the drive verdict, and the
//! [`GameRecord`] after the game verdict or an abort. Fields are private and
//! only the simulation can construct records, so a finalized record is never
//! modified.
//!
//! # Export shape
//!
//! With the `serde` feature the records serialize with snake_case field names
//! and externally tagged enums:
//!
//! ```text
//! { "schema_version": 1, "seed": 7, "league": "nfl",
//!   "opening": { "snapshot": {..}, "choices": {..}, "transition": {..}, "events": [..] },
//!   "drives": [ { "index": 0, "offense": "home", "start": {..},
//!                 "plays": [ { "index": 0, "period_start": null, "snapshot": {..},
//!                              "execution": { "kickoff": {..} }, "ruling": {..},
//!                              "events": [..], "delta": {..} } ],
//!                 "rejected": [], "end_reason": "punt", "end": {..} } ],
//!   "boundaries": [ { "before_drive": 11, "transition": {..} } ],
//!   "interrupted": [], "final_state": {..}, "final_score": { "home": 24, "away": 17 },
//!   "termination": { "completed": "regulation_expired" } }
//! ```

mod replay;

pub use replay::{ReplayError, replay};

use crate::decision::ModelError;
use crate::engine::GameEvent;
use crate::execution::ExecutionData;
use crate::rules::{DriveEndReason, GameEndReason, PlayRuling, RulesTransition, TossChoice};
use crate::sim::SimError;
use crate::state::{GameState, Scoreboard, Snapshot, StateDelta};
use crate::team::Side;

/// Current version of the exported record shape.
pub const SCHEMA_VERSION: u32 = 1;

// ============================================================================
// Plays
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayRecord {
    index: u32,
    period_start: Option<TransitionRecord>,
    snapshot: Snapshot,
    execution: ExecutionData,
    ruling: PlayRuling,
    events: Vec<GameEvent>,
    delta: StateDelta,
}

impl PlayRecord {
    pub(crate) fn new(
        index: u32,
        period_start: Option<TransitionRecord>,
        snapshot: Snapshot,
        execution: ExecutionData,
        ruling: PlayRuling,
        events: Vec<GameEvent>,
        delta: StateDelta,
    ) -> Self {
        Self {
            index,
            period_start,
            snapshot,
            execution,
            ruling,
            events,
            delta,
        }
    }

    /// Position of the play within its drive.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Quarter change applied immediately before this play's snapshot.
    pub fn period_start(&self) -> Option<&TransitionRecord> {
        self.period_start.as_ref()
    }

    /// State the play was decided on.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn execution(&self) -> &ExecutionData {
        &self.execution
    }

    pub fn ruling(&self) -> &PlayRuling {
        &self.ruling
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn delta(&self) -> &StateDelta {
        &self.delta
    }
}

/// A play attempt discarded under the retry policy. It never touched state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RejectedPlay {
    pub index: u32,
    pub attempt: u32,
    pub error: ModelError,
}

// ============================================================================
// Transitions and boundaries
// ============================================================================

/// Choices models made while resolving a toss or a boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryChoices {
    pub toss_winner: Option<Side>,
    pub chooser: Option<Side>,
    pub choice: Option<TossChoice>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionRecord {
    snapshot: Snapshot,
    choices: BoundaryChoices,
    transition: RulesTransition,
    events: Vec<GameEvent>,
}

impl TransitionRecord {
    pub(crate) fn new(
        snapshot: Snapshot,
        choices: BoundaryChoices,
        transition: RulesTransition,
        events: Vec<GameEvent>,
    ) -> Self {
        Self {
            snapshot,
            choices,
            transition,
            events,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn choices(&self) -> &BoundaryChoices {
        &self.choices
    }

    pub fn transition(&self) -> &RulesTransition {
        &self.transition
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

/// Halftime or overtime transition applied before drive `before_drive`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boundary {
    pub before_drive: u32,
    pub transition: TransitionRecord,
}

// ============================================================================
// Drives
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriveRecord {
    index: u32,
    offense: Side,
    start: Snapshot,
    plays: Vec<PlayRecord>,
    rejected: Vec<RejectedPlay>,
    end_reason: DriveEndReason,
    end: Snapshot,
}

impl DriveRecord {
    pub(crate) fn new(
        index: u32,
        offense: Side,
        start: Snapshot,
        plays: Vec<PlayRecord>,
        rejected: Vec<RejectedPlay>,
        end_reason: DriveEndReason,
        end: Snapshot,
    ) -> Self {
        Self {
            index,
            offense,
            start,
            plays,
            rejected,
            end_reason,
            end,
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn offense(&self) -> Side {
        self.offense
    }

    pub fn start(&self) -> &Snapshot {
        &self.start
    }

    pub fn plays(&self) -> &[PlayRecord] {
        &self.plays
    }

    pub fn rejected(&self) -> &[RejectedPlay] {
        &self.rejected
    }

    pub fn end_reason(&self) -> DriveEndReason {
        self.end_reason
    }

    pub fn end(&self) -> &Snapshot {
        &self.end
    }

    /// Game seconds the drive consumed, summed over its plays.
    pub fn seconds_elapsed(&self) -> u32 {
        self.plays.iter().map(|p| p.delta().seconds_run).sum()
    }

    pub fn points(&self, side: Side) -> u32 {
        self.plays.iter().map(|p| p.delta().points(side)).sum()
    }
}

// ============================================================================
// Games
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    Completed(GameEndReason),
    Aborted(SimError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameRecord {
    schema_version: u32,
    seed: u64,
    league: String,
    opening: Option<TransitionRecord>,
    drives: Vec<DriveRecord>,
    boundaries: Vec<Boundary>,
    /// Finalized plays of a drive that was cut short by an abort.
    interrupted: Vec<PlayRecord>,
    final_state: GameState,
    final_score: Scoreboard,
    termination: Termination,
}

/// Parts of a game record, assembled by the orchestrator.
pub(crate) struct GameRecordParts {
    pub seed: u64,
    pub league: String,
    pub opening: Option<TransitionRecord>,
    pub drives: Vec<DriveRecord>,
    pub boundaries: Vec<Boundary>,
    pub interrupted: Vec<PlayRecord>,
    pub final_state: GameState,
    pub termination: Termination,
}

impl GameRecord {
    pub(crate) fn new(parts: GameRecordParts) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed: parts.seed,
            league: parts.league,
            opening: parts.opening,
            drives: parts.drives,
            boundaries: parts.boundaries,
            interrupted: parts.interrupted,
            final_score: parts.final_state.scoreboard,
            final_state: parts.final_state,
            termination: parts.termination,
        }
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn league(&self) -> &str {
        &self.league
    }

    /// Opening toss and kickoff, absent only when the game aborted before it.
    pub fn opening(&self) -> Option<&TransitionRecord> {
        self.opening.as_ref()
    }

    pub fn drives(&self) -> &[DriveRecord] {
        &self.drives
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn interrupted(&self) -> &[PlayRecord] {
        &self.interrupted
    }

    pub fn final_state(&self) -> &GameState {
        &self.final_state
    }

    pub fn final_score(&self) -> Scoreboard {
        self.final_score
    }

    pub fn termination(&self) -> &Termination {
        &self.termination
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.termination, Termination::Completed(_))
    }

    pub fn end_reason(&self) -> Option<GameEndReason> {
        match self.termination {
            Termination::Completed(reason) => Some(reason),
            Termination::Aborted(_) => None,
        }
    }

    /// Winning side of a completed game; `None` for ties and aborted games.
    pub fn winner(&self) -> Option<Side> {
        if !self.is_completed() {
            return None;
        }
        self.final_score.leader()
    }

    /// Every finalized play, drives first, then any interrupted plays.
    pub fn play_records(&self) -> impl Iterator<Item = &PlayRecord> + '_ {
        self.drives
            .iter()
            .flat_map(|d| d.plays.iter())
            .chain(self.interrupted.iter())
    }

    pub fn total_plays(&self) -> usize {
        self.play_records().count()
    }

    /// Game seconds consumed across all finalized plays.
    pub fn seconds_played(&self) -> u32 {
        self.play_records().map(|p| p.delta().seconds_run).sum()
    }

    /// Converts an aborted record into an error that still carries it.
    pub fn into_result(self) -> Result<GameRecord, AbortedGame> {
        match &self.termination {
            Termination::Completed(_) => Ok(self),
            Termination::Aborted(error) => Err(AbortedGame {
                error: error.clone(),
                record: Box::new(self),
            }),
        }
    }

    /// SHA-256 over the bincode encoding of the record.
    ///
    /// Equal digests mean byte-identical records.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}

/// A game that stopped on an error, with everything finalized before it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("game aborted: {error}")]
pub struct AbortedGame {
    pub error: SimError,
    pub record: Box<GameRecord>,
}
