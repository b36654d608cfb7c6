use crate::execution::ExecutionDraft;
use crate::state::{GameFormat, Snapshot};
use crate::team::{Matchup, Side, Team};

/// Read-only view handed to every decision model.
#[derive(Clone, Copy, Debug)]
pub struct DecisionContext<'a> {
    pub snapshot: &'a Snapshot,
    pub matchup: &'a Matchup,
    /// Outputs already decided for the play being assembled.
    pub draft: &'a ExecutionDraft,
    /// Team the decision is asked of, for points that have one (kick/receive).
    pub side: Option<Side>,
}

impl<'a> DecisionContext<'a> {
    pub fn new(snapshot: &'a Snapshot, matchup: &'a Matchup, draft: &'a ExecutionDraft) -> Self {
        Self {
            snapshot,
            matchup,
            draft,
            side: None,
        }
    }

    #[must_use]
    pub fn for_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn format(&self) -> &GameFormat {
        &self.snapshot.format
    }

    pub fn offense(&self) -> &'a Team {
        self.matchup.team(self.snapshot.possession.offense)
    }

    pub fn defense(&self) -> &'a Team {
        self.matchup.team(self.snapshot.possession.defense())
    }

    /// Yards the offense needs for a touchdown.
    pub fn yards_to_goal(&self) -> u8 {
        self.format()
            .field_length
            .saturating_sub(self.snapshot.possession.ball_on)
    }
}
