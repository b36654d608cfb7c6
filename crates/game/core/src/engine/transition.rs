//! Phased application of plays and rules transitions.

use crate::execution::{ExecutionData, PlayKind};
use crate::rules::{PlayRuling, PossessionChange, RulesTransition};
use crate::state::{GameState, PendingPlay, Snapshot, StateInvariantError};
use crate::team::{PlayType, Side};

use super::errors::{TransitionPhase, TransitionPhaseError};
use super::reducer::StateReducer;
use super::GameEvent;

/// One state mutation split into the three pipeline phases.
pub(super) trait Transition {
    fn pre_validate(&self, state: &GameState) -> Result<(), StateInvariantError>;

    fn apply(&self, state: &mut GameState) -> Result<Vec<GameEvent>, StateInvariantError>;

    fn post_validate(&self, before: &GameState, after: &GameState)
    -> Result<(), StateInvariantError>;
}

/// Runs `transition` against a staged copy of `state`.
///
/// The staged copy is committed, with the revision bumped, only when every
/// phase succeeds.
pub(super) fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
) -> Result<Vec<GameEvent>, TransitionPhaseError<StateInvariantError>>
where
    T: Transition,
{
    transition
        .pre_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let mut staged = state.clone();
    let events = transition
        .apply(&mut staged)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, &staged)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    staged.revision = state.revision + 1;
    *state = staged;
    Ok(events)
}

fn check_snapshot(snapshot: &Snapshot, state: &GameState) -> Result<(), StateInvariantError> {
    if snapshot.revision() != state.revision {
        return Err(StateInvariantError::StaleSnapshot {
            snapshot: snapshot.revision(),
            state: state.revision,
        });
    }
    if snapshot.state() != state {
        return Err(StateInvariantError::SnapshotMismatch {
            revision: state.revision,
        });
    }
    Ok(())
}

fn check_progress(
    before: &GameState,
    after: &GameState,
    period_started: bool,
) -> Result<(), StateInvariantError> {
    after.check_invariants()?;

    if !period_started
        && before.clock.quarter == after.clock.quarter
        && after.clock.seconds_remaining > before.clock.seconds_remaining
    {
        return Err(StateInvariantError::ClockReversed {
            quarter: after.clock.quarter,
            before: before.clock.seconds_remaining,
            after: after.clock.seconds_remaining,
        });
    }
    if after.clock.quarter < before.clock.quarter {
        return Err(StateInvariantError::ClockReversed {
            quarter: after.clock.quarter,
            before: before.clock.seconds_remaining,
            after: after.clock.seconds_remaining,
        });
    }

    for side in [Side::Home, Side::Away] {
        if after.scoreboard.points(side) < before.scoreboard.points(side) {
            return Err(StateInvariantError::ScoreDecreased { side });
        }
    }
    Ok(())
}

// ============================================================================
// Plays
// ============================================================================

pub(super) struct PlayApplication<'a> {
    pub snapshot: &'a Snapshot,
    pub execution: &'a ExecutionData,
    pub ruling: &'a PlayRuling,
}

impl PlayApplication<'_> {
    fn stops_clock(&self) -> bool {
        let ruling = self.ruling;
        if ruling.award.is_some() || ruling.change.is_some() || ruling.follow_up.is_some() {
            return true;
        }
        match self.execution {
            ExecutionData::Scrimmage(play) => {
                play.timeout.is_some()
                    || play.outcome.penalty
                    || play.outcome.completed == Some(false)
                    || play.offense_call.play_type.is_kick()
            }
            ExecutionData::Kickoff(_) | ExecutionData::PointAfter(_) => true,
        }
    }

    /// Offense's yard line where the play ended, before any clamping.
    fn end_spot(&self, state: &GameState) -> i32 {
        let yards = match self.execution {
            ExecutionData::Scrimmage(play) => play.outcome.yards,
            ExecutionData::Kickoff(_) | ExecutionData::PointAfter(_) => 0,
        };
        i32::from(state.possession.ball_on) + i32::from(yards)
    }
}

impl Transition for PlayApplication<'_> {
    fn pre_validate(&self, state: &GameState) -> Result<(), StateInvariantError> {
        check_snapshot(self.snapshot, state)?;

        let executed = self.execution.kind();
        let expected = state.pending_kind().unwrap_or(PlayKind::Scrimmage);
        if executed != expected {
            return Err(StateInvariantError::PendingMismatch {
                pending: state.pending_kind(),
                executed,
            });
        }

        if let ExecutionData::Scrimmage(play) = self.execution {
            if let Some(side) = play.timeout {
                if state.timeouts.remaining(side) == 0 {
                    return Err(StateInvariantError::NoTimeoutsLeft { side });
                }
            }
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState) -> Result<Vec<GameEvent>, StateInvariantError> {
        let end_spot = self.end_spot(state);
        let stops_clock = self.stops_clock();
        let ruling = self.ruling;
        let mut reducer = StateReducer::new(state);

        if let ExecutionData::Scrimmage(play) = self.execution {
            if let Some(side) = play.timeout {
                reducer.timeouts().charge(side)?;
            }
        }

        reducer.clock().run(self.execution.seconds_requested());

        if let Some(award) = &ruling.award {
            reducer.scoreboard().award(award);
        }

        reducer.take_pending();
        let losing = reducer.state().possession.offense;

        if let Some(change) = ruling.change {
            let event = match change {
                PossessionChange::Turnover => Some(GameEvent::Turnover { lost_by: losing }),
                PossessionChange::Downs => Some(GameEvent::TurnoverOnDowns { lost_by: losing }),
                PossessionChange::Punt => Some(GameEvent::Punt { kicking: losing }),
                PossessionChange::MissedFieldGoal => {
                    Some(GameEvent::MissedFieldGoal { kicking: losing })
                }
                PossessionChange::Kickoff => None,
            };
            if let Some(event) = event {
                reducer.emit(event);
            }
        }

        if let Some(follow_up) = ruling.follow_up.clone() {
            reducer.install_pending(follow_up);
        } else if let Some(change) = ruling.change {
            match ruling.placement {
                Some(spot) => {
                    let receiving = losing.opponent();
                    reducer.possession().line_up(receiving, spot, None);
                }
                None => reducer.possession().flip_at(end_spot),
            }
            if change == PossessionChange::Kickoff && !ruling.touchback {
                let possession = reducer.state().possession;
                reducer.emit(GameEvent::KickoffReturned {
                    receiving: possession.offense,
                    ball_on: possession.ball_on,
                });
            }
        } else if let ExecutionData::Scrimmage(play) = self.execution {
            if play.offense_call.play_type != PlayType::FieldGoal {
                reducer.possession().advance(play.outcome.yards);
            }
        }

        if ruling.touchback {
            let receiving = losing.opponent();
            reducer.emit(GameEvent::Touchback { receiving });
        }

        reducer.clock().set_running(!stops_clock);
        Ok(reducer.into_events())
    }

    fn post_validate(
        &self,
        before: &GameState,
        after: &GameState,
    ) -> Result<(), StateInvariantError> {
        check_progress(before, after, false)
    }
}

// ============================================================================
// Rules transitions
// ============================================================================

pub(super) struct RulesApplication<'a> {
    pub snapshot: &'a Snapshot,
    pub transition: &'a RulesTransition,
}

impl Transition for RulesApplication<'_> {
    fn pre_validate(&self, state: &GameState) -> Result<(), StateInvariantError> {
        check_snapshot(self.snapshot, state)
    }

    fn apply(&self, state: &mut GameState) -> Result<Vec<GameEvent>, StateInvariantError> {
        let transition = self.transition;
        let mut reducer = StateReducer::new(state);

        if let Some(period) = transition.period {
            reducer.clock().start_period(period.quarter);
        }
        if transition.reset_timeouts {
            reducer.timeouts().reset();
        }
        if let Some(kickoff) = transition.kickoff {
            reducer.install_pending(PendingPlay::Kickoff(kickoff));
        }
        if let Some(toss) = transition.toss {
            reducer.set_toss(toss);
        }
        Ok(reducer.into_events())
    }

    fn post_validate(
        &self,
        before: &GameState,
        after: &GameState,
    ) -> Result<(), StateInvariantError> {
        check_progress(before, after, self.transition.period.is_some())
    }
}
