//! Play Step: one snap, kickoff or point-after attempt.

use crate::decision::kinds;
use crate::engine::StateUpdater;
use crate::execution::{
    ExecutionData, ExecutionDraft, KickoffExecution, PointAfterExecution, ScrimmageExecution,
};
use crate::record::{BoundaryChoices, PlayRecord, TransitionRecord};
use crate::rng::SimRng;
use crate::rules::{check_play_ruling, check_transition};
use crate::state::{GameState, PendingPlay, Snapshot, StateDelta};

use super::{SimEnv, SimError};

/// Applies the quarter change owed before the next snap, if any.
///
/// Runs once per play, before any decision is requested, so a retried play
/// never applies it twice. The record travels with the play; when the play
/// fails for good the caller restores the state captured in
/// [`TransitionRecord::snapshot`].
pub fn period_start(
    state: &mut GameState,
    env: &SimEnv<'_>,
) -> Result<Option<TransitionRecord>, SimError> {
    let snapshot = Snapshot::capture(state);
    let Some(transition) = env.rules.period_start(&snapshot) else {
        return Ok(None);
    };
    check_transition(&transition, env.rules.scoring_table(), &snapshot.format)?;
    let events = StateUpdater::new(state).apply_transition(&snapshot, &transition)?;
    tracing::debug!(quarter = state.clock.quarter, "quarter started");
    Ok(Some(TransitionRecord::new(
        snapshot,
        BoundaryChoices::default(),
        transition,
        events,
    )))
}

/// Runs one play against `state` and returns its finalized record.
///
/// `period_start` is the record of a quarter change already applied for this
/// play by [`period_start`]. On error the state is exactly as it was on entry.
pub fn execute(
    state: &mut GameState,
    env: &SimEnv<'_>,
    rng: &mut SimRng,
    index: u32,
    period_start: Option<TransitionRecord>,
) -> Result<PlayRecord, SimError> {
    let snapshot = Snapshot::capture(state);
    let execution = gather(&snapshot, env, rng)?;

    let ruling = env.rules.adjudicate(&snapshot, &execution);
    check_play_ruling(
        &ruling,
        &execution,
        env.rules.scoring_table(),
        &snapshot.format,
    )?;

    let events = StateUpdater::new(state).apply_play(&snapshot, &execution, &ruling)?;
    let delta = StateDelta::from_states(snapshot.state(), state);
    tracing::trace!(
        index,
        kind = %execution.kind(),
        seconds = delta.seconds_run,
        events = events.len(),
        "play applied"
    );

    Ok(PlayRecord::new(
        index,
        period_start,
        snapshot,
        execution,
        ruling,
        events,
        delta,
    ))
}

fn gather(
    snapshot: &Snapshot,
    env: &SimEnv<'_>,
    rng: &mut SimRng,
) -> Result<ExecutionData, SimError> {
    match &snapshot.pending {
        None => scrimmage(snapshot, env, rng).map(ExecutionData::Scrimmage),
        Some(PendingPlay::Kickoff(setup)) => {
            let draft = ExecutionDraft {
                kickoff: Some(*setup),
                ..ExecutionDraft::default()
            };
            let result = env.decide::<kinds::KickoffResult>(snapshot, &draft, None, rng)?;
            let draft = ExecutionDraft {
                kickoff_result: Some(result),
                ..draft
            };
            let elapsed = if result.touchback {
                0
            } else {
                env.decide::<kinds::PlayClock>(snapshot, &draft, None, rng)?
            };
            Ok(ExecutionData::Kickoff(KickoffExecution {
                setup: *setup,
                result,
                elapsed,
            }))
        }
        Some(PendingPlay::PointAfter(setup)) => {
            let mut draft = ExecutionDraft {
                point_after: Some(setup.clone()),
                ..ExecutionDraft::default()
            };
            let choice = env.decide::<kinds::PointAfterChoice>(snapshot, &draft, None, rng)?;
            draft.point_after_choice = Some(choice);
            let good = env.decide::<kinds::PointAfterResult>(snapshot, &draft, None, rng)?;
            Ok(ExecutionData::PointAfter(PointAfterExecution {
                setup: setup.clone(),
                choice,
                good,
            }))
        }
    }
}

fn scrimmage(
    snapshot: &Snapshot,
    env: &SimEnv<'_>,
    rng: &mut SimRng,
) -> Result<ScrimmageExecution, SimError> {
    let mut draft = ExecutionDraft::default();

    if snapshot.clock.running {
        let timeout = env.decide::<kinds::TimeoutCall>(snapshot, &draft, None, rng)?;
        draft.timeout = timeout;
        let runoff = match timeout {
            Some(_) => 0,
            None => env.decide::<kinds::PreSnapRunoff>(snapshot, &draft, None, rng)?,
        };
        draft.runoff = Some(runoff);
    }

    let offense_call = env.decide::<kinds::OffensivePlayCall>(snapshot, &draft, None, rng)?;
    draft.offense_call = Some(offense_call.clone());
    let defense_call = env.decide::<kinds::DefensivePlayCall>(snapshot, &draft, None, rng)?;
    draft.defense_call = Some(defense_call.clone());

    let offense_personnel =
        env.decide::<kinds::OffensivePersonnel>(snapshot, &draft, None, rng)?;
    draft.offense_personnel = Some(offense_personnel.clone());
    let defense_personnel =
        env.decide::<kinds::DefensivePersonnel>(snapshot, &draft, None, rng)?;
    draft.defense_personnel = Some(defense_personnel.clone());

    let outcome = env.decide::<kinds::ScrimmageOutcome>(snapshot, &draft, None, rng)?;
    draft.outcome = Some(outcome);
    let elapsed = env.decide::<kinds::PlayClock>(snapshot, &draft, None, rng)?;

    Ok(ScrimmageExecution {
        runoff: draft.runoff.unwrap_or(0),
        timeout: draft.timeout,
        offense_call,
        defense_call,
        offense_personnel,
        defense_personnel,
        outcome,
        elapsed,
    })
}
