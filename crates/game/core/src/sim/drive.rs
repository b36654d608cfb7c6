//! Drive Step: plays until the rules oracle ends the possession.

use crate::config::ModelErrorPolicy;
use crate::engine::GameEvent;
use crate::record::{DriveRecord, PlayRecord, RejectedPlay};
use crate::rng::SimRng;
use crate::rules::DriveVerdict;
use crate::state::{GameState, PendingPlay, Snapshot};
use crate::team::Side;

use super::{CancelFlag, SimEnv, SimError, play};

/// A drive that stopped on an error.
///
/// Carries the plays finalized before the error so the game record can keep
/// them.
#[derive(Debug)]
pub struct DriveAbort {
    pub plays: Vec<PlayRecord>,
    pub rejected: Vec<RejectedPlay>,
    pub error: SimError,
}

/// Team whose possession the next drive is: the receiver of a pending kickoff,
/// otherwise the current offense.
pub fn drive_offense(state: &GameState) -> Side {
    match &state.pending {
        Some(PendingPlay::Kickoff(setup)) => setup.receiving,
        _ => state.possession.offense,
    }
}

pub fn advance(
    state: &mut GameState,
    env: &SimEnv<'_>,
    rng: &mut SimRng,
    index: u32,
    cancel: &CancelFlag,
) -> Result<DriveRecord, DriveAbort> {
    let offense = drive_offense(state);
    let start = Snapshot::capture(state);
    let mut plays: Vec<PlayRecord> = Vec::new();
    let mut rejected: Vec<RejectedPlay> = Vec::new();
    let mut events: Vec<GameEvent> = Vec::new();

    tracing::debug!(index, %offense, ball_on = state.possession.ball_on, "drive started");

    macro_rules! abort {
        ($error:expr) => {{
            let error = $error;
            tracing::warn!(index, plays = plays.len(), %error, "drive aborted");
            return Err(DriveAbort {
                plays,
                rejected,
                error,
            });
        }};
    }

    loop {
        if cancel.is_cancelled() {
            abort!(SimError::Cancelled);
        }
        let max_plays = env.config.max_plays_per_drive;
        if plays.len() >= max_plays as usize {
            abort!(SimError::DriveStalled { max_plays });
        }

        let play_index = plays.len() as u32;
        let period = match play::period_start(state, env) {
            Ok(period) => period,
            Err(error) => abort!(error),
        };

        let attempts = env.config.attempts_per_play();
        let mut attempt = 1;
        let record = loop {
            match play::execute(state, env, rng, play_index, period.clone()) {
                Ok(record) => break record,
                Err(SimError::Model(error))
                    if attempt < attempts
                        && matches!(env.config.on_model_error, ModelErrorPolicy::Retry { .. }) =>
                {
                    tracing::warn!(index, play = play_index, attempt, %error, "play rejected, retrying");
                    rejected.push(RejectedPlay {
                        index: play_index,
                        attempt,
                        error,
                    });
                    attempt += 1;
                }
                Err(error) => {
                    // The quarter change belongs to the play; it is dropped with it.
                    if let Some(period) = &period {
                        *state = period.snapshot().state().clone();
                    }
                    abort!(error)
                }
            }
        };

        events.extend_from_slice(record.events());
        plays.push(record);

        let snapshot = Snapshot::capture(state);
        let verdict: DriveVerdict = env.rules.drive_verdict(&snapshot, &events, offense);
        if let Some(end_reason) = verdict.resolved() {
            tracing::debug!(
                index,
                %offense,
                plays = plays.len(),
                reason = %end_reason,
                "drive ended"
            );
            return Ok(DriveRecord::new(
                index, offense, start, plays, rejected, end_reason, snapshot,
            ));
        }
    }
}
