//! Re-derives a game's state trajectory from its record.
//!
//! Replay uses the [`StateUpdater`] alone: no models, no rules oracle, no rng.
//! Every recorded snapshot must match the replayed state exactly, and every
//! application must reproduce the recorded events.

use crate::engine::{ApplyError, GameEvent, StateUpdater};
use crate::state::{GameState, Snapshot};

use super::{GameRecord, PlayRecord, TransitionRecord};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("record has no opening transition")]
    MissingOpening,

    #[error("state diverged from the recorded snapshot at {step}")]
    Diverged { step: String },

    #[error("events diverged at {step}")]
    EventsDiverged { step: String },

    #[error("replay failed at {step}: {source}")]
    Apply {
        step: String,
        #[source]
        source: ApplyError,
    },
}

struct Replayer {
    state: GameState,
    trajectory: Vec<GameState>,
}

impl Replayer {
    fn expect_at(&self, snapshot: &Snapshot, step: &str) -> Result<(), ReplayError> {
        if snapshot.state() != &self.state {
            return Err(ReplayError::Diverged { step: step.to_owned() });
        }
        Ok(())
    }

    fn commit(
        &mut self,
        step: &str,
        recorded: &[GameEvent],
        applied: Result<Vec<GameEvent>, ApplyError>,
    ) -> Result<(), ReplayError> {
        let events = applied.map_err(|source| ReplayError::Apply {
            step: step.to_owned(),
            source,
        })?;
        if events != recorded {
            return Err(ReplayError::EventsDiverged { step: step.to_owned() });
        }
        self.trajectory.push(self.state.clone());
        Ok(())
    }

    fn transition(&mut self, record: &TransitionRecord, step: &str) -> Result<(), ReplayError> {
        self.expect_at(record.snapshot(), step)?;
        let applied =
            StateUpdater::new(&mut self.state).apply_transition(record.snapshot(), record.transition());
        self.commit(step, record.events(), applied)
    }

    fn play(&mut self, record: &PlayRecord, step: &str) -> Result<(), ReplayError> {
        if let Some(period) = record.period_start() {
            self.transition(period, &format!("{step} period start"))?;
        }
        self.expect_at(record.snapshot(), step)?;
        let applied = StateUpdater::new(&mut self.state).apply_play(
            record.snapshot(),
            record.execution(),
            record.ruling(),
        );
        self.commit(step, record.events(), applied)
    }
}

/// Replays `record` and returns every committed state, oldest first.
///
/// The first element is the pre-game state; each later element follows one
/// recorded application.
pub fn replay(record: &GameRecord) -> Result<Vec<GameState>, ReplayError> {
    let opening = record.opening().ok_or(ReplayError::MissingOpening)?;
    let initial = opening.snapshot().state().clone();
    let mut replayer = Replayer {
        trajectory: vec![initial.clone()],
        state: initial,
    };
    replayer.transition(opening, "opening")?;

    let mut boundaries = record.boundaries().iter().peekable();
    for drive in record.drives() {
        while let Some(boundary) = boundaries.next_if(|b| b.before_drive <= drive.index()) {
            replayer.transition(
                &boundary.transition,
                &format!("boundary before drive {}", boundary.before_drive),
            )?;
        }
        replayer.expect_at(drive.start(), &format!("drive {} start", drive.index()))?;
        for play in drive.plays() {
            replayer.play(play, &format!("drive {} play {}", drive.index(), play.index()))?;
        }
        replayer.expect_at(drive.end(), &format!("drive {} end", drive.index()))?;
    }
    for boundary in boundaries {
        replayer.transition(
            &boundary.transition,
            &format!("boundary before drive {}", boundary.before_drive),
        )?;
    }
    for play in record.interrupted() {
        replayer.play(play, &format!("interrupted play {}", play.index()))?;
    }

    // Holds for aborted games as well.
    if &replayer.state != record.final_state() {
        return Err(ReplayError::Diverged {
            step: "final state".to_owned(),
        });
    }
    Ok(replayer.trajectory)
}
