use core::ops::Deref;

use super::GameState;

/// Frozen deep copy of [`GameState`] taken at a decision boundary.
///
/// Models and the rules oracle only ever see snapshots. The updater accepts a
/// snapshot back and refuses to apply anything derived from it once the live
/// state has moved on.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Snapshot {
    state: GameState,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.state.revision
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}

impl Deref for Snapshot {
    type Target = GameState;

    fn deref(&self) -> &GameState {
        &self.state
    }
}
