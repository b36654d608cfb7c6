//! Game Orchestrator → Drive Step → Play Step.
//!
//! The three steps are plain functions over an owned [`GameState`]:
//!
//! - [`play::execute`] gathers decisions for one snap, asks the rules oracle
//!   for a ruling and applies it through the [`StateUpdater`](crate::StateUpdater).
//! - [`drive::advance`] loops plays until the oracle ends the drive.
//! - [`GameOrchestrator`] opens the game, applies halftime and overtime
//!   boundaries between drives and finalizes the [`GameRecord`](crate::GameRecord).
//!
//! Execution inside one game is sequential. Independent games share nothing
//! mutable and can run on separate threads.

pub mod drive;
mod error;
mod game;
pub mod play;

pub use error::SimError;
pub use game::{GameOrchestrator, GameSetup};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::GameConfig;
use crate::decision::{DecisionContext, DecisionKind, DecisionRegistry};
use crate::execution::ExecutionDraft;
use crate::rng::SimRng;
use crate::rules::RulesOracle;
use crate::state::Snapshot;
use crate::team::{Matchup, Side};

/// Everything a step reads but never mutates.
#[derive(Clone, Copy)]
pub struct SimEnv<'a> {
    pub registry: &'a DecisionRegistry,
    pub rules: &'a dyn RulesOracle,
    pub matchup: &'a Matchup,
    pub config: &'a GameConfig,
}

impl SimEnv<'_> {
    /// Asks the registry for `K`'s decision on `snapshot`.
    pub(crate) fn decide<K: DecisionKind>(
        &self,
        snapshot: &Snapshot,
        draft: &ExecutionDraft,
        side: Option<Side>,
        rng: &mut SimRng,
    ) -> Result<K::Output, SimError> {
        let mut ctx = DecisionContext::new(snapshot, self.matchup, draft);
        ctx.side = side;
        let output = self.registry.decide::<K>(&ctx, rng)?;
        tracing::trace!(point = %K::POINT, "decision made");
        Ok(output)
    }
}

/// Cooperative cancellation shared between a caller and running games.
///
/// Checked between plays only; a play in flight always completes.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
