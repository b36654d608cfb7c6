//! Asynchronous decision models behind the synchronous model boundary.
//!
//! The simulation core never awaits. A model that needs I/O (an inference
//! server, a human at a prompt) implements [`AsyncModel`] and is wrapped in a
//! [`BlockingModel`], which resolves the future on a tokio runtime before the
//! play step continues. The model boundary is therefore the only suspension
//! point in a game.

use std::marker::PhantomData;

use async_trait::async_trait;
use gridiron_core::{
    DecisionContext, DecisionKind, ExecutionDraft, Model, SimRng, Side, Snapshot,
};
use rand::RngCore;
use tokio::runtime::Handle;

/// Owned copy of everything a remote model may look at.
#[derive(Clone, Debug)]
pub struct DecisionRequest {
    pub snapshot: Snapshot,
    pub draft: ExecutionDraft,
    pub side: Option<Side>,
    /// One draw from the run's rng. Remote models seed their own randomness
    /// from it so the run stays reproducible.
    pub draw: u64,
}

#[async_trait]
pub trait AsyncModel<K: DecisionKind>: Send + Sync {
    async fn decide(&self, request: DecisionRequest) -> K::Output;
}

/// Adapts an [`AsyncModel`] to the synchronous [`Model`] interface.
///
/// Must be called from a thread that is not driving the runtime behind
/// `handle`: [`Handle::block_on`] panics inside an async context. Run games on
/// plain threads (or the rayon pool) and keep the tokio runtime separate.
pub struct BlockingModel<K, M> {
    model: M,
    handle: Handle,
    _kind: PhantomData<fn() -> K>,
}

impl<K, M> BlockingModel<K, M>
where
    K: DecisionKind,
    M: AsyncModel<K>,
{
    pub fn new(model: M, handle: Handle) -> Self {
        Self {
            model,
            handle,
            _kind: PhantomData,
        }
    }

    /// Wraps `model` with the handle of the current tokio runtime, if any.
    pub fn try_current(model: M) -> Option<Self> {
        Handle::try_current().ok().map(|handle| Self::new(model, handle))
    }
}

impl<K, M> Model<K> for BlockingModel<K, M>
where
    K: DecisionKind,
    M: AsyncModel<K>,
{
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut SimRng) -> K::Output {
        let request = DecisionRequest {
            snapshot: ctx.snapshot.clone(),
            draft: ctx.draft.clone(),
            side: ctx.side,
            draw: rng.next_u64(),
        };
        tracing::trace!(point = %K::POINT, "awaiting remote decision");
        self.handle.block_on(self.model.decide(request))
    }
}
