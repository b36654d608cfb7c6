//! Registry mapping decision points to models.
//!
//! # Resolution
//!
//! ```text
//! DecisionRegistry
//! ├── bindings: HashMap<DecisionPoint, model>   (explicit registrations)
//! └── defaults: HashMap<DecisionPoint, model>   (declared fallbacks)
//! ```
//!
//! `get` checks the explicit binding, then the declared default. A point with
//! neither fails with [`RegistryError::MissingModel`] at first use, not at
//! registration time.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::rng::SimRng;

use super::{DecisionContext, DecisionKind, DecisionPoint, ModelError, RegistryError};

/// A decision model for one kind of decision.
///
/// Models are pure with respect to game state: they read the context and draw
/// from the run's rng, nothing else.
pub trait Model<K: DecisionKind>: Send + Sync {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut SimRng) -> K::Output;
}

/// Adapts a closure into a [`Model`].
pub struct FnModel<F>(pub F);

impl<K, F> Model<K> for FnModel<F>
where
    K: DecisionKind,
    F: Fn(&DecisionContext<'_>, &mut SimRng) -> K::Output + Send + Sync,
{
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut SimRng) -> K::Output {
        (self.0)(ctx, rng)
    }
}

/// Type-erased `Arc<dyn Model<K>>`.
type Slot = Arc<dyn Any + Send + Sync>;

fn erase<K: DecisionKind>(model: Arc<dyn Model<K>>) -> Slot {
    Arc::new(model)
}

#[derive(Clone, Default)]
pub struct DecisionRegistry {
    bindings: HashMap<DecisionPoint, Slot>,
    defaults: HashMap<DecisionPoint, Slot>,
}

impl DecisionRegistry {
    /// Empty registry: every point is missing until bound or defaulted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `model` to `K`'s point.
    ///
    /// Rebinding an already bound point fails with
    /// [`RegistryError::Conflict`] unless `override_existing` is set.
    pub fn register<K: DecisionKind>(
        &mut self,
        model: impl Model<K> + 'static,
        override_existing: bool,
    ) -> Result<(), RegistryError> {
        self.register_arc::<K>(Arc::new(model), override_existing)
    }

    pub fn register_arc<K: DecisionKind>(
        &mut self,
        model: Arc<dyn Model<K>>,
        override_existing: bool,
    ) -> Result<(), RegistryError> {
        if !override_existing && self.bindings.contains_key(&K::POINT) {
            return Err(RegistryError::Conflict { point: K::POINT });
        }
        self.bindings.insert(K::POINT, erase(model));
        Ok(())
    }

    /// Binds a closure as the model for `K`'s point.
    pub fn register_fn<K, F>(&mut self, f: F, override_existing: bool) -> Result<(), RegistryError>
    where
        K: DecisionKind,
        F: Fn(&DecisionContext<'_>, &mut SimRng) -> K::Output + Send + Sync + 'static,
    {
        self.register::<K>(FnModel(f), override_existing)
    }

    /// Declares the fallback model for `K`'s point, replacing any earlier default.
    pub fn declare_default<K: DecisionKind>(&mut self, model: impl Model<K> + 'static) {
        let model: Arc<dyn Model<K>> = Arc::new(model);
        self.defaults.insert(K::POINT, erase(model));
    }

    pub fn declare_default_fn<K, F>(&mut self, f: F)
    where
        K: DecisionKind,
        F: Fn(&DecisionContext<'_>, &mut SimRng) -> K::Output + Send + Sync + 'static,
    {
        self.declare_default::<K>(FnModel(f));
    }

    /// Resolves the model for `K`'s point: binding first, then default.
    pub fn get<K: DecisionKind>(&self) -> Result<Arc<dyn Model<K>>, RegistryError> {
        let slot = self
            .bindings
            .get(&K::POINT)
            .or_else(|| self.defaults.get(&K::POINT))
            .ok_or(RegistryError::MissingModel { point: K::POINT })?;
        slot.downcast_ref::<Arc<dyn Model<K>>>()
            .cloned()
            .ok_or(RegistryError::KindMismatch { point: K::POINT })
    }

    /// Removes an explicit binding. Returns whether one existed.
    ///
    /// The declared default, if any, applies again afterwards.
    pub fn unbind(&mut self, point: DecisionPoint) -> bool {
        self.bindings.remove(&point).is_some()
    }

    pub fn is_bound(&self, point: DecisionPoint) -> bool {
        self.bindings.contains_key(&point)
    }

    pub fn has_default(&self, point: DecisionPoint) -> bool {
        self.defaults.contains_key(&point)
    }

    /// Explicitly bound points, in declaration order.
    pub fn bound_points(&self) -> Vec<DecisionPoint> {
        let mut points: Vec<_> = self.bindings.keys().copied().collect();
        points.sort();
        points
    }

    /// Bulk replacement: every binding in `other` overrides the one here.
    ///
    /// Defaults declared in `other` are adopted for points that have none.
    pub fn replace_all(&mut self, other: DecisionRegistry) {
        self.bindings.extend(other.bindings);
        for (point, slot) in other.defaults {
            self.defaults.entry(point).or_insert(slot);
        }
    }

    /// Asks the resolved model for a decision and enforces `K`'s contract.
    pub fn decide<K: DecisionKind>(
        &self,
        ctx: &DecisionContext<'_>,
        rng: &mut SimRng,
    ) -> Result<K::Output, DecideError> {
        let model = self.get::<K>()?;
        let output = model.decide(ctx, rng);
        K::check(&output, ctx).map_err(|reason| ModelError::new(K::POINT, reason))?;
        Ok(output)
    }
}

impl fmt::Debug for DecisionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut defaults: Vec<_> = self.defaults.keys().copied().collect();
        defaults.sort();
        f.debug_struct("DecisionRegistry")
            .field("bindings", &self.bound_points())
            .field("defaults", &defaults)
            .finish()
    }
}

/// Failure to obtain a valid decision.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecideError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Model(#[from] ModelError),
}
