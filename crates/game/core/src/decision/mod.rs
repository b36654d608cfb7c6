//! Decision points and the registry that binds models to them.
//!
//! Every stochastic or strategic choice the simulation makes goes through a
//! [`DecisionRegistry`]: the play step names a point by its marker type, the
//! registry resolves the bound model (or the declared default), calls it with
//! a read-only [`DecisionContext`] and the run's rng, and checks the output
//! against the point's contract before handing it back.

mod context;
mod error;
pub mod kinds;
mod registry;
mod stock;

pub use context::DecisionContext;
pub use error::{ModelError, RegistryError};
pub use kinds::{DecisionKind, DecisionPoint};
pub use registry::{DecideError, DecisionRegistry, FnModel, Model};
pub use stock::StockModel;

impl DecisionRegistry {
    /// Registry with [`StockModel`] declared as the default for every point.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        StockModel::declare_all(&mut registry);
        registry
    }
}
