//! Runtime services around the deterministic simulation core.
//!
//! `gridiron-core` plays one game at a time and never touches the outside
//! world. This crate adds what a batch job needs:
//! - [`runner`] runs replications in parallel and summarises them
//! - [`sink`] persists finalized records (memory, JSON lines)
//! - [`remote`] bridges async decision models into the synchronous core
//! - [`config`] loads runner settings from `GRIDIRON_*` variables
pub mod config;
pub mod error;
pub mod remote;
pub mod runner;
pub mod sink;

pub use config::{League, RunnerConfig};
pub use error::{Result, RuntimeError, SinkError};
pub use remote::{AsyncModel, BlockingModel, DecisionRequest};
pub use runner::{RegistryFactory, RunSummary, SimulationRunner};
pub use sink::{DiscardSink, JsonLinesSink, MemorySink, RecordSink};
