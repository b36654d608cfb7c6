//! Deterministic American football simulation core.
//!
//! `gridiron-core` owns the game state machine and exposes pure APIs that the
//! runtime and offline tools reuse:
//!
//! - [`GameOrchestrator`] runs a game as drives of plays.
//! - [`DecisionRegistry`] binds decision points to pluggable models.
//! - [`RulesOracle`] answers league-specific rule queries ([`NflRules`],
//!   [`CflRules`]).
//! - All state mutation flows through [`StateUpdater`], and every applied
//!   change lands in an immutable [`GameRecord`] that [`replay`] re-derives.
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod execution;
pub mod record;
pub mod rng;
pub mod rules;
pub mod sim;
pub mod state;
pub mod team;

pub use config::{GameConfig, ModelErrorPolicy};
pub use decision::{
    DecideError, DecisionContext, DecisionKind, DecisionPoint, DecisionRegistry, FnModel, Model,
    ModelError, RegistryError, StockModel,
};
pub use engine::{ApplyError, GameEvent, StateUpdater, TransitionPhase, TransitionPhaseError};
pub use error::{ErrorSeverity, GameError};
pub use execution::{
    ExecutionData, ExecutionDraft, KickoffExecution, KickoffResult, PlayKind, PlayOutcome,
    PointAfterExecution, ScrimmageExecution,
};
pub use record::{
    AbortedGame, Boundary, BoundaryChoices, DriveRecord, GameRecord, PlayRecord, RejectedPlay,
    ReplayError, SCHEMA_VERSION, Termination, TransitionRecord, replay,
};
pub use rng::{SimRng, derive_seed};
pub use rules::{
    CflRules, CoinToss, DriveEndReason, GameEndReason, NflRules, PlayRuling, RuleViolation,
    RulesOracle, RulesTransition, ScoreAward, ScoringKind, ScoringTable, TossChoice,
};
pub use sim::{CancelFlag, GameOrchestrator, GameSetup, SimError};
pub use state::{
    GameClock, GameFormat, GameState, PendingPlay, Possession, Scoreboard, Snapshot, StateDelta,
    StateInvariantError, Timeouts,
};
pub use team::{Assignment, Matchup, PlayCall, PlayType, Playbook, Player, PlayerId, Side, Team};
