//! Common error infrastructure for gridiron-core.
//!
//! Domain errors (`ModelError`, `RuleViolation`, `StateInvariantError`,
//! `RegistryError`) live next to the component that raises them. This module
//! holds the classification shared by all of them.
//!
//! # Design Principles
//!
//! - **Type Safety**: each component has its own error enum
//! - **Severity Classification**: errors are categorized for abort/retry policy
//! - **Stable Codes**: `error_code` values are part of the record export shape

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: a decision model misbehaved; the play can be retried
/// - **Validation**: invalid input rejected before anything ran
/// - **Internal**: the caller broke the mutation discipline (stale snapshot)
/// - **Fatal**: the game cannot continue (rules inconsistency, registry misconfiguration)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the play can be attempted again with fresh draws.
    ///
    /// Examples: play call outside the playbook, yardage past the end line
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: registering two models for one decision point
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// These indicate bugs in the caller and should be investigated.
    Internal,

    /// Fatal error - the current game cannot continue.
    ///
    /// Examples: missing decision model, score value not in the scoring table
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all gridiron-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
