//! Error types surfaced by the runner and record sinks.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("replication count must be at least 1")]
    NoReplications,

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Errors raised while persisting or loading finalized records.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record log already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("corrupted record on line {line}: {source}")]
    Corrupted {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
