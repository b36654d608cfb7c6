//! Destinations for finalized game records.
//!
//! A sink ingests one finalized [`GameRecord`] at a time. Records are only
//! handed over once complete, so a sink never sees a partial record.

mod jsonl;
mod memory;

pub use jsonl::JsonLinesSink;
pub use memory::MemorySink;

use gridiron_core::GameRecord;

use crate::error::SinkError;

pub trait RecordSink: Send {
    fn ingest(&mut self, record: &GameRecord) -> Result<(), SinkError>;

    /// Pushes buffered records to their destination.
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that drops every record. Useful when only the summary matters.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl RecordSink for DiscardSink {
    fn ingest(&mut self, _record: &GameRecord) -> Result<(), SinkError> {
        Ok(())
    }
}
