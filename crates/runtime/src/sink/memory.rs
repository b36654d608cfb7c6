use gridiron_core::GameRecord;

use super::RecordSink;
use crate::error::SinkError;

/// In-memory sink for tests and callers that post-process records directly.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Vec<GameRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<GameRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordSink for MemorySink {
    fn ingest(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}
