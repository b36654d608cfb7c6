//! Append-only JSON-lines record log.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use gridiron_core::GameRecord;

use super::RecordSink;
use crate::error::SinkError;

/// Writes one serialized [`GameRecord`] per line.
///
/// ```text
/// {"schema_version":1,"seed":...,"drives":[...],...}
/// {"schema_version":1,"seed":...,"drives":[...],...}
/// ```
pub struct JsonLinesSink {
    path: PathBuf,
    writer: BufWriter<File>,
    written: u64,
}

impl JsonLinesSink {
    /// Creates a new log, refusing to overwrite an existing one.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        if path.exists() {
            return Err(SinkError::AlreadyExists(path.to_path_buf()));
        }

        let file = OpenOptions::new().create_new(true).write(true).open(path)?;
        tracing::debug!("Created record log: {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::with_capacity(1024 * 1024, file),
            written: 0,
        })
    }

    /// Opens an existing log for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let file = OpenOptions::new().append(true).open(path)?;
        tracing::debug!("Opened record log: {}", path.display());

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::with_capacity(1024 * 1024, file),
            written: 0,
        })
    }

    /// Loads every record in the log, oldest first.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<GameRecord>, SinkError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line).map_err(|source| SinkError::Corrupted {
                line: index + 1,
                source,
            })?;
            records.push(record);
        }
        Ok(records)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records written through this handle.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl RecordSink for JsonLinesSink {
    fn ingest(&mut self, record: &GameRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

impl Drop for JsonLinesSink {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(
                "Failed to flush record log '{}' on drop: {}",
                self.path.display(),
                e
            );
        }
    }
}
