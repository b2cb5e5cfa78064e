use std::path::PathBuf;

use legis_core::Record;
use scrape_logging::scrape_debug;

use crate::{deterministic_filename, AtomicFileWriter, PersistError};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Receives records one at a time, as soon as each is built.
pub trait RecordSink {
    fn emit(&mut self, record: Record) -> Result<(), SinkError>;
}

/// One pretty-printed JSON file per record.
///
/// Re-emitting a record with the same kind and key replaces its file.
#[derive(Debug)]
pub struct JsonDirSink {
    writer: AtomicFileWriter,
    written: Vec<PathBuf>,
}

impl JsonDirSink {
    pub fn new(dir: PathBuf) -> Result<Self, SinkError> {
        Ok(Self {
            writer: AtomicFileWriter::new(dir)?,
            written: Vec::new(),
        })
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl RecordSink for JsonDirSink {
    fn emit(&mut self, record: Record) -> Result<(), SinkError> {
        let filename = deterministic_filename(record.kind(), &record.key());
        let json = serde_json::to_vec_pretty(&record)?;
        let path = self.writer.write(&filename, &json)?;
        scrape_debug!("wrote {} {}", record.kind(), path.display());
        self.written.push(path);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<Record>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn emit(&mut self, record: Record) -> Result<(), SinkError> {
        self.records.push(record);
        Ok(())
    }
}
