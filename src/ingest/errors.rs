use thiserror::Error;
use tokio::task::JoinError;

use crate::models::RecordError;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("error reading file: {0}")]
    Io(#[from] std::io::Error),
    #[error("error reading csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid record at row {row}: {source}")]
    InvalidRecord {
        row: usize,
        source: RecordError
    },
    #[error("error reading csv bytes - records < {minimum} (found {found})")]
    TooFewRecords {
        found: usize,
        minimum: usize
    },
    #[error("file reader task failed: {0}")]
    Task(#[from] JoinError)
}
