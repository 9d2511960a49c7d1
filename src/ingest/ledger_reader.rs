use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use tokio::task::spawn_blocking;
use tracing::debug;

use crate::ingest::IngestError;
use crate::models::User;
use crate::types::RawRecord;
use crate::validation::RecordValidator;

/// A ledger file must carry at least this many data rows.
pub const MIN_RECORDS: usize = 2;

/// Decodes a headed ledger CSV into raw rows, validating each one.
///
/// Decoding stops at the first row the validator rejects; rows are 1-based
/// and do not count the header.
pub fn read_records(bytes: &[u8], validator: &dyn RecordValidator) -> Result<Vec<RawRecord>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .has_headers(true)
        .from_reader(bytes);

    let mut records = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let row = result?;
        let record: RawRecord = row.iter().map(str::to_string).collect();

        validator.validate(&record)
            .map_err(|source| IngestError::InvalidRecord { row: index + 1, source })?;

        records.push(record);
    }

    if records.len() < MIN_RECORDS {
        return Err(IngestError::TooFewRecords { found: records.len(), minimum: MIN_RECORDS });
    }

    debug!("Decoded {} ledger records", records.len());

    Ok(records)
}

/// Reads and decodes a ledger file on the blocking pool.
pub async fn read_file(path: PathBuf, validator: Arc<dyn RecordValidator>) -> Result<Vec<RawRecord>, IngestError> {
    spawn_blocking(move || {
        let bytes = fs::read(&path)?;
        read_records(&bytes, validator.as_ref())
    }).await?
}

/// Reads a `id,first_name,last_name,email` user roster.
pub fn read_users(bytes: &[u8]) -> Result<Vec<User>, IngestError> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let users = reader.deserialize::<User>().collect::<Result<Vec<_>, _>>()?;

    Ok(users)
}
