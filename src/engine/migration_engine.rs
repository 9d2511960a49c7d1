use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use futures::future::join_all;
use tokio::spawn;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::engine::{create_batches, BatchError, ErrorAggregator, MigrationError};
use crate::ingest;
use crate::models::{MigrationSummary, SummaryBuilder, Transaction, UserTransactions};
use crate::settings::{MigrationConfig, SettingsError};
use crate::storage::LedgerStore;
use crate::types::{Batch, RawRecord};
use crate::validation::{RecordValidator, SyntaxValidator};

/// Concurrent batch-ingestion pipeline.
///
/// Every batch runs on its own task and is persisted as one unit. A failing
/// batch never cancels its siblings; the run fails only after all batches
/// have been attempted.
pub struct MigrationEngine<S: LedgerStore> {
    store: Arc<S>,
    validator: Arc<dyn RecordValidator>,
    batch_size: NonZeroUsize,
    permits: Arc<Semaphore>
}

impl<S: LedgerStore> MigrationEngine<S> {
    /// Creates an engine over `store` using the default syntax validator.
    pub fn new(store: Arc<S>, config: &MigrationConfig) -> Result<Self, SettingsError> {
        config.validate()?;

        let batch_size = NonZeroUsize::new(config.batch_size).ok_or(SettingsError::ZeroBatchSize)?;

        Ok(Self {
            store,
            validator: Arc::new(SyntaxValidator),
            batch_size,
            permits: Arc::new(Semaphore::new(config.max_concurrent_batches))
        })
    }

    /// Replaces the row validator applied before each record is parsed.
    pub fn with_validator(mut self, validator: impl RecordValidator + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// Decodes a ledger file and migrates its rows.
    pub async fn migrate_file(&self, path: impl Into<PathBuf>) -> Result<MigrationSummary, MigrationError> {
        let records = ingest::read_file(path.into(), self.validator.clone()).await?;

        self.migrate(records).await
    }

    /// Batches the records, persists every batch concurrently and summarises
    /// the run.
    pub async fn migrate(&self, records: Vec<RawRecord>) -> Result<MigrationSummary, MigrationError> {
        if records.is_empty() {
            return Err(MigrationError::EmptyInput);
        }

        let batches = create_batches(records, self.batch_size);
        info!("Migrating {} batches of up to {} records", batches.len(), self.batch_size);

        let handles: Vec<_> = batches.into_iter()
            .enumerate()
            .map(|(index, batch)| self.spawn_batch(index, batch))
            .collect();

        let mut errors = ErrorAggregator::new();
        let mut summary = SummaryBuilder::new();

        for result in join_all(handles).await {
            match result {
                Ok(Ok(grouped)) => summary.add_batch(grouped),
                Ok(Err(batch_error)) => errors.push(batch_error),
                Err(join_error) => errors.push(BatchError::Task(join_error.to_string()))
            }
        }

        if let Err(pipeline_error) = errors.finish() {
            error!("Error during batch processing: {pipeline_error}");
            return Err(pipeline_error.into());
        }

        let summary = summary.build();
        info!("Migrated {} records for {} users", summary.total_records, summary.users_updated);

        Ok(summary)
    }

    fn spawn_batch(&self, index: usize, batch: Batch) -> JoinHandle<Result<UserTransactions, BatchError>> {
        let store = self.store.clone();
        let validator = self.validator.clone();
        let permits = self.permits.clone();

        spawn(async move {
            let _permit = permits.acquire_owned().await
                .map_err(|error| BatchError::Task(error.to_string()))?;

            let result = process_batch(batch, store.as_ref(), validator.as_ref()).await;

            match &result {
                Ok(grouped) => debug!("Batch [{index}] persisted for {} users", grouped.len()),
                Err(batch_error) => error!("Batch [{index}] failed: {batch_error}")
            }

            result
        })
    }
}

async fn process_batch<S: LedgerStore>(batch: Batch, store: &S, validator: &dyn RecordValidator) -> Result<UserTransactions, BatchError> {
    let mut transactions = Vec::with_capacity(batch.len());

    for record in &batch {
        validator.validate(record).map_err(BatchError::Invalid)?;
        transactions.push(Transaction::from_record(record).map_err(BatchError::Record)?);
    }

    store.save_batch(&transactions).await.map_err(BatchError::Store)?;

    let mut grouped = UserTransactions::new();

    for transaction in transactions {
        grouped.entry(transaction.user_id.clone()).or_default().push(transaction);
    }

    Ok(grouped)
}
