use std::collections::HashSet;
use std::fmt::Display;

use thiserror::Error;

use crate::ingest::IngestError;
use crate::models::{RecordError, StoreError};

/// Why a single batch was not persisted.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("{0}")]
    Invalid(RecordError),
    #[error("error creating transaction by record: {0}")]
    Record(RecordError),
    #[error("error saving transaction batch: {0}")]
    Store(StoreError),
    #[error("batch worker failed: {0}")]
    Task(String)
}

/// Deduplicated union of every batch failure in one migration run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", .messages.join(", "))]
pub struct PipelineError {
    messages: Vec<String>
}

impl PipelineError {
    /// Distinct messages in first-seen order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Read(#[from] IngestError),
    #[error("no records to migrate")]
    EmptyInput,
    #[error(transparent)]
    Pipeline(#[from] PipelineError)
}

/// Collects batch failures, keeping each distinct message once.
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    messages: Vec<String>,
    seen: HashSet<String>
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: impl Display) {
        let message = error.to_string();

        if self.seen.insert(message.clone()) {
            self.messages.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn finish(self) -> Result<(), PipelineError> {
        if self.is_empty() {
            return Ok(());
        }

        Err(PipelineError { messages: self.messages })
    }
}
