mod batcher;
mod errors;
mod migration_engine;

pub use batcher::create_batches;
pub use errors::{BatchError, ErrorAggregator, MigrationError, PipelineError};
pub use migration_engine::MigrationEngine;
