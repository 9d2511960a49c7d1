//! Concurrent bulk ledger migration.
//!
//! Raw ledger rows are validated, split into fixed-size batches and persisted
//! batch by batch on concurrent tasks. Batch failures are collected into one
//! deduplicated error, successful runs produce a [`models::MigrationSummary`]
//! that can be delivered with [`report::MigrationReporter`], and per-user
//! balances are derived on demand by [`services::BalanceService`].

pub mod engine;
pub mod ingest;
pub mod models;
pub mod report;
pub mod services;
pub mod settings;
pub mod storage;
pub mod types;
pub mod validation;
