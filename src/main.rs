use std::collections::BTreeSet;
use std::fs;
use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use ledger_migration_engine::engine::MigrationEngine;
use ledger_migration_engine::ingest;
use ledger_migration_engine::models::User;
use ledger_migration_engine::report::{LogNotifier, MigrationReporter};
use ledger_migration_engine::services::BalanceService;
use ledger_migration_engine::settings::MigrationConfig;
use ledger_migration_engine::storage::{InMemoryLedgerStore, LedgerStore};
use ledger_migration_engine::types::UserId;
use ledger_migration_engine::validation::{RecordValidator, SyntaxValidator};

/// Migrates a ledger CSV into per-user transactions and prints the resulting
/// balances as CSV on stdout.
#[derive(Debug, Parser)]
#[command(name = "ledger-migration-engine", version)]
struct Cli {
    /// Ledger file with `id,user_id,amount,datetime` rows.
    input: PathBuf,
    /// Optional `id,first_name,last_name,email` roster; defaults to the users
    /// referenced by the ledger.
    #[arg(long)]
    users: Option<PathBuf>,
    /// Records persisted together as one unit.
    #[arg(long)]
    batch_size: Option<usize>,
    /// Maximum batches processed concurrently.
    #[arg(long)]
    workers: Option<usize>,
    /// Report recipient, may be repeated.
    #[arg(long = "notify")]
    notify: Vec<String>,
    /// error, warn, info, debug or trace.
    #[arg(long, default_value = "error")]
    log_level: String
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let mut config = MigrationConfig::load()?;

    if let Some(batch_size) = cli.batch_size {
        config.batch_size = batch_size;
    }

    if let Some(workers) = cli.workers {
        config.max_concurrent_batches = workers;
    }

    let validator: Arc<dyn RecordValidator> = Arc::new(SyntaxValidator);
    let records = ingest::read_file(cli.input.clone(), validator).await
        .with_context(|| format!("could not read ledger {}", cli.input.display()))?;

    let user_ids: BTreeSet<UserId> = records.iter().map(|record| record[1].clone()).collect();

    let storage = Arc::new(InMemoryLedgerStore::new());
    seed_users(&storage, cli.users.as_ref(), &user_ids).await?;

    let engine = MigrationEngine::new(storage.clone(), &config)?;

    let timer = Instant::now();
    let summary = engine.migrate(records).await?;
    let duration = timer.elapsed();

    info!("Processed transactions in: {duration:?}");

    let reporter = MigrationReporter::new(Arc::new(LogNotifier::new(config.report_recipient.clone())));

    //NOTE: Transactions are already committed at this point, an undelivered report does not fail the run
    if let Err(error) = reporter.send_report(&summary, &cli.notify).await {
        warn!("Migration succeeded but the report was not delivered: {error}");
    }

    write_balances_to_stdout(BalanceService::new(storage), &user_ids).await?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the balance CSV, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

async fn seed_users(storage: &InMemoryLedgerStore, roster: Option<&PathBuf>, user_ids: &BTreeSet<UserId>) -> Result<()> {
    let users = match roster {
        Some(path) => {
            let bytes = fs::read(path).with_context(|| format!("could not read users {}", path.display()))?;
            ingest::read_users(&bytes)?
        }
        None => user_ids.iter().map(|user_id| User::new(user_id.as_str())).collect()
    };

    for user in users {
        storage.save_user(user).await?;
    }

    Ok(())
}

async fn write_balances_to_stdout(service: BalanceService<InMemoryLedgerStore>, user_ids: &BTreeSet<UserId>) -> Result<()> {
    let mut balances = Vec::with_capacity(user_ids.len());

    for user_id in user_ids {
        balances.push((user_id, service.balance(user_id).await?));
    }

    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "user,balance,total_debits,total_credits")?;

    for (user_id, balance) in balances {
        writeln!(output, "{},{},{},{}", user_id, balance.balance, balance.total_debits, balance.total_credits)?;
    }

    output.flush()?;

    Ok(())
}
