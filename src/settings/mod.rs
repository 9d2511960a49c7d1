
use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

const ENV_PREFIX: &str = "LEDGER";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("batch_size must be greater than zero")]
    ZeroBatchSize,
    #[error("max_concurrent_batches must be greater than zero")]
    ZeroConcurrency
}

/// Tuning for one migration run.
#[derive(Debug, Clone, Deserialize)]
pub struct MigrationConfig {
    /// Records persisted together as one unit.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Upper bound on batches converting or persisting at the same time.
    #[serde(default = "default_max_concurrent_batches")]
    pub max_concurrent_batches: usize,
    /// Where reports go when the caller names no recipients.
    #[serde(default = "default_report_recipient")]
    pub report_recipient: String
}

fn default_batch_size() -> usize {
    400
}

fn default_max_concurrent_batches() -> usize {
    5
}

fn default_report_recipient() -> String {
    "reports@localhost".to_string()
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_concurrent_batches: default_max_concurrent_batches(),
            report_recipient: default_report_recipient()
        }
    }
}

impl MigrationConfig {
    /// Loads settings from `LEDGER__*` environment variables, e.g.
    /// `LEDGER__BATCH_SIZE=200`.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true))
    }

    fn load_from(environment: Environment) -> Result<Self, SettingsError> {
        let config: Self = Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.batch_size == 0 {
            return Err(SettingsError::ZeroBatchSize);
        }

        if self.max_concurrent_batches == 0 {
            return Err(SettingsError::ZeroConcurrency);
        }

        Ok(())
    }
}
