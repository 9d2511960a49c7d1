use std::collections::{HashMap, HashSet};

use crate::models::Transaction;
use crate::types::UserId;

/// Transactions of one persisted batch, grouped by owning user.
pub type UserTransactions = HashMap<UserId, Vec<Transaction>>;

/// Run-level counts reported after a fully successful migration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationSummary {
    pub total_records: usize,
    pub users_updated: usize
}

/// Accumulates per-batch groupings into a [`MigrationSummary`].
///
/// A user appearing in several batches is counted once.
#[derive(Debug, Default)]
pub struct SummaryBuilder {
    total_records: usize,
    users: HashSet<UserId>
}

impl SummaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_batch(&mut self, grouped: UserTransactions) {
        for (user_id, transactions) in grouped {
            self.total_records += transactions.len();
            self.users.insert(user_id);
        }
    }

    pub fn build(self) -> MigrationSummary {
        MigrationSummary {
            total_records: self.total_records,
            users_updated: self.users.len()
        }
    }
}
