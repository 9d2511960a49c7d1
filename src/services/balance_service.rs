use std::sync::Arc;

use tracing::debug;

use crate::models::{BalanceError, DateRange, UserBalance};
use crate::storage::LedgerStore;

/// Answers balance queries from the persisted ledger. Balances are
/// recomputed on every call.
pub struct BalanceService<S: LedgerStore> {
    store: Arc<S>
}

impl<S: LedgerStore> BalanceService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn balance(&self, user_id: &str) -> Result<UserBalance, BalanceError> {
        self.balance_between(user_id, None).await
    }

    /// Balance of the user's live transactions, optionally limited to an
    /// inclusive datetime window.
    pub async fn balance_between(&self, user_id: &str, range: Option<DateRange>) -> Result<UserBalance, BalanceError> {
        self.store.find_user(user_id).await?;

        let transactions = self.store.find_by_user(user_id, range).await?;
        debug!("Calculating balance for user [{user_id}] over {} transactions", transactions.len());

        UserBalance::calculate(&transactions)
    }
}
