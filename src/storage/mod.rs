mod ledger_storage;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

use crate::models::{DateRange, StoreError, Transaction, User};

pub use ledger_storage::InMemoryLedgerStore;

/// Persistence boundary for users and their transactions.
///
/// Implementations own uniqueness, referential and soft-delete rules and
/// report violations as [`StoreError`] kinds.
#[async_trait]
pub trait LedgerStore: Send + Sync + 'static {
    async fn save_user(&self, user: User) -> Result<(), StoreError>;

    /// Returns the user unless it is missing or soft-deleted.
    async fn find_user(&self, user_id: &str) -> Result<User, StoreError>;

    async fn delete_user(&self, user_id: &str) -> Result<(), StoreError>;

    /// Persists one transaction, restoring it if it was soft-deleted.
    async fn save(&self, transaction: Transaction) -> Result<(), StoreError>;

    /// Persists every transaction or none of them.
    async fn save_batch(&self, transactions: &[Transaction]) -> Result<(), StoreError>;

    async fn find_transaction(&self, transaction_id: &str) -> Result<Transaction, StoreError>;

    async fn delete_transaction(&self, transaction_id: &str) -> Result<(), StoreError>;

    /// Live transactions of a user ordered by datetime, optionally narrowed
    /// to an inclusive window.
    async fn find_by_user(&self, user_id: &str, range: Option<DateRange>) -> Result<Vec<Transaction>, StoreError>;
}
