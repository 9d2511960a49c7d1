use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::models::{DateRange, StoreError, Transaction, User};
use crate::storage::LedgerStore;
use crate::types::{TransactionId, UserId};

/// Concurrent in-memory ledger used by the CLI and tests.
pub struct InMemoryLedgerStore {
    users: DashMap<UserId, User>,
    transactions: DashMap<TransactionId, Transaction>
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            transactions: DashMap::new()
        }
    }

    /// Number of stored transactions, soft-deleted ones included.
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    fn ensure_active_user(&self, user_id: &str) -> Result<(), StoreError> {
        match self.users.get(user_id) {
            Some(user) if !user.is_deleted => Ok(()),
            _ => Err(StoreError::user_not_found(user_id))
        }
    }

    fn rollback(&self, inserted: &[&str]) {
        for transaction_id in inserted {
            self.transactions.remove(*transaction_id);
        }
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn save_user(&self, user: User) -> Result<(), StoreError> {
        match self.users.entry(user.id.clone()) {
            Entry::Occupied(entry) if !entry.get().is_deleted => Err(StoreError::duplicate_user(&user.id)),
            Entry::Occupied(mut entry) => {
                entry.insert(user);
                Ok(())
            }
            Entry::Vacant(entry) => {
                entry.insert(user);
                Ok(())
            }
        }
    }

    async fn find_user(&self, user_id: &str) -> Result<User, StoreError> {
        self.users.get(user_id)
            .filter(|user| !user.is_deleted)
            .map(|user| user.clone())
            .ok_or_else(|| StoreError::user_not_found(user_id))
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), StoreError> {
        let mut user = self.users.get_mut(user_id)
            .filter(|user| !user.is_deleted)
            .ok_or_else(|| StoreError::user_not_found(user_id))?;

        user.is_deleted = true;

        Ok(())
    }

    async fn save(&self, transaction: Transaction) -> Result<(), StoreError> {
        if transaction.amount.is_zero() {
            return Err(StoreError::zero_amount(&transaction));
        }

        if let Some(mut existing) = self.transactions.get_mut(&transaction.id) {
            if !existing.is_deleted {
                return Err(StoreError::duplicate_transaction(&transaction));
            }

            debug!("Restoring soft-deleted transaction [{}]", transaction.id);
            existing.is_deleted = false;
            return Ok(());
        }

        self.ensure_active_user(&transaction.user_id)?;

        match self.transactions.entry(transaction.id.clone()) {
            Entry::Occupied(_) => Err(StoreError::duplicate_transaction(&transaction)),
            Entry::Vacant(entry) => {
                entry.insert(transaction);
                Ok(())
            }
        }
    }

    async fn save_batch(&self, transactions: &[Transaction]) -> Result<(), StoreError> {
        let mut batch_ids = HashSet::with_capacity(transactions.len());

        for transaction in transactions {
            if transaction.amount.is_zero() {
                return Err(StoreError::zero_amount(transaction));
            }

            self.ensure_active_user(&transaction.user_id)?;

            if !batch_ids.insert(transaction.id.as_str()) || self.transactions.contains_key(&transaction.id) {
                return Err(StoreError::duplicate_transaction(transaction));
            }
        }

        let mut inserted = Vec::with_capacity(transactions.len());

        for transaction in transactions {
            //NOTE: The shard lock held by the entry must be released before a rollback touches the map again
            let claimed = match self.transactions.entry(transaction.id.clone()) {
                Entry::Occupied(_) => false,
                Entry::Vacant(entry) => {
                    entry.insert(transaction.clone());
                    true
                }
            };

            if !claimed {
                warn!("Transaction [{}] was claimed by a concurrent batch, rolling back {} rows", transaction.id, inserted.len());
                self.rollback(&inserted);
                return Err(StoreError::duplicate_transaction(transaction));
            }

            inserted.push(transaction.id.as_str());
        }

        Ok(())
    }

    async fn find_transaction(&self, transaction_id: &str) -> Result<Transaction, StoreError> {
        self.transactions.get(transaction_id)
            .filter(|transaction| !transaction.is_deleted)
            .map(|transaction| transaction.clone())
            .ok_or_else(|| StoreError::transaction_not_found(transaction_id))
    }

    async fn delete_transaction(&self, transaction_id: &str) -> Result<(), StoreError> {
        let mut transaction = self.transactions.get_mut(transaction_id)
            .filter(|transaction| !transaction.is_deleted)
            .ok_or_else(|| StoreError::transaction_not_found(transaction_id))?;

        transaction.is_deleted = true;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &str, range: Option<DateRange>) -> Result<Vec<Transaction>, StoreError> {
        let mut transactions: Vec<Transaction> = self.transactions.iter()
            .filter(|item| item.user_id == user_id && !item.is_deleted)
            .filter(|item| range.is_none_or(|range| range.contains(&item.date_time)))
            .map(|item| item.value().clone())
            .collect();

        transactions.sort_by(|left, right| left.date_time.cmp(&right.date_time).then_with(|| left.id.cmp(&right.id)));

        Ok(transactions)
    }
}
