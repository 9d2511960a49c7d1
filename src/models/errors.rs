use thiserror::Error;

use crate::models::Transaction;
use crate::types::{TransactionId, UserId};

/// A single ledger row that could not be turned into a transaction.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record fields are below required")]
    BelowRequiredFields {
        found: usize
    },
    #[error("{field} field is empty")]
    EmptyField {
        field: &'static str
    },
    #[error("{field} field is not a valid integer")]
    InvalidInteger {
        field: &'static str
    },
    #[error("amount field is not a valid float")]
    InvalidFloat,
    #[error("datetime field is not in valid ISO 8601 format")]
    InvalidDateTime,
    #[error("amount field exceeds the supported decimal precision")]
    AmountPrecision,
    #[error("amount field is not a valid decimal: {0}")]
    Amount(rust_decimal::Error),
    #[error("datetime field is not valid RFC 3339: {0}")]
    DateTime(chrono::ParseError),
    #[error("amount must be different from zero")]
    ZeroAmount
}

/// Failure kinds reported by a ledger store.
///
/// Messages are deliberately free of identifiers so that the same conflict hit
/// by many batches collapses into one reported cause.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicated transaction")]
    DuplicateTransaction {
        transaction_id: TransactionId
    },
    #[error("transaction not found")]
    TransactionNotFound {
        transaction_id: TransactionId
    },
    #[error("user not found")]
    UserNotFound {
        user_id: UserId
    },
    #[error("duplicate user")]
    DuplicateUser {
        user_id: UserId
    },
    #[error("amount must be different from zero")]
    ZeroAmount {
        transaction_id: TransactionId
    },
    #[error("ledger store unavailable: {0}")]
    Transport(String)
}

/// Why a user's balance could not be derived.
#[derive(Debug, Error)]
pub enum BalanceError {
    #[error("balance overflow for user [{user_id}] at transaction [{transaction_id}]")]
    Overflow {
        user_id: UserId,
        transaction_id: TransactionId
    },
    #[error(transparent)]
    Store(#[from] StoreError)
}

impl BalanceError {
    pub fn overflow(tx: &Transaction) -> Self {
        Self::Overflow {
            user_id: tx.user_id.clone(),
            transaction_id: tx.id.clone()
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(error) if error.is_not_found())
    }
}

impl StoreError {
    pub fn duplicate_transaction(tx: &Transaction) -> Self {
        Self::DuplicateTransaction { transaction_id: tx.id.clone() }
    }

    pub fn transaction_not_found(transaction_id: &str) -> Self {
        Self::TransactionNotFound { transaction_id: transaction_id.to_string() }
    }

    pub fn user_not_found(user_id: &str) -> Self {
        Self::UserNotFound { user_id: user_id.to_string() }
    }

    pub fn duplicate_user(user_id: &str) -> Self {
        Self::DuplicateUser { user_id: user_id.to_string() }
    }

    pub fn zero_amount(tx: &Transaction) -> Self {
        Self::ZeroAmount { transaction_id: tx.id.clone() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TransactionNotFound { .. } | Self::UserNotFound { .. })
    }
}
