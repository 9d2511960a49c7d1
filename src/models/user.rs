use serde::Deserialize;

use crate::types::UserId;

/// A ledger account holder. Transactions may only reference active users.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(skip)]
    pub is_deleted: bool
}

impl User {
    /// Creates a user known only by id, as registered from ledger rows.
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            is_deleted: false
        }
    }
}
