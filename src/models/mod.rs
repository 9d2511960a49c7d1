mod balance;
mod errors;
mod summary;
mod transaction;
mod user;

pub use balance::UserBalance;
pub use errors::{BalanceError, RecordError, StoreError};
pub use summary::{MigrationSummary, SummaryBuilder, UserTransactions};
pub use transaction::{DateRange, Transaction};
pub use user::User;
