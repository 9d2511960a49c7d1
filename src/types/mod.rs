mod monetary;
#[cfg(test)]
mod tests;

pub use monetary::{round_to_cents, CENT_PLACES};

pub type UserId = String;
pub type TransactionId = String;

/// One undecoded ledger row: `[id, userID, amount, datetime]`.
pub type RawRecord = Vec<String>;

/// An ordered group of rows that is converted and persisted as one unit.
pub type Batch = Vec<RawRecord>;
