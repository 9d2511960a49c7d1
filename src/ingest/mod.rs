mod errors;
mod ledger_reader;

pub use errors::IngestError;
pub use ledger_reader::{read_file, read_records, read_users, MIN_RECORDS};
