mod syntax_validator;

pub use syntax_validator::SyntaxValidator;

use crate::models::RecordError;

/// Checks the literal shape of a raw ledger row before it is parsed.
///
/// Any `Fn(&[String]) -> Result<(), RecordError>` closure is a validator, so
/// callers can plug in their own rules per run.
pub trait RecordValidator: Send + Sync {
    fn validate(&self, record: &[String]) -> Result<(), RecordError>;
}

impl<F> RecordValidator for F
where
    F: Fn(&[String]) -> Result<(), RecordError> + Send + Sync,
{
    fn validate(&self, record: &[String]) -> Result<(), RecordError> {
        self(record)
    }
}
