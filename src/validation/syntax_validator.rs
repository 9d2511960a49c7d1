use chrono::DateTime;

use crate::models::RecordError;
use crate::validation::RecordValidator;

const MIN_RECORD_FIELDS: usize = 4;

/// Default row validator: non-empty integer `id` and `userID`, a float
/// `amount` and an RFC 3339 `datetime`, checked in column order.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxValidator;

impl RecordValidator for SyntaxValidator {
    fn validate(&self, record: &[String]) -> Result<(), RecordError> {
        if record.len() < MIN_RECORD_FIELDS {
            return Err(RecordError::BelowRequiredFields { found: record.len() });
        }

        validate_integer("id", &record[0])?;
        validate_integer("userID", &record[1])?;
        validate_amount(&record[2])?;
        validate_datetime(&record[3])
    }
}

fn validate_integer(field: &'static str, value: &str) -> Result<(), RecordError> {
    let value = non_empty(field, value)?;

    value.parse::<i64>()
        .map(|_| ())
        .map_err(|_| RecordError::InvalidInteger { field })
}

fn validate_amount(value: &str) -> Result<(), RecordError> {
    let value = non_empty("amount", value)?;

    value.parse::<f64>()
        .map(|_| ())
        .map_err(|_| RecordError::InvalidFloat)
}

fn validate_datetime(value: &str) -> Result<(), RecordError> {
    let value = non_empty("datetime", value)?;

    DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .map_err(|_| RecordError::InvalidDateTime)
}

fn non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, RecordError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(RecordError::EmptyField { field });
    }

    Ok(value)
}
