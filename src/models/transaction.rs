use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::RecordError;
use crate::types::{TransactionId, UserId};

const ID_FIELD: usize = 0;
const USER_ID_FIELD: usize = 1;
const AMOUNT_FIELD: usize = 2;
const DATETIME_FIELD: usize = 3;

const RECORD_FIELDS: usize = 4;

/// A single ledger movement for one user.
///
/// Negative amounts are debits and positive amounts are credits. A zero amount
/// is never a valid transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub amount: Decimal,
    pub date_time: DateTime<Utc>,
    /// Soft-delete flag, owned by the ledger store once persisted.
    pub is_deleted: bool
}

/// Parses a plain or scientific decimal amount. Non-zero digits that fall
/// below the representable scale are a precision error, not a zero amount.
fn parse_amount(raw: &str) -> Result<Decimal, RecordError> {
    let amount = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|error| match error {
            rust_decimal::Error::ScaleExceedsMaximumPrecision(_) => RecordError::AmountPrecision,
            error => RecordError::Amount(error)
        })?;

    if amount.is_zero() {
        let mantissa = raw.split(['e', 'E']).next().unwrap_or_default();
        if mantissa.chars().any(|c| matches!(c, '1'..='9')) {
            return Err(RecordError::AmountPrecision);
        }
        return Err(RecordError::ZeroAmount);
    }

    Ok(amount)
}

impl Transaction {
    /// Builds a transaction from a raw `[id, userID, amount, datetime]` row.
    ///
    /// This re-parses the amount as a decimal and the datetime as RFC 3339
    /// regardless of whether a syntax validator already accepted the row.
    pub fn from_record(record: &[String]) -> Result<Self, RecordError> {
        if record.len() < RECORD_FIELDS {
            return Err(RecordError::BelowRequiredFields { found: record.len() });
        }

        let amount = parse_amount(record[AMOUNT_FIELD].trim())?;

        let date_time = DateTime::parse_from_rfc3339(record[DATETIME_FIELD].trim())
            .map_err(RecordError::DateTime)?
            .with_timezone(&Utc);

        Ok(Self {
            id: record[ID_FIELD].trim().to_string(),
            user_id: record[USER_ID_FIELD].trim().to_string(),
            amount,
            date_time,
            is_deleted: false
        })
    }

    pub fn is_debit(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn is_credit(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// Inclusive datetime window used to narrow a user's transaction history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, date_time: &DateTime<Utc>) -> bool {
        *date_time >= self.from && *date_time <= self.to
    }
}
