use rust_decimal::Decimal;

use crate::models::{BalanceError, Transaction};
use crate::types::round_to_cents;

/// Net position of one user, derived on demand and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserBalance {
    pub balance: Decimal,
    pub total_debits: usize,
    pub total_credits: usize
}

impl UserBalance {
    /// Folds a user's live transactions into a balance with debit and credit
    /// counts.
    ///
    /// Amounts are summed exactly and rounded to cents once at the end. Zero
    /// amounts count as neither debit nor credit.
    ///
    /// # Errors
    /// Returns `BalanceError::Overflow` when the running total leaves the
    /// decimal range.
    pub fn calculate(transactions: &[Transaction]) -> Result<Self, BalanceError> {
        let mut total = Decimal::ZERO;
        let mut total_debits = 0;
        let mut total_credits = 0;

        for transaction in transactions {
            if transaction.is_debit() {
                total_debits += 1;
            }

            if transaction.is_credit() {
                total_credits += 1;
            }

            total = total.checked_add(transaction.amount)
                .ok_or_else(|| BalanceError::overflow(transaction))?;
        }

        Ok(Self {
            balance: round_to_cents(total),
            total_debits,
            total_credits
        })
    }
}

impl Default for UserBalance {
    fn default() -> Self {
        Self {
            balance: round_to_cents(Decimal::ZERO),
            total_debits: 0,
            total_credits: 0
        }
    }
}
