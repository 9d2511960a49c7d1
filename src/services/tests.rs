use super::BalanceService;
use crate::models::{BalanceError, DateRange, StoreError, Transaction, User};
use crate::storage::{InMemoryLedgerStore, LedgerStore};

use std::sync::Arc;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;

fn create_transaction(id: &str, user_id: &str, amount: &str, date_time: &str) -> Result<Transaction> {
    let record: Vec<String> = [id, user_id, amount, date_time].iter().map(|field| field.to_string()).collect();
    Ok(Transaction::from_record(&record)?)
}

async fn seeded_store() -> Result<Arc<InMemoryLedgerStore>> {
    let store = Arc::new(InMemoryLedgerStore::new());
    store.save_user(User::new("123")).await?;
    store.save_batch(&[
        create_transaction("1", "123", "100.555", "2024-01-01T00:00:00Z")?,
        create_transaction("2", "123", "-50.555", "2024-02-01T00:00:00Z")?,
        create_transaction("3", "123", "20.00", "2024-03-01T00:00:00Z")?,
    ]).await?;

    Ok(store)
}

#[tokio::test]
async fn test_balance_over_full_history() -> Result<()> {
    let service = BalanceService::new(seeded_store().await?);

    let balance = service.balance("123").await?;

    assert_eq!(balance.balance.to_string(), "70.00");
    assert_eq!(balance.total_debits, 1);
    assert_eq!(balance.total_credits, 2);

    Ok(())
}

#[tokio::test]
async fn test_balance_within_date_range() -> Result<()> {
    let service = BalanceService::new(seeded_store().await?);
    let range = DateRange::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()
    );

    let balance = service.balance_between("123", Some(range)).await?;

    assert_eq!(balance.balance.to_string(), "50.00");
    assert_eq!(balance.total_debits + balance.total_credits, 2);

    Ok(())
}

#[tokio::test]
async fn test_balance_excludes_soft_deleted_transactions() -> Result<()> {
    let store = seeded_store().await?;
    store.delete_transaction("3").await?;
    let service = BalanceService::new(store);

    let balance = service.balance("123").await?;

    assert_eq!(balance.balance, Decimal::from(50));

    Ok(())
}

#[tokio::test]
async fn test_balance_for_user_without_transactions_is_zero() -> Result<()> {
    let store = seeded_store().await?;
    store.save_user(User::new("7")).await?;
    let service = BalanceService::new(store);

    let balance = service.balance("7").await?;

    assert!(balance.balance.is_zero());
    assert_eq!(balance.total_debits + balance.total_credits, 0);

    Ok(())
}

#[tokio::test]
async fn test_balance_for_unknown_user_fails() -> Result<()> {
    let service = BalanceService::new(seeded_store().await?);

    let result = service.balance("999").await;

    assert!(matches!(result, Err(BalanceError::Store(StoreError::UserNotFound { .. }))));
    assert!(result.unwrap_err().is_not_found());

    Ok(())
}

#[tokio::test]
async fn test_balance_overflow_is_reported_not_panicked() -> Result<()> {
    let store = Arc::new(InMemoryLedgerStore::new());
    store.save_user(User::new("9")).await?;
    store.save_batch(&[
        create_transaction("1", "9", "79228162514264337593543950335", "2024-01-01T00:00:00Z")?,
        create_transaction("2", "9", "79228162514264337593543950335", "2024-01-02T00:00:00Z")?,
    ]).await?;
    let service = BalanceService::new(store);

    let result = service.balance("9").await;

    assert!(matches!(result, Err(BalanceError::Overflow { .. })));
    assert!(!result.unwrap_err().is_not_found());

    Ok(())
}
