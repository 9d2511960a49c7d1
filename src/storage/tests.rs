use super::{InMemoryLedgerStore, LedgerStore};
use crate::models::{DateRange, StoreError, Transaction, User};

use std::sync::Arc;

use anyhow::Result;
use chrono::{TimeZone, Utc};

fn create_transaction(id: &str, user_id: &str, amount: &str, date_time: &str) -> Result<Transaction> {
    let record: Vec<String> = [id, user_id, amount, date_time].iter().map(|field| field.to_string()).collect();
    Ok(Transaction::from_record(&record)?)
}

async fn store_with_users(user_ids: &[&str]) -> Result<InMemoryLedgerStore> {
    let store = InMemoryLedgerStore::new();

    for user_id in user_ids {
        store.save_user(User::new(*user_id)).await?;
    }

    Ok(store)
}

#[tokio::test]
async fn test_user_lifecycle_with_soft_delete() -> Result<()> {
    let store = store_with_users(&["1"]).await?;

    assert_eq!(store.find_user("1").await?.id, "1");
    assert!(matches!(store.save_user(User::new("1")).await, Err(StoreError::DuplicateUser { .. })));

    store.delete_user("1").await?;

    assert!(matches!(store.find_user("1").await, Err(StoreError::UserNotFound { .. })));
    assert!(store.delete_user("1").await.is_err());

    store.save_user(User::new("1")).await?;

    assert!(store.find_user("1").await.is_ok());

    Ok(())
}

#[tokio::test]
async fn test_save_enforces_user_and_amount_rules() -> Result<()> {
    let store = store_with_users(&["1"]).await?;

    let orphan = create_transaction("1", "404", "10", "2024-01-01T00:00:00Z")?;
    assert!(matches!(store.save(orphan).await, Err(StoreError::UserNotFound { .. })));

    let mut zero = create_transaction("2", "1", "10", "2024-01-01T00:00:00Z")?;
    zero.amount = rust_decimal::Decimal::ZERO;
    assert!(matches!(store.save(zero).await, Err(StoreError::ZeroAmount { .. })));

    let valid = create_transaction("3", "1", "10", "2024-01-01T00:00:00Z")?;
    store.save(valid.clone()).await?;

    let error = store.save(valid).await.expect_err("duplicate id should be rejected");
    assert_eq!(error.to_string(), "duplicated transaction");

    Ok(())
}

#[tokio::test]
async fn test_save_restores_soft_deleted_transaction() -> Result<()> {
    let store = store_with_users(&["1"]).await?;
    let transaction = create_transaction("1", "1", "10", "2024-01-01T00:00:00Z")?;

    store.save(transaction.clone()).await?;
    store.delete_transaction("1").await?;

    assert!(matches!(store.find_transaction("1").await, Err(StoreError::TransactionNotFound { .. })));
    assert!(store.delete_transaction("1").await.is_err());

    store.save(transaction).await?;

    assert!(!store.find_transaction("1").await?.is_deleted);

    Ok(())
}

#[tokio::test]
async fn test_save_batch_is_all_or_nothing() -> Result<()> {
    let store = store_with_users(&["1"]).await?;
    store.save(create_transaction("existing", "1", "1", "2024-01-01T00:00:00Z")?).await?;

    let batch = vec![
        create_transaction("10", "1", "5", "2024-01-01T00:00:00Z")?,
        create_transaction("existing", "1", "5", "2024-01-01T00:00:00Z")?,
    ];

    assert!(matches!(store.save_batch(&batch).await, Err(StoreError::DuplicateTransaction { .. })));
    assert_eq!(store.transaction_count(), 1);

    let batch = vec![
        create_transaction("11", "1", "5", "2024-01-01T00:00:00Z")?,
        create_transaction("12", "2", "5", "2024-01-01T00:00:00Z")?,
    ];

    assert!(matches!(store.save_batch(&batch).await, Err(StoreError::UserNotFound { .. })));
    assert_eq!(store.transaction_count(), 1);

    Ok(())
}

#[tokio::test]
async fn test_save_batch_rejects_ids_repeated_within_the_batch() -> Result<()> {
    let store = store_with_users(&["1"]).await?;
    let batch = vec![
        create_transaction("1", "1", "5", "2024-01-01T00:00:00Z")?,
        create_transaction("1", "1", "6", "2024-01-01T00:00:00Z")?,
    ];

    assert!(store.save_batch(&batch).await.is_err());
    assert_eq!(store.transaction_count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_concurrent_batches_with_shared_ids_never_both_commit() -> Result<()> {
    let store = Arc::new(store_with_users(&["1"]).await?);
    let batch: Vec<Transaction> = (0..200)
        .map(|index| create_transaction(&index.to_string(), "1", "1", "2024-01-01T00:00:00Z"))
        .collect::<Result<_>>()?;

    let first = tokio::spawn({
        let store = store.clone();
        let batch = batch.clone();
        async move { store.save_batch(&batch).await }
    });
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.save_batch(&batch).await }
    });

    let outcomes = [first.await?, second.await?];

    assert_eq!(outcomes.iter().filter(|outcome| outcome.is_ok()).count(), 1);
    assert_eq!(store.transaction_count(), 200);

    Ok(())
}

#[tokio::test]
async fn test_find_by_user_filters_deleted_and_range() -> Result<()> {
    let store = store_with_users(&["1", "2"]).await?;
    let batch = vec![
        create_transaction("3", "1", "30", "2024-03-01T00:00:00Z")?,
        create_transaction("1", "1", "10", "2024-01-01T00:00:00Z")?,
        create_transaction("2", "1", "20", "2024-02-01T00:00:00Z")?,
        create_transaction("4", "2", "40", "2024-02-01T00:00:00Z")?,
    ];
    store.save_batch(&batch).await?;
    store.delete_transaction("3").await?;

    let all: Vec<String> = store.find_by_user("1", None).await?.into_iter().map(|tx| tx.id).collect();
    assert_eq!(all, vec!["1", "2"]);

    let range = DateRange::new(
        Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()
    );
    let ranged: Vec<String> = store.find_by_user("1", Some(range)).await?.into_iter().map(|tx| tx.id).collect();
    assert_eq!(ranged, vec!["2"]);

    Ok(())
}
