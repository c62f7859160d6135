//! Tests for the in-memory revocation store

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::domain::entities::revocation::{InvalidationRecord, RevocationQuery};
use crate::domain::entities::token::TokenClass;
use crate::repositories::revocation::{InMemoryRevocationStore, RevocationStore};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

fn logout_record(at: DateTime<Utc>) -> InvalidationRecord {
    InvalidationRecord::new("user-1", at)
        .for_class(TokenClass::Access)
        .expiring_after(Duration::minutes(15), Duration::minutes(2))
}

#[tokio::test]
async fn test_record_and_lookup() {
    let store = InMemoryRevocationStore::new();
    store.record(logout_record(t0())).await.unwrap();

    let before = RevocationQuery::new("user-1", TokenClass::Access, t0() - Duration::minutes(5));
    let after = RevocationQuery::new("user-1", TokenClass::Access, t0() + Duration::minutes(1));

    assert!(store.is_revoked(&before).await.unwrap());
    assert!(!store.is_revoked(&after).await.unwrap());
}

#[tokio::test]
async fn test_duplicate_record_is_harmless() {
    let store = InMemoryRevocationStore::new();
    store.record(logout_record(t0())).await.unwrap();
    store.record(logout_record(t0())).await.unwrap();

    let query = RevocationQuery::new("user-1", TokenClass::Access, t0());
    assert!(store.is_revoked(&query).await.unwrap());
}

#[tokio::test]
async fn test_consumption_is_claimed_once() {
    let store = InMemoryRevocationStore::new();
    let record = InvalidationRecord::new("user-1", t0())
        .for_device("phone")
        .for_class(TokenClass::Refresh)
        .for_token("jti-1");

    assert!(store.record_consumption(record.clone()).await.unwrap());
    assert!(!store.record_consumption(record).await.unwrap());
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_purge_expired_only_removes_dead_records() {
    let store = InMemoryRevocationStore::new();
    store.record(logout_record(t0())).await.unwrap();
    store
        .record(
            InvalidationRecord::new("user-1", t0())
                .for_class(TokenClass::Refresh)
                .expiring_after(Duration::hours(72), Duration::minutes(2)),
        )
        .await
        .unwrap();

    let removed = store.purge_expired(t0() + Duration::minutes(30)).await.unwrap();
    assert_eq!(removed, 1);

    let remaining = store.records().await;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].token_class, Some(TokenClass::Refresh));
}

#[tokio::test]
async fn test_ping_defaults_to_ok() {
    let store = InMemoryRevocationStore::new();
    assert!(store.ping().await.is_ok());
    assert!(store.is_empty().await);
}
