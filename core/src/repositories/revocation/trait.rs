//! Revocation store trait: persistence for invalidation records.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::revocation::{InvalidationRecord, RevocationQuery};
use crate::errors::AuthResult;

/// Append-only store of invalidation records
///
/// Implementations must never update or delete a record before its
/// `expires_at`. Any failure talking to the backing store is reported as
/// `ErrorKind::StoreUnavailable`.
///
/// # Storage layout
/// - an expiry index on `expires_at`, used to drop records that can no
///   longer match a live token
/// - a composite index on `(subject_id, invalidated_at)` serving
///   [`RevocationStore::is_revoked`]
/// - a uniqueness constraint on `token_id`, which makes
///   [`RevocationStore::record_consumption`] an atomic claim
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Create the table and indexes if missing
    ///
    /// Idempotent. Called once at startup; a failure there is fatal.
    async fn ensure_indexes(&self) -> AuthResult<()>;

    /// Append one record
    ///
    /// Safe to retry: a duplicate insert leaves the observable state unchanged
    /// because lookups are range based.
    ///
    /// # Arguments
    /// * `record` - The invalidation event to persist
    async fn record(&self, record: InvalidationRecord) -> AuthResult<()>;

    /// Append a record scoped to one token ID, once
    ///
    /// # Returns
    /// * `Ok(true)` - The record was stored by this call
    /// * `Ok(false)` - A record for the same `token_id` already existed
    /// * `Err(AuthError)` - The store failed
    async fn record_consumption(&self, record: InvalidationRecord) -> AuthResult<bool>;

    /// Whether any record revokes the described token
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::Utc;
    /// # use tg_core::domain::{RevocationQuery, TokenClass};
    /// # use tg_core::repositories::RevocationStore;
    /// # async fn example(store: &impl RevocationStore) -> tg_core::errors::AuthResult<()> {
    /// let query = RevocationQuery::new("user-1", TokenClass::Access, Utc::now());
    /// if store.is_revoked(&query).await? {
    ///     println!("token revoked");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn is_revoked(&self, query: &RevocationQuery) -> AuthResult<bool>;

    /// Remove records whose `expires_at` is at or before `now`
    ///
    /// This is the store's own expiry mechanism; application code never calls
    /// it outside the sweeper.
    ///
    /// # Returns
    /// Number of records removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> AuthResult<u64>;

    /// Cheap liveness check
    async fn ping(&self) -> AuthResult<()> {
        Ok(())
    }
}

#[async_trait]
impl<T: RevocationStore + ?Sized> RevocationStore for Arc<T> {
    async fn ensure_indexes(&self) -> AuthResult<()> {
        (**self).ensure_indexes().await
    }

    async fn record(&self, record: InvalidationRecord) -> AuthResult<()> {
        (**self).record(record).await
    }

    async fn record_consumption(&self, record: InvalidationRecord) -> AuthResult<bool> {
        (**self).record_consumption(record).await
    }

    async fn is_revoked(&self, query: &RevocationQuery) -> AuthResult<bool> {
        (**self).is_revoked(query).await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        (**self).purge_expired(now).await
    }

    async fn ping(&self) -> AuthResult<()> {
        (**self).ping().await
    }
}
