//! In-process revocation store
//!
//! Suitable for a single instance and for tests. Multiple service instances
//! must share an external store instead.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entities::revocation::{InvalidationRecord, RevocationQuery};
use crate::errors::AuthResult;

use super::r#trait::RevocationStore;

/// Revocation store backed by a vector behind an async lock
#[derive(Clone, Default)]
pub struct InMemoryRevocationStore {
    records: Arc<RwLock<Vec<InvalidationRecord>>>,
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Snapshot of every stored record
    pub async fn records(&self) -> Vec<InvalidationRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn ensure_indexes(&self) -> AuthResult<()> {
        Ok(())
    }

    async fn record(&self, record: InvalidationRecord) -> AuthResult<()> {
        let mut records = self.records.write().await;

        let duplicate_token = record.token_id.is_some()
            && records.iter().any(|r| r.token_id == record.token_id);
        if !duplicate_token {
            records.push(record);
        }
        Ok(())
    }

    async fn record_consumption(&self, record: InvalidationRecord) -> AuthResult<bool> {
        let mut records = self.records.write().await;

        if record.token_id.is_some() && records.iter().any(|r| r.token_id == record.token_id) {
            return Ok(false);
        }
        records.push(record);
        Ok(true)
    }

    async fn is_revoked(&self, query: &RevocationQuery) -> AuthResult<bool> {
        let records = self.records.read().await;
        Ok(records.iter().any(|r| r.matches(query)))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| !r.is_expired_at(now));
        Ok((before - records.len()) as u64)
    }
}
