//! MySQL implementation of the RevocationStore trait.
//!
//! Records live in a single table. MySQL has no TTL index, so the
//! `idx_expires_at` index serves the sweeper that deletes rows once their
//! `expires_at` passes. `uq_token_id` turns a consumption insert into an
//! atomic claim; MySQL unique indexes admit any number of NULLs, so records
//! without a token ID are unaffected.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;
use tracing::{debug, info};

use tg_core::domain::{InvalidationRecord, RevocationQuery};
use tg_core::errors::{AuthError, AuthResult};
use tg_core::repositories::RevocationStore;

/// MySQL implementation of RevocationStore
pub struct MySqlRevocationStore {
    /// Database connection pool
    pool: MySqlPool,
    /// Validated table name
    table: String,
}

impl MySqlRevocationStore {
    /// Create a store over `table`
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    /// * `table` - Table name; ASCII letters, digits and underscores only
    pub fn new(pool: MySqlPool, table: impl Into<String>) -> AuthResult<Self> {
        let table = table.into();
        if !is_valid_table_name(&table) {
            return Err(AuthError::invalid_argument(format!(
                "invalid revocation table name {table:?}"
            )));
        }
        Ok(Self { pool, table })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    async fn insert(&self, record: &InvalidationRecord) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO `{}` \
             (subject_id, device_id, token_class, token_id, invalidated_at, expires_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
            self.table
        );

        sqlx::query(&query)
            .bind(&record.subject_id)
            .bind(record.device_id.as_deref())
            .bind(record.token_class.map(|c| c.as_str()))
            .bind(record.token_id.as_deref())
            .bind(record.invalidated_at)
            .bind(record.expires_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl RevocationStore for MySqlRevocationStore {
    async fn ensure_indexes(&self) -> AuthResult<()> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS `{}` (
                id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
                subject_id VARCHAR(191) NOT NULL,
                device_id VARCHAR(191) NULL,
                token_class VARCHAR(16) NULL,
                token_id VARCHAR(64) NULL,
                invalidated_at DATETIME NOT NULL,
                expires_at DATETIME NOT NULL,
                INDEX idx_expires_at (expires_at),
                INDEX idx_subject_invalidated (subject_id, invalidated_at),
                UNIQUE KEY uq_token_id (token_id)
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
            "#,
            self.table
        );

        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("create revocation table", e))?;

        info!(table = %self.table, "Revocation table ready");
        Ok(())
    }

    async fn record(&self, record: InvalidationRecord) -> AuthResult<()> {
        match self.insert(&record).await {
            Ok(()) => Ok(()),
            // the same consumption recorded twice is still one consumption
            Err(e) if is_unique_violation(&e) => Ok(()),
            Err(e) => Err(store_error("record invalidation", e)),
        }
    }

    async fn record_consumption(&self, record: InvalidationRecord) -> AuthResult<bool> {
        match self.insert(&record).await {
            Ok(()) => Ok(true),
            Err(e) if is_unique_violation(&e) => {
                debug!(subject_id = %record.subject_id, "Token already consumed");
                Ok(false)
            }
            Err(e) => Err(store_error("record consumption", e)),
        }
    }

    async fn is_revoked(&self, query: &RevocationQuery) -> AuthResult<bool> {
        let sql = format!(
            "SELECT 1 FROM `{}` \
             WHERE subject_id = ? AND invalidated_at >= ? \
             AND (device_id IS NULL OR device_id = ?) \
             AND (token_class IS NULL OR token_class = ?) \
             AND (token_id IS NULL OR token_id = ?) \
             LIMIT 1",
            self.table
        );

        let row = sqlx::query(&sql)
            .bind(&query.subject_id)
            .bind(query.issued_at)
            .bind(query.device_id.as_deref())
            .bind(query.token_class.as_str())
            .bind(query.token_id.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("revocation lookup", e))?;

        Ok(row.is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let sql = format!("DELETE FROM `{}` WHERE expires_at <= ?", self.table);

        let result = sqlx::query(&sql)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("purge expired records", e))?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> AuthResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("ping", e))?;
        Ok(())
    }
}

fn store_error(operation: &str, error: sqlx::Error) -> AuthError {
    AuthError::store_unavailable(format!("{operation} failed")).with_source(error)
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map_or(false, |db| db.is_unique_violation())
}

fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 64
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_validation() {
        assert!(is_valid_table_name("user_invalidated_tokens"));
        assert!(is_valid_table_name("Revoked2"));
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("tokens`; DROP TABLE users; --"));
        assert!(!is_valid_table_name("schema.tokens"));
        assert!(!is_valid_table_name(&"x".repeat(65)));
    }
}
