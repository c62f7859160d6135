//! MySQL connection pool

use std::fmt;
use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tg_shared::config::DatabaseConfig;
use tracing::info;

use crate::InfrastructureError;

/// Shared MySQL connection pool
#[derive(Clone, Debug)]
pub struct DatabasePool {
    pool: MySqlPool,
    max_connections: u32,
}

impl DatabasePool {
    /// Connect using the given configuration
    ///
    /// # Returns
    /// * `Ok(DatabasePool)` - At least one connection was established
    /// * `Err(InfrastructureError)` - Bad URL or the server is unreachable
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        if !config.url.starts_with("mysql://") {
            return Err(InfrastructureError::Config(
                "DATABASE_URL must use the mysql:// scheme".to_string(),
            ));
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout)))
            .max_lifetime(Some(Duration::from_secs(config.max_lifetime)))
            .connect(&config.url)
            .await?;

        info!(max_connections = config.max_connections, "Database pool connected");

        Ok(Self {
            pool,
            max_connections: config.max_connections,
        })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round-trip a trivial query
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(true)
    }

    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle() as u32,
            max_connections: self.max_connections,
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Snapshot of pool usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: u32,
    pub max_connections: u32,
}

impl fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}
