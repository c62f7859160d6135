//! # Infrastructure Layer
//!
//! Concrete implementations of the storage seams declared in `tg_core`:
//!
//! - **Database**: MySQL connection pool bootstrap using SQLx
//! - **Revocation store**: invalidation records in one MySQL table, with the
//!   expiry index emulated by a periodic sweep
//! - **Credentials**: bcrypt password check against a `users` table
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlCredentialVerifier, MySqlRevocationStore, PoolStatistics};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
