//! Configuration for the token service

use chrono::Duration;
use tg_shared::config::AuthConfig;

use crate::errors::{AuthError, AuthResult};

/// Lifetimes and store bounds used by [`super::TokenService`]
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
    /// Added to a record's lifetime before the store may drop it
    pub expiry_buffer: Duration,
    /// Bound on every revocation store call
    pub store_timeout: std::time::Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::hours(72),
            expiry_buffer: Duration::minutes(2),
            store_timeout: std::time::Duration::from_secs(3),
        }
    }
}

impl TokenServiceConfig {
    /// Build from the loaded authentication configuration
    pub fn from_auth_config(config: &AuthConfig) -> AuthResult<Self> {
        Ok(Self {
            access_ttl: to_chrono(config.access_token_duration, "access token duration")?,
            refresh_ttl: to_chrono(config.refresh_token_duration, "refresh token duration")?,
            expiry_buffer: to_chrono(config.revocation.expiry_buffer, "revocation expiry buffer")?,
            store_timeout: config.revocation.store_timeout,
        })
    }

    pub fn with_store_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

fn to_chrono(value: std::time::Duration, what: &str) -> AuthResult<Duration> {
    Duration::from_std(value)
        .map_err(|e| AuthError::internal(format!("{what} is out of range")).with_source(e))
}
