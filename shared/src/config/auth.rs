//! Authentication configuration: token lifetimes, signing key, revocation store

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::utils::duration::{parse_bool, parse_duration};

/// Default access token lifetime (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_DURATION: Duration = Duration::from_secs(15 * 60);

/// Default refresh token lifetime (72 hours)
pub const DEFAULT_REFRESH_TOKEN_DURATION: Duration = Duration::from_secs(72 * 60 * 60);

/// Default revocation table name
pub const DEFAULT_REVOCATION_COLLECTION: &str = "user_invalidated_tokens";

/// Token and key configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Whether authentication is enforced at all
    pub enabled: bool,

    /// Access token lifetime
    #[serde(with = "humantime_serde")]
    pub access_token_duration: Duration,

    /// Refresh token lifetime
    #[serde(with = "humantime_serde")]
    pub refresh_token_duration: Duration,

    /// Base64-encoded PEM of the Ed25519 signing key
    #[serde(default, skip_serializing)]
    pub signing_private_key: Option<String>,

    /// Revocation store settings
    #[serde(default)]
    pub revocation: RevocationConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            access_token_duration: DEFAULT_ACCESS_TOKEN_DURATION,
            refresh_token_duration: DEFAULT_REFRESH_TOKEN_DURATION,
            signing_private_key: None,
            revocation: RevocationConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let enabled = match lookup("AUTH_ENABLED") {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ConfigError::invalid("AUTH_ENABLED", "expected true or false"))?,
            None => defaults.enabled,
        };

        let access_token_duration = duration_setting(
            &lookup,
            "ACCESS_TOKEN_DURATION",
            defaults.access_token_duration,
        )?;
        let refresh_token_duration = duration_setting(
            &lookup,
            "REFRESH_TOKEN_DURATION",
            defaults.refresh_token_duration,
        )?;

        if access_token_duration.is_zero() {
            return Err(ConfigError::invalid("ACCESS_TOKEN_DURATION", "must be positive"));
        }
        if refresh_token_duration < access_token_duration {
            return Err(ConfigError::invalid(
                "REFRESH_TOKEN_DURATION",
                "must not be shorter than ACCESS_TOKEN_DURATION",
            ));
        }

        let signing_private_key = lookup("SIGNING_PRIVATE_KEY").filter(|v| !v.trim().is_empty());

        Ok(Self {
            enabled,
            access_token_duration,
            refresh_token_duration,
            signing_private_key,
            revocation: RevocationConfig::from_lookup(&lookup)?,
        })
    }

    /// Set the access token lifetime
    pub fn with_access_token_duration(mut self, duration: Duration) -> Self {
        self.access_token_duration = duration;
        self
    }

    /// Set the refresh token lifetime
    pub fn with_refresh_token_duration(mut self, duration: Duration) -> Self {
        self.refresh_token_duration = duration;
        self
    }

    /// Set the base64-encoded signing key
    pub fn with_signing_key(mut self, encoded_pem: impl Into<String>) -> Self {
        self.signing_private_key = Some(encoded_pem.into());
        self
    }

    /// Turn authentication off (local and test use)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

/// Revocation store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RevocationConfig {
    /// Table (collection) holding invalidation records
    pub collection_name: String,

    /// Bound applied to every store call
    #[serde(with = "humantime_serde")]
    pub store_timeout: Duration,

    /// Safety margin added on top of the token lifetime when computing record expiry
    #[serde(with = "humantime_serde")]
    pub expiry_buffer: Duration,

    /// How often expired records are swept
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
}

impl Default for RevocationConfig {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_REVOCATION_COLLECTION.to_string(),
            store_timeout: Duration::from_secs(3),
            expiry_buffer: Duration::from_secs(2 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl RevocationConfig {
    /// Create through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let collection_name = lookup("REVOCATION_COLLECTION_NAME")
            .unwrap_or(defaults.collection_name);
        if !is_valid_identifier(&collection_name) {
            return Err(ConfigError::invalid(
                "REVOCATION_COLLECTION_NAME",
                "only ASCII letters, digits and underscores are allowed",
            ));
        }

        Ok(Self {
            collection_name,
            store_timeout: duration_setting(&lookup, "REVOCATION_STORE_TIMEOUT", defaults.store_timeout)?,
            expiry_buffer: duration_setting(&lookup, "REVOCATION_EXPIRY_BUFFER", defaults.expiry_buffer)?,
            sweep_interval: duration_setting(&lookup, "REVOCATION_SWEEP_INTERVAL", defaults.sweep_interval)?,
        })
    }
}

fn duration_setting<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => parse_duration(&value).map_err(|e| ConfigError::invalid(key, e)),
        None => Ok(default),
    }
}

fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 64
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
