//! Token entities for signed access/refresh credentials.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two classes of token the service issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenClass {
    /// Short-lived credential presented on every protected call
    Access,
    /// Long-lived, single-use credential exchanged for a new pair
    Refresh,
}

impl TokenClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenClass::Access => "access",
            TokenClass::Refresh => "refresh",
        }
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "access" => Ok(TokenClass::Access),
            "refresh" => Ok(TokenClass::Refresh),
            other => Err(format!("unknown token class: {other}")),
        }
    }
}

/// Claims structure for the token payload
///
/// `token_type` is kept as a raw string so that a token with a missing or
/// unknown class still decodes and can be rejected as the wrong type rather
/// than as a malformed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Token class ("access" or "refresh")
    #[serde(default)]
    pub token_type: String,

    /// Device the token was issued to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,

    /// Issued at (seconds since epoch)
    pub iat: i64,

    /// Expiration (seconds since epoch)
    pub exp: i64,

    /// Unique token ID, refresh tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Endpoints the access token was minted for
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aud: Vec<String>,
}

impl Claims {
    /// Creates claims for an access token issued at `now`
    pub fn new_access(
        subject_id: impl Into<String>,
        device_id: impl Into<String>,
        audience: Vec<String>,
        now: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> Self {
        Self {
            sub: subject_id.into(),
            token_type: TokenClass::Access.as_str().to_string(),
            device_id: Some(device_id.into()),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: None,
            aud: audience,
        }
    }

    /// Creates claims for a refresh token issued at `now`, with a fresh token ID
    pub fn new_refresh(
        subject_id: impl Into<String>,
        device_id: impl Into<String>,
        now: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> Self {
        Self {
            sub: subject_id.into(),
            token_type: TokenClass::Refresh.as_str().to_string(),
            device_id: Some(device_id.into()),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Some(Uuid::new_v4().to_string()),
            aud: Vec::new(),
        }
    }

    /// Parsed token class, `None` when absent or unknown
    pub fn token_class(&self) -> Option<TokenClass> {
        self.token_type.parse().ok()
    }

    /// True once `now` reaches the expiry second
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Token pair returned by login and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access token
    pub access_token: String,

    /// Refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,

    /// Token type (always "Bearer")
    pub token_type: String,
}

impl TokenPair {
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in,
            refresh_expires_in,
            token_type: "Bearer".to_string(),
        }
    }
}
