//! Invalidation records: the negative cache behind revocation.
//!
//! A record states that every token of its scope issued at or before
//! `invalidated_at` is no longer acceptable. Scope fields left as `None` are
//! wildcards. Records are append-only and are removed only once `expires_at`
//! passes.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::token::TokenClass;

/// One invalidation event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidationRecord {
    pub subject_id: String,

    /// `None` means all devices
    pub device_id: Option<String>,

    /// `None` means both classes
    pub token_class: Option<TokenClass>,

    /// Restricts the record to one refresh token (rotation)
    pub token_id: Option<String>,

    /// Threshold instant, whole seconds
    pub invalidated_at: DateTime<Utc>,

    /// Instant after which no token in scope can still be valid
    pub expires_at: DateTime<Utc>,
}

impl InvalidationRecord {
    /// Builds a record at `invalidated_at`, truncated to the second
    ///
    /// `expires_at` is filled in by [`InvalidationRecord::expiring_after`].
    pub fn new(subject_id: impl Into<String>, invalidated_at: DateTime<Utc>) -> Self {
        let invalidated_at = truncate_to_second(invalidated_at);
        Self {
            subject_id: subject_id.into(),
            device_id: None,
            token_class: None,
            token_id: None,
            invalidated_at,
            expires_at: invalidated_at,
        }
    }

    pub fn for_device(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = Some(device_id.into());
        self
    }

    pub fn for_class(mut self, token_class: TokenClass) -> Self {
        self.token_class = Some(token_class);
        self
    }

    pub fn for_token(mut self, token_id: impl Into<String>) -> Self {
        self.token_id = Some(token_id.into());
        self
    }

    /// Sets `expires_at` to `invalidated_at + lifetime + buffer`
    pub fn expiring_after(mut self, lifetime: Duration, buffer: Duration) -> Self {
        self.expires_at = self.invalidated_at + lifetime + buffer;
        self
    }

    /// Whether this record revokes the token described by `query`
    pub fn matches(&self, query: &RevocationQuery) -> bool {
        self.subject_id == query.subject_id
            && self.invalidated_at >= query.issued_at
            && self
                .device_id
                .as_deref()
                .map_or(true, |device| query.device_id.as_deref() == Some(device))
            && self.token_class.map_or(true, |class| class == query.token_class)
            && self
                .token_id
                .as_deref()
                .map_or(true, |id| query.token_id.as_deref() == Some(id))
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Description of a token whose revocation status is being checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationQuery {
    pub subject_id: String,

    /// `None` matches only device-wildcarded records
    pub device_id: Option<String>,

    pub token_class: TokenClass,

    pub issued_at: DateTime<Utc>,

    pub token_id: Option<String>,
}

impl RevocationQuery {
    pub fn new(
        subject_id: impl Into<String>,
        token_class: TokenClass,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            device_id: None,
            token_class,
            issued_at,
            token_id: None,
        }
    }

    pub fn with_device(mut self, device_id: Option<String>) -> Self {
        self.device_id = device_id;
        self
    }

    pub fn with_token_id(mut self, token_id: Option<String>) -> Self {
        self.token_id = token_id;
        self
    }
}

pub(crate) fn truncate_to_second(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.with_nanosecond(0).unwrap_or(instant)
}
