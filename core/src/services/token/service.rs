//! Token lifecycle: issuance, validation, rotation and invalidation

use std::future::Future;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::entities::identity::DEFAULT_DEVICE_ID;
use crate::domain::entities::revocation::{InvalidationRecord, RevocationQuery};
use crate::domain::entities::token::{Claims, TokenClass, TokenPair};
use crate::errors::{AuthError, AuthResult};
use crate::repositories::RevocationStore;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::key_manager::KeyManager;

/// Service composing the token codec with the revocation store
///
/// Every operation has an `_at` form taking the current instant explicitly;
/// the plain form uses the system clock.
pub struct TokenService<S: RevocationStore> {
    codec: TokenCodec,
    store: S,
    config: TokenServiceConfig,
}

impl<S: RevocationStore> TokenService<S> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `keys` - Loaded signing key pair
    /// * `store` - Revocation store consulted on every validation
    /// * `config` - Lifetimes and store timeout
    pub fn new(keys: KeyManager, store: S, config: TokenServiceConfig) -> Self {
        let codec = TokenCodec::new(keys, config.access_ttl, config.refresh_ttl);
        Self { codec, store, config }
    }

    /// Embed these endpoint identifiers in every access token
    pub fn with_audience(mut self, audience: Vec<String>) -> Self {
        self.codec = self.codec.with_audience(audience);
        self
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    pub fn issue_pair(&self, subject_id: &str, device_id: &str) -> AuthResult<TokenPair> {
        self.issue_pair_at(subject_id, device_id, Utc::now())
    }

    /// Signs a new access/refresh pair; no revocation bookkeeping
    pub fn issue_pair_at(
        &self,
        subject_id: &str,
        device_id: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<TokenPair> {
        if subject_id.is_empty() {
            return Err(AuthError::invalid_argument("subject id must not be empty"));
        }
        let device_id = if device_id.is_empty() { DEFAULT_DEVICE_ID } else { device_id };

        let access_token = self.codec.sign_access(subject_id, device_id, now)?;
        let refresh_token = self.codec.sign_refresh(subject_id, device_id, now)?;

        debug!(subject_id, device_id, "Issued token pair");
        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_ttl.num_seconds(),
            self.config.refresh_ttl.num_seconds(),
        ))
    }

    pub async fn validate_access(&self, token: &str) -> AuthResult<Claims> {
        self.validate_access_at(token, Utc::now()).await
    }

    /// Verifies an access token and checks it against device-wildcarded records
    pub async fn validate_access_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        let claims = self.codec.verify(token, TokenClass::Access, now)?;
        let issued_at = claims.issued_at().ok_or_else(AuthError::malformed)?;

        let query = RevocationQuery::new(claims.sub.clone(), TokenClass::Access, issued_at);
        if self.guarded("is_revoked", self.store.is_revoked(&query)).await? {
            debug!(subject_id = %claims.sub, "Access token revoked");
            return Err(AuthError::revoked());
        }

        Ok(claims)
    }

    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        self.refresh_at(refresh_token, Utc::now()).await
    }

    /// Exchanges a refresh token for a new pair, consuming it
    ///
    /// The consumed token's ID is claimed in the store after the new pair is
    /// signed. When two calls race on one token only the first claim succeeds;
    /// the loser gets `TokenRevoked` and its freshly signed pair is dropped.
    pub async fn refresh_at(&self, refresh_token: &str, now: DateTime<Utc>) -> AuthResult<TokenPair> {
        let claims = self.codec.verify(refresh_token, TokenClass::Refresh, now)?;
        let issued_at = claims.issued_at().ok_or_else(AuthError::malformed)?;
        let device_id = claims
            .device_id
            .clone()
            .ok_or_else(|| AuthError::malformed().with_message("refresh token has no device"))?;
        let token_id = claims
            .jti
            .clone()
            .ok_or_else(|| AuthError::malformed().with_message("refresh token has no id"))?;

        let query = RevocationQuery::new(claims.sub.clone(), TokenClass::Refresh, issued_at)
            .with_device(Some(device_id.clone()))
            .with_token_id(Some(token_id.clone()));
        if self.guarded("is_revoked", self.store.is_revoked(&query)).await? {
            debug!(subject_id = %claims.sub, device_id = %device_id, "Refresh token revoked");
            return Err(AuthError::revoked());
        }

        let pair = self.issue_pair_at(&claims.sub, &device_id, now)?;

        let consumption = InvalidationRecord::new(claims.sub.clone(), now)
            .for_device(device_id.clone())
            .for_class(TokenClass::Refresh)
            .for_token(token_id)
            .expiring_after(self.config.refresh_ttl, self.config.expiry_buffer);
        let claimed = self
            .guarded("record_consumption", self.store.record_consumption(consumption))
            .await?;
        if !claimed {
            warn!(subject_id = %claims.sub, device_id = %device_id, "Refresh token reused");
            return Err(AuthError::revoked());
        }

        info!(subject_id = %claims.sub, device_id = %device_id, "Token pair rotated");
        Ok(pair)
    }

    pub async fn logout(&self, subject_id: &str) -> AuthResult<()> {
        self.logout_at(subject_id, Utc::now()).await
    }

    /// Revokes every token the subject holds on every device
    pub async fn logout_at(&self, subject_id: &str, now: DateTime<Utc>) -> AuthResult<()> {
        require_subject(subject_id)?;

        let access = InvalidationRecord::new(subject_id, now)
            .for_class(TokenClass::Access)
            .expiring_after(self.config.access_ttl, self.config.expiry_buffer);
        let refresh = InvalidationRecord::new(subject_id, now)
            .for_class(TokenClass::Refresh)
            .expiring_after(self.config.refresh_ttl, self.config.expiry_buffer);

        self.guarded("record", self.store.record(access)).await?;
        self.guarded("record", self.store.record(refresh)).await?;

        info!(subject_id, "Subject logged out on all devices");
        Ok(())
    }

    pub async fn logout_device(&self, subject_id: &str, device_id: &str) -> AuthResult<()> {
        self.logout_device_at(subject_id, device_id, Utc::now()).await
    }

    /// Revokes both classes of token issued to one device
    pub async fn logout_device_at(
        &self,
        subject_id: &str,
        device_id: &str,
        now: DateTime<Utc>,
    ) -> AuthResult<()> {
        require_subject(subject_id)?;
        if device_id.is_empty() {
            return Err(AuthError::invalid_argument("device id must not be empty"));
        }

        let record = InvalidationRecord::new(subject_id, now)
            .for_device(device_id)
            .expiring_after(self.config.refresh_ttl, self.config.expiry_buffer);
        self.guarded("record", self.store.record(record)).await?;

        info!(subject_id, device_id, "Device logged out");
        Ok(())
    }

    /// Revokes every token of the subject issued at or before `before`
    pub async fn invalidate_before(&self, subject_id: &str, before: DateTime<Utc>) -> AuthResult<()> {
        require_subject(subject_id)?;

        let record = InvalidationRecord::new(subject_id, before)
            .expiring_after(self.config.refresh_ttl, self.config.expiry_buffer);
        self.guarded("record", self.store.record(record)).await?;

        info!(subject_id, before = %before, "Tokens invalidated before instant");
        Ok(())
    }

    /// Bounds a store call by the configured timeout
    async fn guarded<T, F>(&self, operation: &'static str, call: F) -> AuthResult<T>
    where
        F: Future<Output = AuthResult<T>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result,
            Err(elapsed) => {
                warn!(operation, timeout = ?self.config.store_timeout, "Revocation store call timed out");
                Err(AuthError::store_unavailable(format!("{operation} timed out")).with_source(elapsed))
            }
        }
    }
}

fn require_subject(subject_id: &str) -> AuthResult<()> {
    if subject_id.is_empty() {
        return Err(AuthError::invalid_argument("subject id must not be empty"));
    }
    Ok(())
}
