//! Token codec: signs and verifies token strings.
//!
//! Verification is a pure function of the token, the current instant and the
//! public key. Expiry is checked against the caller-supplied instant rather
//! than the system clock so that every time-dependent rule is testable.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use tracing::debug;

use crate::domain::entities::token::{Claims, TokenClass};
use crate::errors::{AuthError, AuthResult};

use super::key_manager::KeyManager;

/// Encodes and decodes signed tokens
#[derive(Clone, Debug)]
pub struct TokenCodec {
    keys: KeyManager,
    access_ttl: Duration,
    refresh_ttl: Duration,
    audience: Vec<String>,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(keys: KeyManager, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::EdDSA);
        // expiry is checked against the caller's `now`
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            keys,
            access_ttl,
            refresh_ttl,
            audience: Vec::new(),
            validation,
        }
    }

    /// Endpoint identifiers embedded as `aud` in access tokens
    pub fn with_audience(mut self, audience: Vec<String>) -> Self {
        self.audience = audience;
        self
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }

    /// Signs an access token issued at `now`
    pub fn sign_access(&self, subject_id: &str, device_id: &str, now: DateTime<Utc>) -> AuthResult<String> {
        let claims = Claims::new_access(
            subject_id,
            device_id,
            self.audience.clone(),
            now,
            self.access_ttl,
        );
        self.sign(&claims)
    }

    /// Signs a refresh token issued at `now` with a fresh token ID
    pub fn sign_refresh(&self, subject_id: &str, device_id: &str, now: DateTime<Utc>) -> AuthResult<String> {
        let claims = Claims::new_refresh(subject_id, device_id, now, self.refresh_ttl);
        self.sign(&claims)
    }

    /// Signs arbitrary claims
    pub fn sign(&self, claims: &Claims) -> AuthResult<String> {
        encode(&Header::new(Algorithm::EdDSA), claims, self.keys.encoding_key())
            .map_err(|e| AuthError::internal("failed to sign token").with_source(e))
    }

    /// Verifies signature, expiry and class
    ///
    /// # Errors
    ///
    /// * `TokenMalformed` - unparsable, bad signature or unexpected algorithm
    /// * `TokenExpired` - `now` is at or past `exp`
    /// * `WrongTokenType` - class missing, unknown or not `expected`
    pub fn verify(&self, token: &str, expected: TokenClass, now: DateTime<Utc>) -> AuthResult<Claims> {
        let data = decode::<Claims>(token, self.keys.decoding_key(), &self.validation).map_err(|e| {
            debug!(reason = ?e.kind(), "Token rejected by decoder");
            match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::expired(),
                _ => AuthError::malformed().with_source(e),
            }
        })?;
        let claims = data.claims;

        if claims.is_expired_at(now) {
            return Err(AuthError::expired());
        }

        match claims.token_class() {
            Some(class) if class == expected => Ok(claims),
            _ => Err(AuthError::wrong_token_type().with_message(format!(
                "expected {expected} token"
            ))),
        }
    }
}
