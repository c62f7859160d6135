//! Login, refresh and logout use cases

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::entities::identity::DEFAULT_DEVICE_ID;
use crate::domain::entities::token::TokenPair;
use crate::errors::{AuthError, AuthResult};
use crate::repositories::{CredentialVerifier, RevocationStore};
use crate::services::token::TokenService;

/// Authentication service for login and session management
pub struct AuthService<V: CredentialVerifier, S: RevocationStore> {
    verifier: V,
    tokens: Arc<TokenService<S>>,
}

impl<V: CredentialVerifier, S: RevocationStore> AuthService<V, S> {
    pub fn new(verifier: V, tokens: Arc<TokenService<S>>) -> Self {
        Self { verifier, tokens }
    }

    pub fn tokens(&self) -> &Arc<TokenService<S>> {
        &self.tokens
    }

    /// Verify credentials and issue a pair bound to `device_id`
    ///
    /// # Arguments
    ///
    /// * `email` - Login email
    /// * `password` - Plain-text password
    /// * `device_id` - Device derived from request metadata, `"default"` if absent
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Credentials accepted
    /// * `Err(AuthError)` - `InvalidArgument` for empty input, `InvalidCredentials`
    ///   for an unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str, device_id: Option<&str>) -> AuthResult<TokenPair> {
        self.login_at(email, password, device_id, Utc::now()).await
    }

    pub async fn login_at(
        &self,
        email: &str,
        password: &str,
        device_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> AuthResult<TokenPair> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::invalid_argument("email is required"));
        }
        if password.is_empty() {
            return Err(AuthError::invalid_argument("password is required"));
        }

        let subject_id = match self.verifier.verify(email, password).await? {
            Some(subject_id) => subject_id,
            None => {
                warn!("Login rejected");
                return Err(AuthError::invalid_credentials());
            }
        };

        let device_id = device_id
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DEVICE_ID);

        let pair = self.tokens.issue_pair_at(&subject_id, device_id, now)?;
        info!(subject_id = %subject_id, device_id, "Login succeeded");
        Ok(pair)
    }

    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<TokenPair> {
        self.tokens.refresh(refresh_token).await
    }

    pub async fn logout(&self, subject_id: &str) -> AuthResult<()> {
        self.tokens.logout(subject_id).await
    }

    pub async fn logout_device(&self, subject_id: &str, device_id: &str) -> AuthResult<()> {
        self.tokens.logout_device(subject_id, device_id).await
    }
}
