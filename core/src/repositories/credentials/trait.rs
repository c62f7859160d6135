//! Credential check used by login.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::AuthResult;

/// External check of an email/password pair
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Resolve the subject ID for valid credentials
    ///
    /// # Returns
    /// * `Ok(Some(subject_id))` - The credentials are valid
    /// * `Ok(None)` - Unknown email or wrong password (indistinguishable)
    /// * `Err(AuthError)` - The backing store failed
    async fn verify(&self, email: &str, password: &str) -> AuthResult<Option<String>>;
}

#[async_trait]
impl<T: CredentialVerifier + ?Sized> CredentialVerifier for Arc<T> {
    async fn verify(&self, email: &str, password: &str) -> AuthResult<Option<String>> {
        (**self).verify(email, password).await
    }
}
