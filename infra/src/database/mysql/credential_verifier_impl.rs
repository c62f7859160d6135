//! MySQL implementation of the CredentialVerifier trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use tracing::debug;

use tg_core::errors::{AuthError, AuthResult};
use tg_core::repositories::CredentialVerifier;

/// Checks email/password pairs against the `users` table
///
/// Expects columns `id` (subject identifier), `email` and `password_hash`
/// (bcrypt).
pub struct MySqlCredentialVerifier {
    pool: MySqlPool,
}

impl MySqlCredentialVerifier {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialVerifier for MySqlCredentialVerifier {
    async fn verify(&self, email: &str, password: &str) -> AuthResult<Option<String>> {
        let row = sqlx::query("SELECT id, password_hash FROM users WHERE email = ? LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::store_unavailable("credential lookup failed").with_source(e))?;

        let Some(row) = row else {
            debug!("No user for login email");
            return Ok(None);
        };

        let subject_id: String = row
            .try_get("id")
            .map_err(|e| AuthError::internal("failed to read user id").with_source(e))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| AuthError::internal("failed to read password hash").with_source(e))?;

        // bcrypt is CPU bound
        let password = password.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
            .await
            .map_err(|e| AuthError::internal("password check task failed").with_source(e))?
            .map_err(|e| AuthError::internal("stored password hash is invalid").with_source(e))?;

        Ok(matches.then_some(subject_id))
    }
}
