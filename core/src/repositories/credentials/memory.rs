//! In-memory credential verifier holding bcrypt hashes

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::{AuthError, AuthResult};

use super::r#trait::CredentialVerifier;

#[derive(Clone)]
struct StoredUser {
    subject_id: String,
    password_hash: String,
}

/// Credential verifier backed by a map of email to bcrypt hash
#[derive(Clone)]
pub struct InMemoryCredentialVerifier {
    users: Arc<RwLock<HashMap<String, StoredUser>>>,
    cost: u32,
}

impl Default for InMemoryCredentialVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCredentialVerifier {
    pub fn new() -> Self {
        Self::with_cost(bcrypt::DEFAULT_COST)
    }

    /// Use a specific bcrypt cost (tests use the minimum)
    pub fn with_cost(cost: u32) -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            cost,
        }
    }

    /// Register a user, hashing the password
    pub async fn add_user(
        &self,
        email: impl Into<String>,
        subject_id: impl Into<String>,
        password: &str,
    ) -> AuthResult<()> {
        let password_hash = bcrypt::hash(password, self.cost)
            .map_err(|e| AuthError::internal("failed to hash password").with_source(e))?;

        self.users.write().await.insert(
            email.into().to_lowercase(),
            StoredUser {
                subject_id: subject_id.into(),
                password_hash,
            },
        );
        Ok(())
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryCredentialVerifier {
    async fn verify(&self, email: &str, password: &str) -> AuthResult<Option<String>> {
        let user = match self.users.read().await.get(&email.to_lowercase()) {
            Some(user) => user.clone(),
            None => return Ok(None),
        };

        let matches = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AuthError::internal("stored password hash is invalid").with_source(e))?;

        Ok(matches.then_some(user.subject_id))
    }
}
