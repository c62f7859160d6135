//! Authorization gate consulted by transport middleware

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::entities::identity::Identity;
use crate::errors::AuthResult;
use crate::repositories::RevocationStore;
use crate::services::token::TokenService;

use super::bearer::parse_bearer;
use super::registry::EndpointRegistry;

/// Decides whether a call may reach its handler
///
/// Without a token service (authentication disabled) every call passes.
pub struct AuthorizationGate<S: RevocationStore> {
    registry: EndpointRegistry,
    tokens: Option<Arc<TokenService<S>>>,
}

impl<S: RevocationStore> Clone for AuthorizationGate<S> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

impl<S: RevocationStore> AuthorizationGate<S> {
    pub fn new(registry: EndpointRegistry, tokens: Arc<TokenService<S>>) -> Self {
        Self {
            registry,
            tokens: Some(tokens),
        }
    }

    /// Gate that lets everything through
    pub fn disabled(registry: EndpointRegistry) -> Self {
        Self {
            registry,
            tokens: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.tokens.is_some()
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// Authorize one call
    ///
    /// `extract` is invoked only for protected endpoints and returns the raw
    /// `authorization` value, if any.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Public endpoint, or authentication disabled
    /// * `Ok(Some(Identity))` - Access token accepted
    /// * `Err(AuthError)` - `Unauthorized` for a missing or malformed header,
    ///   otherwise the validation failure
    pub async fn authorize<F>(&self, endpoint: &str, extract: F) -> AuthResult<Option<Identity>>
    where
        F: FnOnce() -> Option<String>,
    {
        self.authorize_at(endpoint, extract, Utc::now()).await
    }

    pub async fn authorize_at<F>(
        &self,
        endpoint: &str,
        extract: F,
        now: DateTime<Utc>,
    ) -> AuthResult<Option<Identity>>
    where
        F: FnOnce() -> Option<String>,
    {
        let tokens = match &self.tokens {
            Some(tokens) => tokens,
            None => return Ok(None),
        };
        if !self.registry.is_protected(endpoint) {
            return Ok(None);
        }

        let header = extract();
        let result = match parse_bearer(header.as_deref()) {
            Ok(token) => tokens.validate_access_at(token, now).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(claims) => {
                debug!(endpoint, subject_id = %claims.sub, "Call authorized");
                Ok(Some(Identity::new(claims.sub, claims.device_id)))
            }
            Err(e) => {
                warn!(endpoint, kind = %e.kind(), "Call rejected");
                Err(e)
            }
        }
    }
}
