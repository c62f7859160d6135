//! Shared application state handed to every worker

use std::sync::Arc;
use std::time::Duration;

use tg_core::{
    AuthService, AuthorizationGate, CredentialVerifier, EndpointRegistry, RevocationStore,
};
use tg_shared::config::RevocationConfig;

/// Revocation store behind a trait object, so MySQL and in-memory stores plug in alike
pub type SharedStore = Arc<dyn RevocationStore>;

/// Credential check behind a trait object
pub type SharedVerifier = Arc<dyn CredentialVerifier>;

/// Auth service over the shared seams
pub type SharedAuthService = AuthService<SharedVerifier, SharedStore>;

/// Everything `create_app` needs to build one worker's `App`
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    /// `None` when authentication is disabled
    pub auth: Option<Arc<SharedAuthService>>,
    pub registry: EndpointRegistry,
    /// Bound on store calls made outside the token service
    pub store_timeout: Duration,
}

impl AppState {
    pub fn new(store: SharedStore, auth: Option<Arc<SharedAuthService>>, registry: EndpointRegistry) -> Self {
        Self {
            store,
            auth,
            registry,
            store_timeout: RevocationConfig::default().store_timeout,
        }
    }

    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    pub fn is_auth_enabled(&self) -> bool {
        self.auth.is_some()
    }

    /// Gate enforcing `registry`, or a pass-through gate when auth is disabled
    pub fn gate(&self) -> AuthorizationGate<SharedStore> {
        match &self.auth {
            Some(auth) => AuthorizationGate::new(self.registry.clone(), Arc::clone(auth.tokens())),
            None => AuthorizationGate::disabled(self.registry.clone()),
        }
    }
}
