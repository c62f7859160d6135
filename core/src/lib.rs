//! # TokenGate Core
//!
//! Token lifecycle for the TokenGate backend: signing keys, the token codec,
//! the revocation store seam, issuance/validation/rotation/invalidation and
//! the per-request authorization gate.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

// Re-export commonly used types for convenience
pub use domain::{
    Claims, Identity, InvalidationRecord, RevocationQuery, TokenClass, TokenPair,
    DEFAULT_DEVICE_ID,
};
pub use errors::{AuthError, AuthResult, ErrorKind, ExternalStatus};
pub use repositories::{
    CredentialVerifier, InMemoryCredentialVerifier, InMemoryRevocationStore, RevocationStore,
};
pub use services::{
    parse_bearer, AuthService, AuthorizationGate, CleanupResult, EndpointRegistry, KeyManager,
    RevocationCleanupConfig, RevocationCleanupService, TokenCodec, TokenService,
    TokenServiceConfig,
};
