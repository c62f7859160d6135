//! Business services containing domain logic and use cases.

pub mod auth;
pub mod authorization;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use authorization::{parse_bearer, AuthorizationGate, EndpointRegistry};
pub use token::{
    CleanupResult, KeyManager, RevocationCleanupConfig, RevocationCleanupService, TokenCodec,
    TokenService, TokenServiceConfig,
};
