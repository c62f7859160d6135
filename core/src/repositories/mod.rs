//! Storage seams: the revocation store and the credential check.

pub mod credentials;
pub mod revocation;

pub use credentials::{CredentialVerifier, InMemoryCredentialVerifier};
pub use revocation::{InMemoryRevocationStore, RevocationStore};
