//! MySQL implementations of the core storage traits

mod credential_verifier_impl;
mod revocation_store_impl;

pub use credential_verifier_impl::MySqlCredentialVerifier;
pub use revocation_store_impl::MySqlRevocationStore;
