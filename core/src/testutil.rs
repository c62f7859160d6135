//! Helpers for tests: runtime-generated signing keys and ready-made services.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ed25519_dalek::pkcs8::spki::der::pem::LineEnding;
use ed25519_dalek::pkcs8::EncodePrivateKey;
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;

use crate::repositories::InMemoryRevocationStore;
use crate::services::token::{KeyManager, TokenService, TokenServiceConfig};

/// A fresh Ed25519 key
pub fn generate_signing_key() -> SigningKey {
    SigningKey::generate(&mut OsRng)
}

/// PKCS#8 PEM text of `key`
pub fn pem_for(key: &SigningKey) -> String {
    key.to_pkcs8_pem(LineEnding::LF)
        .expect("encode test key as PEM")
        .to_string()
}

/// Base64 of a fresh key's PEM, in the form `SIGNING_PRIVATE_KEY` expects
pub fn encoded_signing_key() -> String {
    STANDARD.encode(pem_for(&generate_signing_key()))
}

/// Key manager over a fresh key
pub fn key_manager() -> KeyManager {
    KeyManager::from_signing_key(&generate_signing_key()).expect("build test key manager")
}

/// Token service over a fresh key and an empty in-memory store
pub fn token_service(config: TokenServiceConfig) -> TokenService<InMemoryRevocationStore> {
    TokenService::new(key_manager(), InMemoryRevocationStore::new(), config)
}
