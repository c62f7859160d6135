//! Ed25519 key management for token signing and verification

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use ed25519_dalek::pkcs8::spki::der::pem;
use ed25519_dalek::pkcs8::{DecodePrivateKey, EncodePrivateKey};
use ed25519_dalek::{SigningKey, VerifyingKey};
use jsonwebtoken::{DecodingKey, EncodingKey};
use tg_shared::config::AuthConfig;
use tracing::info;

use crate::errors::{AuthError, AuthResult};

/// PEM label of an unencrypted PKCS#8 private key
const EXPECTED_PEM_LABEL: &str = "PRIVATE KEY";

/// Process-wide signing and verification keys
///
/// Loaded once at startup and shared read-only by every codec call.
#[derive(Clone)]
pub struct KeyManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    verifying_key: VerifyingKey,
}

impl std::fmt::Debug for KeyManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyManager")
            .field("algorithm", &"EdDSA")
            .field("public_key", &URL_SAFE_NO_PAD.encode(self.verifying_key.as_bytes()))
            .finish()
    }
}

impl KeyManager {
    /// Loads the key pair from the authentication configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Some(KeyManager))` - Keys loaded
    /// * `Ok(None)` - Authentication is disabled, nothing was loaded
    /// * `Err(AuthError)` - `KeyConfig` error; startup must abort
    pub fn load(config: &AuthConfig) -> AuthResult<Option<Self>> {
        if !config.enabled {
            info!("Authentication disabled, skipping signing key load");
            return Ok(None);
        }

        let encoded = config
            .signing_private_key
            .as_deref()
            .ok_or_else(|| AuthError::key_config("SIGNING_PRIVATE_KEY is not set"))?;

        let manager = Self::from_base64_pem(encoded)?;
        info!(public_key = %manager.public_key_base64(), "Signing key loaded");
        Ok(Some(manager))
    }

    /// Parses a base64-encoded PKCS#8 PEM Ed25519 private key
    ///
    /// Surrounding quotes and literal `\n` sequences, as left behind by some
    /// env-file tooling, are tolerated.
    pub fn from_base64_pem(encoded: &str) -> AuthResult<Self> {
        let cleaned: String = encoded
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if cleaned.is_empty() {
            return Err(AuthError::key_config("SIGNING_PRIVATE_KEY is empty"));
        }

        let decoded = STANDARD.decode(cleaned.as_bytes()).map_err(|e| {
            AuthError::key_config("SIGNING_PRIVATE_KEY is not valid base64").with_source(e)
        })?;
        let pem_text = String::from_utf8(decoded).map_err(|e| {
            AuthError::key_config("SIGNING_PRIVATE_KEY does not decode to a PEM document")
                .with_source(e)
        })?;

        Self::from_pem(&pem_text.replace("\\n", "\n"))
    }

    /// Parses a PKCS#8 PEM Ed25519 private key
    pub fn from_pem(pem_text: &str) -> AuthResult<Self> {
        let label = pem::decode_label(pem_text.as_bytes())
            .map_err(|e| AuthError::key_config(format!("signing key is not a PEM block: {e}")))?;
        if label != EXPECTED_PEM_LABEL {
            return Err(AuthError::key_config(format!(
                "signing key has PEM type {label:?}, expected {EXPECTED_PEM_LABEL:?}"
            )));
        }

        let signing_key = SigningKey::from_pkcs8_pem(pem_text).map_err(|e| {
            AuthError::key_config(format!("signing key is not a valid Ed25519 PKCS#8 key: {e}"))
        })?;

        Self::from_signing_key(&signing_key)
    }

    /// Builds the manager from an in-memory signing key
    pub fn from_signing_key(signing_key: &SigningKey) -> AuthResult<Self> {
        let der = signing_key
            .to_pkcs8_der()
            .map_err(|e| AuthError::key_config(format!("failed to encode signing key: {e}")))?;
        let verifying_key = signing_key.verifying_key();

        let encoding_key = EncodingKey::from_ed_der(der.as_bytes());
        let decoding_key =
            DecodingKey::from_ed_components(&URL_SAFE_NO_PAD.encode(verifying_key.as_bytes()))
                .map_err(|e| AuthError::key_config("invalid verification key").with_source(e))?;

        Ok(Self {
            encoding_key,
            decoding_key,
            verifying_key,
        })
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Public key, base64url without padding
    pub fn public_key_base64(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.verifying_key.as_bytes())
    }
}
