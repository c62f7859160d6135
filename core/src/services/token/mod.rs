//! Token service module
//!
//! This module handles all token-related operations including:
//! - Ed25519 key loading
//! - Token signing and verification
//! - Issuance, validation, refresh rotation and invalidation
//! - Background sweep of expired invalidation records

mod cleanup;
mod codec;
mod config;
mod key_manager;
mod service;


pub use cleanup::{CleanupResult, RevocationCleanupConfig, RevocationCleanupService};
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use key_manager::KeyManager;
pub use service::TokenService;
