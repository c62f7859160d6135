//! Domain layer: tokens, invalidation records and request identities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{
    Claims, Identity, InvalidationRecord, RevocationQuery, TokenClass, TokenPair,
    DEFAULT_DEVICE_ID,
};
