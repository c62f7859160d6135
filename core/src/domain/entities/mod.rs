//! Domain entities representing core business objects.

pub mod identity;
pub mod revocation;
pub mod token;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use identity::{Identity, DEFAULT_DEVICE_ID};
pub use revocation::{InvalidationRecord, RevocationQuery};
pub use token::{Claims, TokenClass, TokenPair};
