mod memory;
mod r#trait;

pub use memory::InMemoryCredentialVerifier;
pub use r#trait::CredentialVerifier;
