mod memory;
mod r#trait;

pub use memory::InMemoryRevocationStore;
pub use r#trait::RevocationStore;

#[cfg(test)]
mod tests;
