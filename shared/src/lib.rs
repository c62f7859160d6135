//! Shared utilities and common types for the TokenGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types, loaded once by the composition root
//! - The wire-level error response body
//! - Duration parsing helpers for configuration values

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, LogFormat, LoggingConfig,
    RevocationConfig, ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
