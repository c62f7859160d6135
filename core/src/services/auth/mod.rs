//! Authentication service module
//!
//! Login against an external credential check, plus the refresh and logout
//! operations exposed to transports.

mod service;


pub use service::AuthService;
