//! # TokenGate API
//!
//! actix-web transport for the token service: bearer-token middleware,
//! error translation, the authentication routes and the composition root.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod lifecycle;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use app::{create_app, protected_endpoints};
pub use lifecycle::Application;
pub use state::{AppState, SharedAuthService, SharedStore, SharedVerifier};
