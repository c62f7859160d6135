//! Per-request authorization: endpoint registry, bearer parsing and the gate.

mod bearer;
mod gate;
mod registry;

#[cfg(test)]
mod tests;

pub use bearer::{parse_bearer, BEARER_PREFIX};
pub use gate::AuthorizationGate;
pub use registry::EndpointRegistry;
