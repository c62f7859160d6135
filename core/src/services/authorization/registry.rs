//! Protected-endpoint registry

use std::collections::HashMap;

/// Static mapping of endpoint identifier to required roles
///
/// Built once by the composition root and read-only afterwards. Endpoints not
/// listed are public.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    endpoints: HashMap<String, Vec<String>>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a protected endpoint
    pub fn with_endpoint<I, R>(mut self, endpoint: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.endpoints
            .insert(endpoint.into(), roles.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_protected(&self, endpoint: &str) -> bool {
        self.endpoints.contains_key(endpoint)
    }

    /// Roles required by `endpoint`, `None` when public
    pub fn required_roles(&self, endpoint: &str) -> Option<&[String]> {
        self.endpoints.get(endpoint).map(Vec::as_slice)
    }

    /// Protected endpoint identifiers, sorted
    pub fn endpoints(&self) -> Vec<String> {
        let mut endpoints: Vec<String> = self.endpoints.keys().cloned().collect();
        endpoints.sort();
        endpoints
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
