//! Application factory
//!
//! Builds the actix-web `App` for one worker from the shared [`AppState`].

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error,
};
use tg_core::EndpointRegistry;
use tracing_actix_web::TracingLogger;

use crate::middleware::{ErrorHandlerMiddleware, JwtAuth};
use crate::routes::{self, PROTECTED_ENDPOINTS};
use crate::state::AppState;

/// Role every protected endpoint requires; any holder of a valid token has it
pub const DEFAULT_ROLE: &str = "user";

/// Registry of the endpoints `JwtAuth` protects
pub fn protected_endpoints() -> EndpointRegistry {
    PROTECTED_ENDPOINTS
        .iter()
        .fold(EndpointRegistry::new(), |registry, endpoint| {
            registry.with_endpoint(*endpoint, [DEFAULT_ROLE])
        })
}

/// Create and configure the application with all dependencies
///
/// Stage order, outermost first: error translation with request ids,
/// request tracing, authentication, then the handler.
pub fn create_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let gate = state.gate();
    let auth_service = state.auth.clone().map(web::Data::from);

    App::new()
        .app_data(web::Data::new(state))
        .wrap(JwtAuth::new(gate))
        .wrap(TracingLogger::default())
        .wrap(ErrorHandlerMiddleware)
        .configure(|cfg| routes::configure(cfg, auth_service))
        .default_service(web::route().to(routes::not_found))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_endpoints() {
        let registry = protected_endpoints();

        assert_eq!(registry.len(), 3);
        assert!(registry.is_protected("/api/v1/me"));
        assert!(registry.is_protected("/api/v1/auth/logout"));
        assert!(registry.is_protected("/api/v1/auth/logout-device"));
        assert!(!registry.is_protected("/api/v1/auth/login"));
        assert!(!registry.is_protected("/api/v1/auth/refresh"));
        assert!(!registry.is_protected("/health"));
        assert_eq!(registry.required_roles("/api/v1/me"), Some(&["user".to_string()][..]));
    }
}
