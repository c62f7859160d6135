//! HTTP routes

pub mod auth;
pub mod health;
pub mod me;

use actix_web::{web, HttpRequest, HttpResponse};
use tg_shared::{error_codes, ErrorResponse};
use tracing::debug;

use crate::middleware::RequestIdExt;
use crate::state::SharedAuthService;

/// Identifiers of the endpoints that require a valid access token
pub const PROTECTED_ENDPOINTS: [&str; 3] = [
    "/api/v1/auth/logout",
    "/api/v1/auth/logout-device",
    "/api/v1/me",
];

/// Register every route
///
/// Authentication routes are mounted only when `auth_service` is present.
pub fn configure(cfg: &mut web::ServiceConfig, auth_service: Option<web::Data<SharedAuthService>>) {
    cfg.route("/health", web::get().to(health::health_check));

    if let Some(auth_service) = auth_service {
        cfg.service(
            web::scope("/api/v1")
                .app_data(auth_service)
                .service(web::scope("/auth").configure(auth::configure))
                .route("/me", web::get().to(me::me)),
        );
    }
}

/// Default 404 handler
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    debug!(
        request_id = req.request_id().as_deref().unwrap_or("-"),
        path = req.path(),
        "No route matched"
    );
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
