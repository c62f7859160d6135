use actix_web::{web, HttpResponse};
use tracing::info;

use crate::dto::MessageResponse;
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::state::SharedAuthService;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes every access and refresh token the caller holds on all devices.
/// Requires a valid access token.
pub async fn logout(
    auth: web::Data<SharedAuthService>,
    context: AuthContext,
) -> Result<HttpResponse, ApiError> {
    auth.logout(&context.subject_id).await?;
    info!(subject_id = %context.subject_id, "User logged out of all devices");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")))
}
