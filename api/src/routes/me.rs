use actix_web::HttpResponse;

use crate::dto::MeResponse;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/me
///
/// Echoes the identity attached by the authentication middleware.
pub async fn me(context: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        subject_id: context.subject_id,
        device_id: context.device_id,
    })
}
