use actix_web::{web, HttpResponse};
use tracing::info;

use crate::dto::{LogoutDeviceRequest, MessageResponse};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::state::SharedAuthService;

/// Handler for POST /api/v1/auth/logout-device
///
/// Revokes the tokens of one device. The body may name the device; without a
/// body the caller's own device is signed out.
///
/// # Request Body (optional)
///
/// ```json
/// {
///     "device_id": "laptop"
/// }
/// ```
pub async fn logout_device(
    auth: web::Data<SharedAuthService>,
    context: AuthContext,
    request: Option<web::Json<LogoutDeviceRequest>>,
) -> Result<HttpResponse, ApiError> {
    let device_id = request
        .and_then(|body| body.into_inner().device_id)
        .map(|device_id| device_id.trim().to_string())
        .filter(|device_id| !device_id.is_empty())
        .unwrap_or(context.device_id);

    auth.logout_device(&context.subject_id, &device_id).await?;
    info!(subject_id = %context.subject_id, device_id = %device_id, "Device logged out");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Device logged out successfully")))
}
