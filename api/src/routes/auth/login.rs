use actix_web::{web, HttpRequest, HttpResponse};

use crate::dto::{LoginRequest, TokenResponse};
use crate::handlers::ApiError;
use crate::middleware::derive_device_id;
use crate::state::SharedAuthService;

/// Handler for POST /api/v1/auth/login
///
/// Verifies email and password and issues a token pair bound to the caller's
/// device. The device comes from the request body, else the `x-device-id`
/// header, else `user-agent`, else `"default"`.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "user@example.com",
///     "password": "secret",
///     "device_id": "phone"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "Bearer",
///     "expires_in": 900,
///     "refresh_expires_in": 259200
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Empty email or password
/// - 401 Unauthorized: Unknown email or wrong password
/// - 503 Service Unavailable: Credential lookup failed
pub async fn login(
    auth: web::Data<SharedAuthService>,
    req: HttpRequest,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = request.into_inner();
    let device_id = match request.device_id {
        Some(device_id) if !device_id.trim().is_empty() => device_id,
        _ => derive_device_id(&req),
    };

    let pair = auth
        .login(&request.email, &request.password, Some(&device_id))
        .await?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}
