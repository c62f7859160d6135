use actix_web::{web, HttpResponse};

use crate::dto::{RefreshTokenRequest, TokenResponse};
use crate::handlers::ApiError;
use crate::state::SharedAuthService;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new pair. The presented token is consumed:
/// presenting it a second time fails with 401.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Malformed, expired, revoked or already used token, or an access token
/// - 503 Service Unavailable: Revocation store unreachable
pub async fn refresh(
    auth: web::Data<SharedAuthService>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError> {
    let pair = auth.refresh(&request.refresh_token).await?;
    Ok(HttpResponse::Ok().json(TokenResponse::from(pair)))
}
