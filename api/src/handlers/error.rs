//! Translation of domain errors into HTTP responses

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tg_core::errors::{AuthError, ErrorKind, ExternalStatus};
use tg_shared::{error_codes, ErrorResponse};

/// Error returned by handlers and the authentication middleware
///
/// The HTTP status is derived from the error kind only. Internal details
/// never reach the client.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] AuthError);

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        self.0.kind()
    }

    pub fn into_inner(self) -> AuthError {
        self.0
    }

    fn error_code(&self) -> &'static str {
        match self.0.status() {
            ExternalStatus::Unauthenticated => error_codes::UNAUTHENTICATED,
            ExternalStatus::InvalidArgument => error_codes::INVALID_ARGUMENT,
            ExternalStatus::Unavailable => error_codes::UNAVAILABLE,
            ExternalStatus::Internal => error_codes::INTERNAL_ERROR,
        }
    }

    fn client_message(&self) -> &str {
        match self.0.kind() {
            ErrorKind::Internal | ErrorKind::KeyConfig | ErrorKind::StoreUnavailable => {
                self.0.kind().default_message()
            }
            _ => self.0.message(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.0.status() {
            ExternalStatus::Unauthenticated => StatusCode::UNAUTHORIZED,
            ExternalStatus::InvalidArgument => StatusCode::BAD_REQUEST,
            ExternalStatus::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ExternalStatus::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = ErrorResponse::new(self.error_code(), self.client_message())
            .add_detail("reason", self.0.kind().as_str());
        if self.0.is_retryable() {
            body = body.add_detail("retryable", true);
        }

        HttpResponse::build(self.status_code()).json(body)
    }
}
