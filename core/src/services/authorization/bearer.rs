//! Bearer credential parsing

use crate::errors::{AuthError, AuthResult};

pub const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the token from an `authorization` value of the form `Bearer <token>`
///
/// The scheme is case-sensitive and must be followed by exactly one space and
/// a non-empty token without whitespace.
pub fn parse_bearer(header: Option<&str>) -> AuthResult<&str> {
    let header = header.ok_or_else(|| {
        AuthError::unauthorized().with_message("authorization header is missing")
    })?;

    let token = header.strip_prefix(BEARER_PREFIX).ok_or_else(|| {
        AuthError::unauthorized().with_message("authorization header must be 'Bearer <token>'")
    })?;

    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return Err(AuthError::unauthorized().with_message("bearer token is malformed"));
    }

    Ok(token)
}
