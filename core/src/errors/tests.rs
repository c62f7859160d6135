//! Unit tests for the error taxonomy

use std::error::Error as _;

use super::{AuthError, ErrorKind, ExternalStatus};

#[test]
fn test_builder_keeps_kind_and_message() {
    let error = AuthError::new(ErrorKind::TokenRevoked).with_message("revoked at logout");
    assert_eq!(error.kind(), ErrorKind::TokenRevoked);
    assert_eq!(error.message(), "revoked at logout");
    assert_eq!(error.to_string(), "token_revoked: revoked at logout");
}

#[test]
fn test_default_message() {
    assert_eq!(AuthError::malformed().message(), "invalid token");
    assert_eq!(AuthError::expired().to_string(), "token_expired: token has expired");
}

#[test]
fn test_source_is_exposed() {
    let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline");
    let error = AuthError::store_unavailable("lookup timed out").with_source(io);

    let source = error.source().expect("source should be attached");
    assert_eq!(source.to_string(), "deadline");
}

#[test]
fn test_status_mapping() {
    for kind in [
        ErrorKind::TokenMalformed,
        ErrorKind::TokenExpired,
        ErrorKind::WrongTokenType,
        ErrorKind::TokenRevoked,
        ErrorKind::Unauthorized,
        ErrorKind::InvalidCredentials,
    ] {
        assert_eq!(kind.status(), ExternalStatus::Unauthenticated, "{kind}");
    }
    assert_eq!(ErrorKind::InvalidArgument.status(), ExternalStatus::InvalidArgument);
    assert_eq!(ErrorKind::StoreUnavailable.status(), ExternalStatus::Unavailable);
    assert_eq!(ErrorKind::KeyConfig.status(), ExternalStatus::Internal);
    assert_eq!(ErrorKind::Internal.status(), ExternalStatus::Internal);
}

#[test]
fn test_only_store_outage_is_retryable() {
    assert!(AuthError::store_unavailable("down").is_retryable());
    assert!(!AuthError::revoked().is_retryable());
    assert!(!AuthError::expired().is_retryable());
    assert!(!AuthError::invalid_credentials().is_retryable());
}
