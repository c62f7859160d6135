//! Error taxonomy for the token lifecycle.
//!
//! Every failure is an immutable [`AuthError`] value: a kind, a message and an
//! optional wrapped cause, assembled through a consuming builder. Transports
//! map the kind to an [`ExternalStatus`] and never look at the message to
//! decide behaviour.

use std::fmt;

use thiserror::Error;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Classification of an authentication failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Signing key missing or unusable (startup only)
    KeyConfig,
    /// Token could not be parsed or its signature did not verify
    TokenMalformed,
    /// Token is past its expiry instant
    TokenExpired,
    /// Token class differs from the one the caller expects
    WrongTokenType,
    /// A matching invalidation record exists
    TokenRevoked,
    /// Credential missing or not in `Bearer <token>` form
    Unauthorized,
    /// Login rejected
    InvalidCredentials,
    /// Request input rejected before any credential check
    InvalidArgument,
    /// Revocation store timed out or failed
    StoreUnavailable,
    /// Anything else
    Internal,
}

/// Externally visible status a transport reports for an error kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalStatus {
    Unauthenticated,
    InvalidArgument,
    Unavailable,
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::KeyConfig => "key_config",
            ErrorKind::TokenMalformed => "token_malformed",
            ErrorKind::TokenExpired => "token_expired",
            ErrorKind::WrongTokenType => "wrong_token_type",
            ErrorKind::TokenRevoked => "token_revoked",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::StoreUnavailable => "store_unavailable",
            ErrorKind::Internal => "internal",
        }
    }

    /// Default message used when none is supplied
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::KeyConfig => "signing key configuration is invalid",
            ErrorKind::TokenMalformed => "invalid token",
            ErrorKind::TokenExpired => "token has expired",
            ErrorKind::WrongTokenType => "wrong token type",
            ErrorKind::TokenRevoked => "token has been revoked",
            ErrorKind::Unauthorized => "missing or malformed authorization header",
            ErrorKind::InvalidCredentials => "invalid email or password",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::StoreUnavailable => "revocation store unavailable",
            ErrorKind::Internal => "internal error",
        }
    }

    /// Status reported at the transport boundary
    pub fn status(&self) -> ExternalStatus {
        match self {
            ErrorKind::TokenMalformed
            | ErrorKind::TokenExpired
            | ErrorKind::WrongTokenType
            | ErrorKind::TokenRevoked
            | ErrorKind::Unauthorized
            | ErrorKind::InvalidCredentials => ExternalStatus::Unauthenticated,
            ErrorKind::InvalidArgument => ExternalStatus::InvalidArgument,
            ErrorKind::StoreUnavailable => ExternalStatus::Unavailable,
            ErrorKind::KeyConfig | ErrorKind::Internal => ExternalStatus::Internal,
        }
    }

    /// Only a store outage is worth retrying with the same input
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::StoreUnavailable)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication error: kind, message and optional cause
#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct AuthError {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<BoxedSource>,
}

impl AuthError {
    /// Start building an error of the given kind with its default message
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            source: None,
        }
    }

    /// Replace the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the underlying cause
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Into<BoxedSource>,
    {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> ExternalStatus {
        self.kind.status()
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    pub fn key_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::KeyConfig).with_message(message)
    }

    pub fn malformed() -> Self {
        Self::new(ErrorKind::TokenMalformed)
    }

    pub fn expired() -> Self {
        Self::new(ErrorKind::TokenExpired)
    }

    pub fn wrong_token_type() -> Self {
        Self::new(ErrorKind::WrongTokenType)
    }

    pub fn revoked() -> Self {
        Self::new(ErrorKind::TokenRevoked)
    }

    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Unauthorized)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorKind::InvalidCredentials)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument).with_message(message)
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::StoreUnavailable).with_message(message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal).with_message(message)
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests;
