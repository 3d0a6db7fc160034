//! Shared error type across routeguard crates.

use thiserror::Error;

/// Client-facing codes (stable API).
///
/// Covers both error kinds and the non-error denial outcomes so the HTTP layer
/// can render every refusal with the same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed request context (bad path, bad encoding).
    BadRequest,
    /// Route pattern could not be compiled.
    InvalidPattern,
    /// Configuration rejected by validation.
    BadConfig,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// No rule matched and the caller refused the default.
    NoMatchingRule,
    /// Route denied to everyone.
    AccessDenied,
    /// Route requires an authenticated principal.
    Unauthorized,
    /// Request-forgery verification failed.
    IntegrityCheckFailed,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::InvalidPattern => "INVALID_PATTERN",
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::NoMatchingRule => "NO_MATCHING_RULE",
            ClientCode::AccessDenied => "ACCESS_DENIED",
            ClientCode::Unauthorized => "UNAUTHORIZED",
            ClientCode::IntegrityCheckFailed => "INTEGRITY_CHECK_FAILED",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RouteGuardError>;

/// Unified error type used by core and gateway.
///
/// Denials are not errors: they are [`crate::policy::Outcome`] values.
#[derive(Debug, Error)]
pub enum RouteGuardError {
    #[error("invalid request context: {0}")]
    InvalidRequestContext(String),
    #[error("no matching rule for path: {0}")]
    NoMatchingRule(String),
    #[error("invalid route pattern: {0}")]
    InvalidPattern(String),
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl RouteGuardError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            RouteGuardError::InvalidRequestContext(_) => ClientCode::BadRequest,
            RouteGuardError::NoMatchingRule(_) => ClientCode::NoMatchingRule,
            RouteGuardError::InvalidPattern(_) => ClientCode::InvalidPattern,
            RouteGuardError::BadConfig(_) => ClientCode::BadConfig,
            RouteGuardError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            RouteGuardError::Internal(_) => ClientCode::Internal,
        }
    }
}
