//! Domain-specific error types for token and authentication operations
//!
//! The detailed variants are for logs and tests. Callers outside the core only
//! ever see the generic responses produced by `DomainError::to_error_response`.

use tc_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is malformed")]
    TokenMalformed,

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token algorithm does not match the pinned algorithm")]
    AlgorithmMismatch,

    #[error("Token issuer or audience is invalid")]
    InvalidIssuerAudience,

    #[error("Token expired")]
    TokenExpired,

    #[error("Refresh token does not match the stored token")]
    RefreshTokenMismatch,

    #[error("Refresh token expired")]
    RefreshTokenExpired,

    #[error("Refresh token was rotated concurrently")]
    ConcurrentRotationConflict,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Whether the failure came from the refresh token side of an exchange
    pub fn is_refresh_failure(&self) -> bool {
        matches!(
            self,
            TokenError::RefreshTokenMismatch
                | TokenError::RefreshTokenExpired
                | TokenError::ConcurrentRotationConflict
        )
    }
}

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Principal not found")]
    UnknownPrincipal,

    #[error("Invalid email")]
    InvalidEmail,

    /// A first session was requested for a principal that already has one
    #[error("Session already exists")]
    SessionAlreadyExists,
}

impl IntoErrorResponse for AuthError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            AuthError::UnknownPrincipal | AuthError::SessionAlreadyExists => {
                ErrorResponse::access_denied()
            }
            AuthError::InvalidEmail => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid email")
                    .add_detail("field", "email")
            }
        }
    }
}

/// Configuration errors raised while building the signing setup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Configuration invalid: {message}")]
    ConfigurationInvalid { message: String },
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ConfigError::ConfigurationInvalid {
            message: message.into(),
        }
    }
}

impl IntoErrorResponse for ConfigError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
    }
}

/// Which external operation a failure is reported for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureScope {
    /// Access token presented to a protected operation
    Authentication,
    /// Expired access token plus refresh token exchange
    Refresh,
}
