//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AuthError, ConfigError, FailureScope, TokenError};

use tc_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Refresh store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Refresh store call timed out after {timeout_ms}ms")]
    StoreTimeout { timeout_ms: u64 },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// The token failure behind this error, if any
    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            DomainError::Token(err) => Some(err),
            _ => None,
        }
    }

    /// Maps the error to what an external caller is allowed to see.
    ///
    /// Every token failure collapses into one generic rejection per scope so
    /// callers cannot tell a bad signature from a wrong algorithm or an
    /// unknown refresh token.
    pub fn to_error_response(&self, scope: FailureScope) -> ErrorResponse {
        match self {
            DomainError::Token(_) | DomainError::Auth(AuthError::UnknownPrincipal) => {
                match scope {
                    FailureScope::Authentication => ErrorResponse::access_denied(),
                    FailureScope::Refresh => ErrorResponse::refresh_denied(),
                }
            }
            DomainError::Auth(err) => err.to_error_response(),
            DomainError::StoreUnavailable { .. } | DomainError::StoreTimeout { .. } => {
                ErrorResponse::new(
                    error_codes::SERVICE_UNAVAILABLE,
                    "Service temporarily unavailable, retry later",
                )
            }
            DomainError::Config(err) => err.to_error_response(),
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
            }
        }
    }
}
