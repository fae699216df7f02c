//! Unit tests for domain error types

use crate::errors::{AuthError, ConfigError, DomainError, FailureScope, TokenError};

#[test]
fn test_token_failures_collapse_to_access_denied() {
    let failures = [
        TokenError::TokenMalformed,
        TokenError::SignatureInvalid,
        TokenError::AlgorithmMismatch,
        TokenError::InvalidIssuerAudience,
        TokenError::TokenExpired,
    ];

    for failure in failures {
        let response = DomainError::from(failure.clone()).to_error_response(FailureScope::Authentication);
        assert_eq!(response.error, "ACCESS_DENIED", "{failure:?}");
        assert_eq!(response.message, "Access denied, re-authenticate");
        assert!(response.details.is_none());
    }
}

#[test]
fn test_refresh_failures_collapse_to_refresh_denied() {
    let failures = [
        TokenError::SignatureInvalid,
        TokenError::AlgorithmMismatch,
        TokenError::RefreshTokenMismatch,
        TokenError::RefreshTokenExpired,
        TokenError::ConcurrentRotationConflict,
    ];

    for failure in failures {
        let response = DomainError::from(failure.clone()).to_error_response(FailureScope::Refresh);
        assert_eq!(response.error, "REFRESH_DENIED", "{failure:?}");
        assert!(response.details.is_none());
    }
}

#[test]
fn test_unknown_principal_is_not_distinguishable() {
    let unknown = DomainError::from(AuthError::UnknownPrincipal).to_error_response(FailureScope::Refresh);
    let mismatch =
        DomainError::from(TokenError::RefreshTokenMismatch).to_error_response(FailureScope::Refresh);

    assert_eq!(unknown.error, mismatch.error);
    assert_eq!(unknown.message, mismatch.message);
}

#[test]
fn test_store_failures_map_to_service_unavailable() {
    let timeout = DomainError::StoreTimeout { timeout_ms: 2000 };
    let unavailable = DomainError::StoreUnavailable {
        message: "connection refused at 10.0.0.4".to_string(),
    };

    let response = timeout.to_error_response(FailureScope::Refresh);
    assert_eq!(response.error, "SERVICE_UNAVAILABLE");

    let response = unavailable.to_error_response(FailureScope::Authentication);
    assert_eq!(response.error, "SERVICE_UNAVAILABLE");
    assert!(!response.message.contains("10.0.0.4"));
}

#[test]
fn test_config_error_is_internal() {
    let error = DomainError::from(ConfigError::invalid("secret too short"));
    let response = error.to_error_response(FailureScope::Authentication);

    assert_eq!(response.error, "INTERNAL_ERROR");
    assert!(!response.message.contains("secret"));
    assert!(error.to_string().contains("secret too short"));
}

#[test]
fn test_invalid_email_is_validation_error() {
    let response = DomainError::from(AuthError::InvalidEmail).to_error_response(FailureScope::Authentication);
    assert_eq!(response.error, "VALIDATION_ERROR");
    assert_eq!(response.details.unwrap()["field"], "email");
}

#[test]
fn test_existing_session_is_generic_denial() {
    let error = DomainError::from(AuthError::SessionAlreadyExists);
    let response = error.to_error_response(FailureScope::Authentication);

    assert_eq!(response.error, "ACCESS_DENIED");
    assert!(response.details.is_none());
}

#[test]
fn test_token_error_accessor() {
    let error = DomainError::from(TokenError::RefreshTokenExpired);
    assert_eq!(error.token_error(), Some(&TokenError::RefreshTokenExpired));
    assert!(error.token_error().unwrap().is_refresh_failure());
    assert!(!TokenError::SignatureInvalid.is_refresh_failure());

    let error = DomainError::Internal { message: "boom".to_string() };
    assert!(error.token_error().is_none());
}
