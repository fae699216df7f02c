//! Tests for token pair issuance

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Duration;
use jsonwebtoken::{decode_header, Algorithm};

use super::{principal, services, t0};
use crate::domain::entities::REFRESH_TOKEN_BYTES;
use crate::services::token::generate_refresh_token;

#[test]
fn test_issue_token_pair_expiries() {
    let services = services();
    let now = t0();

    let pair = services.issuer.issue_token_pair(&principal(), now).unwrap();

    assert_eq!(pair.issued_at, now);
    assert_eq!(pair.access_expires_at, now + Duration::minutes(5));
    assert_eq!(pair.refresh_expires_at, now + Duration::minutes(60));
}

#[test]
fn test_access_token_is_hs256() {
    let services = services();
    let pair = services.issuer.issue_token_pair(&principal(), t0()).unwrap();

    let header = decode_header(&pair.access_token).unwrap();
    assert_eq!(header.alg, Algorithm::HS256);
    assert_eq!(pair.access_token.split('.').count(), 3);
}

#[test]
fn test_access_token_carries_principal_claims() {
    let services = services();
    let principal = principal();
    let now = t0();
    let pair = services.issuer.issue_token_pair(&principal, now).unwrap();

    let claims = services.validator.validate_for_refresh(&pair.access_token).unwrap();

    assert_eq!(claims.sub, principal.id.to_string());
    assert_eq!(claims.jti, pair.jti.to_string());
    assert_eq!(claims.name, "Ana Souza");
    assert_eq!(claims.email, "ana@example.com");
    assert_eq!(claims.iss, "token-core");
    assert_eq!(claims.aud, "token-core-api");
    assert_eq!(claims.iat, now.timestamp());
    assert_eq!(claims.exp, (now + Duration::minutes(5)).timestamp());
}

#[test]
fn test_each_issuance_is_unique() {
    let services = services();
    let first = services.issuer.issue_token_pair(&principal(), t0()).unwrap();
    let second = services.issuer.issue_token_pair(&principal(), t0()).unwrap();

    assert_ne!(first.jti, second.jti);
    assert_ne!(first.access_token, second.access_token);
    assert_ne!(first.refresh_token, second.refresh_token);
}

#[test]
fn test_refresh_token_encoding() {
    let token = generate_refresh_token();

    assert_eq!(token.len(), 88);
    let bytes = STANDARD.decode(&token).unwrap();
    assert_eq!(bytes.len(), REFRESH_TOKEN_BYTES);
}

#[test]
fn test_refresh_record_hashes_issued_token() {
    let services = services();
    let principal = principal();
    let pair = services.issuer.issue_token_pair(&principal, t0()).unwrap();

    let record = pair.refresh_record(principal.id);

    assert_eq!(record.principal_id, principal.id);
    assert_eq!(record.issued_at, pair.issued_at);
    assert_eq!(record.expires_at, pair.refresh_expires_at);
    assert_ne!(record.token_hash, pair.refresh_token);
    assert!(record.matches(&pair.refresh_token));
}

#[test]
fn test_issue_at_end_of_time_range_fails_cleanly() {
    let services = services();
    let end_of_time = chrono::DateTime::<chrono::Utc>::MAX_UTC;

    assert_eq!(
        services.issuer.issue_token_pair(&principal(), end_of_time),
        Err(crate::errors::TokenError::TokenGenerationFailed)
    );
}
