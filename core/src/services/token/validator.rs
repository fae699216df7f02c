//! Access token verification with a pinned algorithm

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, Validation};
use serde_json::Value;
use tracing::debug;

use crate::domain::entities::Claims;
use crate::errors::TokenError;

use super::signing_key::SigningKey;

/// Name of the only accepted `alg` header value
const PINNED_ALGORITHM_NAME: &str = "HS256";

/// Verifies access tokens against the shared signing key
///
/// The algorithm is taken from the key, never from the token header.
#[derive(Debug)]
pub struct TokenValidator {
    key: Arc<SigningKey>,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(key: Arc<SigningKey>) -> Self {
        let mut validation = Validation::new(key.algorithm());
        validation.set_issuer(&[key.issuer()]);
        validation.set_audience(&[key.audience()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        // Expiry is judged against the caller's clock
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Self { key, validation }
    }

    /// Full validation for protected operations, including expiry at `now`
    pub fn validate_for_authentication(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        let claims = self.verify(token)?;
        if claims.is_expired_at(now) {
            debug!(jti = %claims.jti, "Access token expired");
            return Err(TokenError::TokenExpired);
        }
        Ok(claims)
    }

    /// Validation for refresh exchanges, where an expired token is expected
    ///
    /// Signature, algorithm, issuer and audience are still checked.
    pub fn validate_for_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify(token)
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        check_pinned_algorithm(token)?;

        let claims = decode::<Claims>(token, self.key.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let classified = classify(&e);
                debug!(error = %e, outcome = ?classified, "Access token rejected");
                classified
            })?;

        if claims.iss != self.key.issuer() || claims.aud != self.key.audience() {
            debug!(jti = %claims.jti, "Access token issuer or audience mismatch");
            return Err(TokenError::InvalidIssuerAudience);
        }

        Ok(claims)
    }
}

/// Rejects any token whose header does not name the pinned algorithm exactly.
fn check_pinned_algorithm(token: &str) -> Result<(), TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::TokenMalformed);
    };

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| TokenError::TokenMalformed)?;
    let header: Value =
        serde_json::from_slice(&header_bytes).map_err(|_| TokenError::TokenMalformed)?;
    let header = header.as_object().ok_or(TokenError::TokenMalformed)?;

    match header.get("alg").and_then(Value::as_str) {
        Some(PINNED_ALGORITHM_NAME) => Ok(()),
        _ => Err(TokenError::AlgorithmMismatch),
    }
}

fn classify(error: &JwtError) -> TokenError {
    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::MissingAlgorithm => TokenError::AlgorithmMismatch,
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => TokenError::InvalidIssuerAudience,
        ErrorKind::MissingRequiredClaim(claim) if claim == "iss" || claim == "aud" => {
            TokenError::InvalidIssuerAudience
        }
        ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        _ => TokenError::TokenMalformed,
    }
}
