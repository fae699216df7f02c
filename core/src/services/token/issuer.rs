//! Access token signing and refresh token generation

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, Header};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::entities::{Claims, IssuedTokenPair, Principal, REFRESH_TOKEN_BYTES};
use crate::errors::TokenError;

use super::config::TokenLifetimes;
use super::signing_key::{SigningKey, PINNED_ALGORITHM};

/// Issues access/refresh token pairs for principals
#[derive(Debug)]
pub struct TokenIssuer {
    key: Arc<SigningKey>,
    lifetimes: TokenLifetimes,
    header: Header,
}

impl TokenIssuer {
    pub fn new(key: Arc<SigningKey>, lifetimes: TokenLifetimes) -> Self {
        Self {
            key,
            lifetimes,
            header: Header::new(PINNED_ALGORITHM),
        }
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Issues a signed access token and a fresh refresh token
    ///
    /// Nothing is persisted here; the caller installs the refresh record.
    ///
    /// # Errors
    ///
    /// `TokenError::TokenGenerationFailed` if signing fails or an expiry
    /// falls outside the representable time range.
    pub fn issue_token_pair(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> Result<IssuedTokenPair, TokenError> {
        let jti = Uuid::new_v4();
        let (Some(access_expires_at), Some(refresh_expires_at)) = (
            now.checked_add_signed(self.lifetimes.access),
            now.checked_add_signed(self.lifetimes.refresh),
        ) else {
            error!(principal_id = %principal.id, "Token expiry is out of range");
            return Err(TokenError::TokenGenerationFailed);
        };

        let claims = Claims::for_principal(
            principal,
            jti,
            now,
            access_expires_at,
            self.key.issuer(),
            self.key.audience(),
        );

        let access_token = encode(&self.header, &claims, self.key.encoding_key()).map_err(|e| {
            error!(principal_id = %principal.id, error = %e, "Failed to sign access token");
            TokenError::TokenGenerationFailed
        })?;

        debug!(principal_id = %principal.id, jti = %jti, "Issued token pair");

        Ok(IssuedTokenPair {
            access_token,
            access_expires_at,
            refresh_token: generate_refresh_token(),
            refresh_expires_at,
            issued_at: now,
            jti,
        })
    }
}

/// Generates an opaque refresh token from the OS random source
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}
