//! Symmetric signing key shared by the issuer and the validator

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};
use tc_shared::JwtConfig;

use crate::errors::ConfigError;

/// The only algorithm tokens are signed and accepted with
pub const PINNED_ALGORITHM: Algorithm = Algorithm::HS256;

/// Minimum secret length in bytes
pub const MIN_SECRET_BYTES: usize = 32;

/// HS256 key material plus the issuer/audience identity it signs for.
///
/// Built once at startup and shared read-only through an `Arc`.
#[derive(Clone)]
pub struct SigningKey {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
}

impl SigningKey {
    /// Creates a signing key from raw secret bytes
    ///
    /// # Errors
    ///
    /// `ConfigError::ConfigurationInvalid` when the secret is shorter than
    /// `MIN_SECRET_BYTES` or the issuer or audience is empty.
    pub fn new(
        secret: &[u8],
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(ConfigError::invalid(format!(
                "signing secret must be at least {} bytes, got {}",
                MIN_SECRET_BYTES,
                secret.len()
            )));
        }

        let issuer = issuer.into();
        if issuer.trim().is_empty() {
            return Err(ConfigError::invalid("issuer must not be empty"));
        }

        let audience = audience.into();
        if audience.trim().is_empty() {
            return Err(ConfigError::invalid("audience must not be empty"));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer,
            audience,
        })
    }

    /// Creates a signing key from JWT configuration
    pub fn from_config(config: &JwtConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.secret.as_bytes(),
            config.issuer.clone(),
            config.audience.clone(),
        )
    }

    pub fn algorithm(&self) -> Algorithm {
        PINNED_ALGORITHM
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("algorithm", &PINNED_ALGORITHM)
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}
