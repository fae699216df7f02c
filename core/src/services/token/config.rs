//! Configuration for the token services

use std::sync::Arc;

use chrono::Duration;
use tc_shared::{Environment, JwtConfig};
use tracing::warn;

use crate::errors::ConfigError;

use super::issuer::TokenIssuer;
use super::signing_key::SigningKey;
use super::validator::TokenValidator;

/// Lifetimes applied to newly issued tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    /// Access token lifetime
    pub access: Duration,
    /// Refresh token lifetime
    pub refresh: Duration,
}

/// Longest accepted lifetime for either token
const MAX_LIFETIME_DAYS: i64 = 3650;

impl TokenLifetimes {
    /// Builds lifetimes from minute counts
    ///
    /// Both must be positive and at most ten years, so that adding them to
    /// any realistic issue time cannot overflow.
    pub fn from_minutes(access_minutes: i64, refresh_minutes: i64) -> Result<Self, ConfigError> {
        Ok(Self {
            access: lifetime("access", access_minutes)?,
            refresh: lifetime("refresh", refresh_minutes)?,
        })
    }

    pub fn from_config(config: &JwtConfig) -> Result<Self, ConfigError> {
        Self::from_minutes(
            config.access_token_expiry_minutes,
            config.refresh_token_expiry_minutes,
        )
    }
}

fn lifetime(kind: &str, minutes: i64) -> Result<Duration, ConfigError> {
    if minutes <= 0 {
        return Err(ConfigError::invalid(format!(
            "{} token lifetime must be positive",
            kind
        )));
    }

    match Duration::try_minutes(minutes) {
        Some(duration) if duration <= Duration::days(MAX_LIFETIME_DAYS) => Ok(duration),
        _ => Err(ConfigError::invalid(format!(
            "{} token lifetime exceeds {} days",
            kind, MAX_LIFETIME_DAYS
        ))),
    }
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::minutes(15),
            refresh: Duration::days(7),
        }
    }
}

/// Issuer and validator wired to the same signing key
#[derive(Debug, Clone)]
pub struct TokenServices {
    pub signing_key: Arc<SigningKey>,
    pub issuer: Arc<TokenIssuer>,
    pub validator: Arc<TokenValidator>,
}

impl TokenServices {
    pub fn new(signing_key: SigningKey, lifetimes: TokenLifetimes) -> Self {
        let signing_key = Arc::new(signing_key);
        Self {
            issuer: Arc::new(TokenIssuer::new(signing_key.clone(), lifetimes)),
            validator: Arc::new(TokenValidator::new(signing_key.clone())),
            signing_key,
        }
    }

    /// Builds the token services from configuration
    ///
    /// Production refuses the well-known development secret.
    pub fn from_config(config: &JwtConfig, environment: Environment) -> Result<Self, ConfigError> {
        if config.is_using_default_secret() {
            if environment.is_production() {
                return Err(ConfigError::invalid(
                    "the default signing secret cannot be used in production",
                ));
            }
            warn!("Using the default signing secret, set JWT_SECRET outside development");
        }

        let signing_key = SigningKey::from_config(config)?;
        let lifetimes = TokenLifetimes::from_config(config)?;
        Ok(Self::new(signing_key, lifetimes))
    }
}
