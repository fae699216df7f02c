//! Token signing and rotation configuration

use serde::{Deserialize, Serialize};

/// Well-known development secret; refused in production
pub const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key material used for HMAC-SHA256 signing (at least 32 bytes)
    pub secret: String,

    /// `iss` claim written into and required from every access token
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// `aud` claim written into and required from every access token
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Access token lifetime in minutes
    #[serde(default = "default_access_expiry")]
    pub access_token_expiry_minutes: i64,

    /// Refresh token lifetime in minutes
    #[serde(default = "default_refresh_expiry")]
    pub refresh_token_expiry_minutes: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            issuer: default_issuer(),
            audience: default_audience(),
            access_token_expiry_minutes: default_access_expiry(),
            refresh_token_expiry_minutes: default_refresh_expiry(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set the issuer and audience pair
    pub fn with_issuer_audience(
        mut self,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        self.issuer = issuer.into();
        self.audience = audience.into();
        self
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in minutes
    pub fn with_refresh_expiry_minutes(mut self, minutes: i64) -> Self {
        self.refresh_token_expiry_minutes = minutes;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Refresh rotation behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RotationConfig {
    /// Read-compare-issue-write attempts before reporting a conflict.
    /// The default of 2 allows exactly one retry.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Upper bound for a single refresh store call, in milliseconds
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            store_timeout_ms: default_store_timeout_ms(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Rotation configuration
    #[serde(default)]
    pub rotation: RotationConfig,
}

fn default_issuer() -> String {
    String::from("token-core")
}

fn default_audience() -> String {
    String::from("token-core-api")
}

fn default_access_expiry() -> i64 {
    15
}

fn default_refresh_expiry() -> i64 {
    7 * 24 * 60
}

fn default_max_attempts() -> u32 {
    2
}

fn default_store_timeout_ms() -> u64 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry_minutes, 15);
        assert_eq!(config.refresh_token_expiry_minutes, 10080);
        assert_eq!(config.issuer, "token-core");
        assert_eq!(config.audience, "token-core-api");
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_issuer_audience("cities", "cities-api")
            .with_access_expiry_minutes(5)
            .with_refresh_expiry_minutes(60);

        assert_eq!(config.issuer, "cities");
        assert_eq!(config.audience, "cities-api");
        assert_eq!(config.access_token_expiry_minutes, 5);
        assert_eq!(config.refresh_token_expiry_minutes, 60);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_rotation_config_default() {
        let config = RotationConfig::default();
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.store_timeout_ms, 2000);
    }
}
