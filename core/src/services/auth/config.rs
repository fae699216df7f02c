//! Configuration for the authentication service

use tc_shared::AuthConfig;

use crate::services::rotation::RotationServiceConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone, Default)]
pub struct AuthServiceConfig {
    /// Rotation retry and store timeout settings
    pub rotation: RotationServiceConfig,
}

impl AuthServiceConfig {
    pub fn from_auth_config(config: &AuthConfig) -> Self {
        Self {
            rotation: RotationServiceConfig::from(&config.rotation),
        }
    }
}
