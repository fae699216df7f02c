//! Configuration module with concern-specific sub-modules
//!
//! - `auth` - Signing key material, token lifetimes and rotation behaviour
//! - `cache` - Redis configuration for the Redis-backed refresh store
//! - `database` - MySQL connection and pool configuration
//! - `environment` - Deployment environment
//! - `logging` - Tracing subscriber settings

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod logging;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, RotationConfig};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use logging::{LogFormat, LoggingConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment the process runs in
    #[serde(default)]
    pub environment: Environment,

    /// Token signing and rotation configuration
    pub auth: AuthConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Redis configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            auth: AuthConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}
