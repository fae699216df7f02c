//! # Infrastructure Layer
//!
//! Concrete adapters behind the token core's collaborator traits:
//! - **Database**: MySQL refresh store and principal lookup using SQLx
//! - **Cache**: Redis refresh store with an atomic compare-and-swap script
//! - **Config**: layered file and environment configuration loading
//! - **Telemetry**: `tracing` subscriber installation
//!
//! ## Features
//!
//! - `mysql`: MySQL refresh store and principal lookup (default)
//! - `redis-cache`: Redis refresh store (default)
//!
//! Configuration loading and telemetry are always available.

use tc_core::errors::DomainError;
use tracing::error;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Cache module - Redis client and refresh store
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Configuration loading
pub mod config;

/// Logging setup
pub mod telemetry;

pub use config::load_config;
pub use telemetry::init_tracing;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored data could not be decoded
    #[error("Corrupt stored data: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        error!(error = %err, "Store call failed");
        match err {
            InfrastructureError::Serialization(e) => DomainError::Internal {
                message: format!("Corrupt refresh token record: {}", e),
            },
            other => DomainError::StoreUnavailable {
                message: other.to_string(),
            },
        }
    }
}
