//! Shared configuration and wire types for the token core workspace
//!
//! This crate provides common functionality used across the server modules:
//! - Configuration types (signing, rotation, storage, logging)
//! - Error response structures returned to external callers
//! - Input validation helpers

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, DatabaseConfig, Environment, JwtConfig, LogFormat,
    LoggingConfig, RotationConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use utils::validation;
