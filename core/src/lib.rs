//! # Token Core
//!
//! Domain layer for access/refresh token authentication: claim construction,
//! HS256 signing and pinned verification, and single-use refresh rotation
//! with optimistic concurrency against a pluggable refresh store.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{AuthResponse, Claims, IssuedTokenPair, Principal, RefreshTokenRecord};
pub use errors::{AuthError, ConfigError, DomainError, DomainResult, FailureScope, TokenError};
pub use repositories::{
    InMemoryPrincipalRepository, InMemoryRefreshStore, PrincipalRepository, RefreshStore,
    SetOutcome,
};
pub use services::{
    AuthService, AuthServiceConfig, RotationService, RotationServiceConfig, SigningKey,
    TokenExchange, TokenIssuer, TokenLifetimes, TokenServices, TokenValidator,
};
