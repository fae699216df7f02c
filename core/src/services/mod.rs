//! Business services containing domain logic and use cases.

pub mod auth;
pub mod rotation;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use rotation::{RotationService, RotationServiceConfig, TokenExchange};
pub use token::{SigningKey, TokenIssuer, TokenLifetimes, TokenServices, TokenValidator};
