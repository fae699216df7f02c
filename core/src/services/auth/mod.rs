//! Authentication service module
//!
//! Entry points used by the transport layer:
//! - Session issuance after login or registration
//! - Access token authentication
//! - Refresh exchange

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
