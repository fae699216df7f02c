//! Refresh token rotation
//!
//! A refresh token is single use: a successful exchange replaces the stored
//! token atomically, and of several concurrent exchanges of the same token at
//! most one wins.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::RotationServiceConfig;
pub use service::{RotationService, TokenExchange};
