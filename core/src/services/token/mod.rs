//! Token services for access token signing and verification
//!
//! This module handles:
//! - The shared HS256 signing key and its configuration checks
//! - Access/refresh pair issuance
//! - Access token validation with a pinned algorithm

mod config;
mod issuer;
mod signing_key;
mod validator;

#[cfg(test)]
mod tests;

pub use config::{TokenLifetimes, TokenServices};
pub use issuer::{generate_refresh_token, TokenIssuer};
pub use signing_key::{SigningKey, MIN_SECRET_BYTES, PINNED_ALGORITHM};
pub use validator::TokenValidator;
