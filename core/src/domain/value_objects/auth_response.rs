//! Authentication response value object returned to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{IssuedTokenPair, Principal};

/// Authentication response containing tokens and principal metadata
///
/// Returned after a completed login, a registration, or a successful
/// refresh exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Signed access token
    pub access_token: String,

    /// Access token expiry
    pub access_expires_at: DateTime<Utc>,

    /// Opaque refresh token, single use
    pub refresh_token: String,

    /// Refresh token expiry
    pub refresh_expires_at: DateTime<Utc>,

    /// Principal display name
    pub name: String,

    /// Principal email
    pub email: String,
}

impl AuthResponse {
    /// Creates an authentication response from an issued pair and its principal
    pub fn from_issued(tokens: IssuedTokenPair, principal: &Principal) -> Self {
        Self {
            access_token: tokens.access_token,
            access_expires_at: tokens.access_expires_at,
            refresh_token: tokens.refresh_token,
            refresh_expires_at: tokens.refresh_expires_at,
            name: principal.name.clone(),
            email: principal.email.clone(),
        }
    }
}
