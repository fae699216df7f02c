//! Unit tests for the token services

mod issuer_tests;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::Principal;
use crate::services::token::{SigningKey, TokenLifetimes, TokenServices};

pub(super) const SECRET: &[u8] = b"unit-test-signing-secret-0123456789abcdef";
pub(super) const ISSUER: &str = "token-core";
pub(super) const AUDIENCE: &str = "token-core-api";

/// Fixed reference instant used as T0
pub(super) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 29, 20, 58, 20).unwrap()
}

pub(super) fn principal() -> Principal {
    Principal::with_id(
        Uuid::parse_str("6f1c2a4e-2f4b-4d57-9c0e-0b1d2c3e4f50").unwrap(),
        "Ana Souza",
        "ana@example.com",
    )
}

/// Services with a 5 minute access and 60 minute refresh lifetime
pub(super) fn services() -> TokenServices {
    services_for(SECRET, ISSUER, AUDIENCE)
}

pub(super) fn services_for(secret: &[u8], issuer: &str, audience: &str) -> TokenServices {
    let key = SigningKey::new(secret, issuer, audience).unwrap();
    TokenServices::new(key, TokenLifetimes::from_minutes(5, 60).unwrap())
}
