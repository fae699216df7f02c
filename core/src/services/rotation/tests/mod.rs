//! Unit tests for refresh token rotation


use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::entities::{IssuedTokenPair, Principal};
use crate::repositories::{InMemoryPrincipalRepository, RefreshStore};
use crate::services::rotation::{RotationService, RotationServiceConfig};
use crate::services::token::{SigningKey, TokenLifetimes, TokenServices};

pub(super) fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 29, 20, 58, 20).unwrap()
}

/// Principal `u1` with token services using a 5 minute access and 60 minute
/// refresh lifetime
pub(super) struct Fixture {
    pub principal: Principal,
    pub principals: Arc<InMemoryPrincipalRepository>,
    pub tokens: TokenServices,
}

impl Fixture {
    pub fn new() -> Self {
        let principal = Principal::with_id(
            Uuid::parse_str("0b5a3c1e-9d8f-4e2a-8b7c-6d5e4f3a2b10").unwrap(),
            "u1",
            "u1@example.com",
        );
        let key = SigningKey::new(
            b"rotation-test-secret-0123456789-abcdefgh",
            "token-core",
            "token-core-api",
        )
        .unwrap();

        Self {
            principals: Arc::new(InMemoryPrincipalRepository::with_principals([
                principal.clone(),
            ])),
            principal,
            tokens: TokenServices::new(key, TokenLifetimes::from_minutes(5, 60).unwrap()),
        }
    }

    pub fn rotation<S: RefreshStore>(
        &self,
        store: Arc<S>,
        config: RotationServiceConfig,
    ) -> RotationService<InMemoryPrincipalRepository, S> {
        RotationService::new(
            self.principals.clone(),
            store,
            self.tokens.issuer.clone(),
            self.tokens.validator.clone(),
            config,
        )
    }

    /// Issues a pair at `now` and installs its refresh token, like a login
    pub async fn login<S: RefreshStore>(&self, store: &S, now: DateTime<Utc>) -> IssuedTokenPair {
        let pair = self.tokens.issuer.issue_token_pair(&self.principal, now).unwrap();
        store.put(pair.refresh_record(self.principal.id)).await.unwrap();
        pair
    }
}
