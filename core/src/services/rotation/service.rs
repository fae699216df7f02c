//! Refresh token exchange with optimistic concurrency

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::entities::{IssuedTokenPair, Principal, RefreshTokenRecord};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{PrincipalRepository, RefreshStore, SetOutcome};
use crate::services::token::{TokenIssuer, TokenValidator};

use super::config::RotationServiceConfig;

/// Outcome of a successful exchange
#[derive(Debug, Clone)]
pub struct TokenExchange {
    /// Principal the new pair was issued for
    pub principal: Principal,
    /// The new pair; its refresh token is now the only valid one
    pub tokens: IssuedTokenPair,
}

/// Exchanges an expired access token plus the current refresh token for a
/// new pair, consuming the refresh token exactly once.
pub struct RotationService<P, S>
where
    P: PrincipalRepository,
    S: RefreshStore,
{
    principals: Arc<P>,
    store: Arc<S>,
    issuer: Arc<TokenIssuer>,
    validator: Arc<TokenValidator>,
    config: RotationServiceConfig,
}

impl<P, S> RotationService<P, S>
where
    P: PrincipalRepository,
    S: RefreshStore,
{
    pub fn new(
        principals: Arc<P>,
        store: Arc<S>,
        issuer: Arc<TokenIssuer>,
        validator: Arc<TokenValidator>,
        config: RotationServiceConfig,
    ) -> Self {
        Self {
            principals,
            store,
            issuer,
            validator,
            config,
        }
    }

    /// Performs one refresh exchange
    ///
    /// 1. Validates the access token without the expiry check
    /// 2. Resolves the principal from its subject
    /// 3. Reads the stored record, compares the presented refresh token, then
    ///    checks its expiry
    /// 4. Issues a new pair and swaps it in conditionally on the read record
    ///
    /// A lost swap is retried from step 3 up to `max_attempts` times. Failure
    /// at any step leaves the stored record untouched. A swap that times out
    /// is settled by re-reading the store, so a write applied just before the
    /// timeout still yields the new pair.
    ///
    /// # Errors
    ///
    /// * Token validation failures from the validator
    /// * `TokenError::TokenMalformed` - Subject is not a principal id
    /// * `AuthError::UnknownPrincipal` - Principal no longer exists
    /// * `TokenError::RefreshTokenMismatch` - Presented token is not the stored one
    /// * `TokenError::RefreshTokenExpired` - Stored token has expired
    /// * `TokenError::ConcurrentRotationConflict` - Every swap attempt lost
    /// * `DomainError::StoreTimeout` / `StoreUnavailable` - Store failures
    pub async fn exchange(
        &self,
        expired_access_token: &str,
        presented_refresh_token: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<TokenExchange> {
        let claims = self.validator.validate_for_refresh(expired_access_token)?;
        let principal_id = claims
            .principal_id()
            .map_err(|_| TokenError::TokenMalformed)?;

        let principal = self
            .config
            .bounded("find_principal", self.principals.find_by_id(principal_id))
            .await?
            .ok_or(AuthError::UnknownPrincipal)?;

        let attempts = self.config.max_attempts.max(1);
        for attempt in 1..=attempts {
            let current = self
                .config
                .bounded("get", self.store.get(principal.id))
                .await?;

            let current = match current {
                Some(record) if record.matches(presented_refresh_token) => record,
                _ => {
                    warn!(principal_id = %principal.id, attempt, "Refresh token mismatch");
                    return Err(TokenError::RefreshTokenMismatch.into());
                }
            };

            if current.is_expired_at(now) {
                info!(principal_id = %principal.id, "Refresh token expired");
                return Err(TokenError::RefreshTokenExpired.into());
            }

            let tokens = self.issuer.issue_token_pair(&principal, now)?;
            let replacement = tokens.refresh_record(principal.id);

            let swap = self
                .config
                .bounded(
                    "conditional_set",
                    self.store
                        .conditional_set(principal.id, Some(&current), replacement.clone()),
                )
                .await;

            let outcome = match swap {
                Err(DomainError::StoreTimeout { timeout_ms }) => {
                    self.settle_timed_out_swap(&replacement, timeout_ms).await?
                }
                other => other?,
            };

            match outcome {
                SetOutcome::Swapped => {
                    info!(principal_id = %principal.id, jti = %tokens.jti, attempt, "Refresh token rotated");
                    return Ok(TokenExchange { principal, tokens });
                }
                SetOutcome::Conflict => {
                    debug!(principal_id = %principal.id, attempt, "Lost refresh token swap");
                }
            }
        }

        warn!(principal_id = %principal.id, attempts, "Refresh rotation kept conflicting");
        Err(TokenError::ConcurrentRotationConflict.into())
    }

    /// Decides a swap whose reply never arrived in time
    ///
    /// The write may have been applied before the timeout fired. If the store
    /// now holds the replacement, the swap counts as done and the new pair is
    /// handed out; otherwise the timeout stands.
    async fn settle_timed_out_swap(
        &self,
        replacement: &RefreshTokenRecord,
        timeout_ms: u64,
    ) -> DomainResult<SetOutcome> {
        let principal_id = replacement.principal_id;
        let stored = self
            .config
            .bounded("get", self.store.get(principal_id))
            .await;

        match stored {
            Ok(Some(record)) if record.token_hash == replacement.token_hash => {
                info!(principal_id = %principal_id, "Timed out swap was applied");
                Ok(SetOutcome::Swapped)
            }
            Ok(_) => Err(DomainError::StoreTimeout { timeout_ms }),
            Err(e) => {
                warn!(principal_id = %principal_id, error = %e, "Could not settle timed out swap");
                Err(DomainError::StoreTimeout { timeout_ms })
            }
        }
    }
}
