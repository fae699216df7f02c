//! Main authentication service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tc_shared::validation::{is_valid_email, normalize_email};
use tracing::{info, warn};

use crate::domain::entities::{Claims, Principal};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{PrincipalRepository, RefreshStore, SetOutcome};
use crate::services::rotation::RotationService;
use crate::services::token::{TokenIssuer, TokenServices, TokenValidator};

use super::config::AuthServiceConfig;

/// Authentication service tying identity lookup, token issuance, validation
/// and refresh rotation together
pub struct AuthService<P, S>
where
    P: PrincipalRepository,
    S: RefreshStore,
{
    /// Identity lookup
    principals: Arc<P>,
    /// Current refresh token per principal
    store: Arc<S>,
    issuer: Arc<TokenIssuer>,
    validator: Arc<TokenValidator>,
    rotation: RotationService<P, S>,
    config: AuthServiceConfig,
}

impl<P, S> AuthService<P, S>
where
    P: PrincipalRepository,
    S: RefreshStore,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `principals` - Identity store lookup
    /// * `store` - Refresh token store
    /// * `tokens` - Issuer and validator sharing one signing key
    /// * `config` - Service configuration
    pub fn new(
        principals: Arc<P>,
        store: Arc<S>,
        tokens: &TokenServices,
        config: AuthServiceConfig,
    ) -> Self {
        let rotation = RotationService::new(
            principals.clone(),
            store.clone(),
            tokens.issuer.clone(),
            tokens.validator.clone(),
            config.rotation,
        );

        Self {
            principals,
            store,
            issuer: tokens.issuer.clone(),
            validator: tokens.validator.clone(),
            rotation,
            config,
        }
    }

    /// Issues a session after the credential check has succeeded
    ///
    /// Any refresh token from an earlier session is superseded.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidEmail` - Email is not syntactically valid
    /// * `AuthError::UnknownPrincipal` - No principal with this email
    pub async fn complete_login(&self, email: &str, now: DateTime<Utc>) -> DomainResult<AuthResponse> {
        let principal = self
            .find_principal_by_email(email)
            .await?
            .ok_or(AuthError::UnknownPrincipal)?;

        let tokens = self.issuer.issue_token_pair(&principal, now)?;
        self.config
            .rotation
            .bounded("put", self.store.put(tokens.refresh_record(principal.id)))
            .await?;

        info!(principal_id = %principal.id, jti = %tokens.jti, "Login completed");
        Ok(AuthResponse::from_issued(tokens, &principal))
    }

    /// Issues the first session of a freshly created principal
    ///
    /// # Errors
    ///
    /// `AuthError::SessionAlreadyExists` if a refresh token is already
    /// installed for the principal. The installed token is left in place.
    pub async fn complete_registration(
        &self,
        principal: &Principal,
        now: DateTime<Utc>,
    ) -> DomainResult<AuthResponse> {
        let tokens = self.issuer.issue_token_pair(principal, now)?;
        let record = tokens.refresh_record(principal.id);

        let outcome = self
            .config
            .rotation
            .bounded(
                "conditional_set",
                self.store.conditional_set(principal.id, None, record),
            )
            .await?;

        if outcome == SetOutcome::Conflict {
            warn!(principal_id = %principal.id, "Registration found an existing session");
            return Err(AuthError::SessionAlreadyExists.into());
        }

        info!(principal_id = %principal.id, jti = %tokens.jti, "Registration completed");
        Ok(AuthResponse::from_issued(tokens, principal))
    }

    /// Check whether an email belongs to a known principal
    pub async fn is_email_registered(&self, email: &str) -> DomainResult<bool> {
        Ok(self.find_principal_by_email(email).await?.is_some())
    }

    /// Validates an access token for a protected operation
    pub fn authenticate(&self, access_token: &str, now: DateTime<Utc>) -> DomainResult<Claims> {
        Ok(self.validator.validate_for_authentication(access_token, now)?)
    }

    /// Exchanges an expired access token and the current refresh token for a new pair
    pub async fn refresh(
        &self,
        expired_access_token: &str,
        refresh_token: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<AuthResponse> {
        let exchange = self
            .rotation
            .exchange(expired_access_token, refresh_token, now)
            .await?;
        Ok(AuthResponse::from_issued(exchange.tokens, &exchange.principal))
    }

    async fn find_principal_by_email(&self, email: &str) -> DomainResult<Option<Principal>> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail.into());
        }

        self.config
            .rotation
            .bounded("find_principal", self.principals.find_by_email(&email))
            .await
    }
}
