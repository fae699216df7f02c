//! Principal repository trait defining read access to the identity store.
//!
//! The identity store owns principals; the token core only looks them up.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::principal::Principal;
use crate::errors::DomainError;

/// Read-only lookup of principals
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use tc_core::repositories::PrincipalRepository;
/// use tc_core::domain::entities::Principal;
/// use tc_core::errors::DomainError;
///
/// struct DirectoryPrincipals;
///
/// #[async_trait]
/// impl PrincipalRepository for DirectoryPrincipals {
///     async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, DomainError> {
///         Ok(None)
///     }
///
///     async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, DomainError> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait PrincipalRepository: Send + Sync {
    /// Find a principal by its identifier
    ///
    /// # Returns
    /// * `Ok(Some(Principal))` - Principal found
    /// * `Ok(None)` - No such principal
    /// * `Err(DomainError)` - Lookup failed
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, DomainError>;

    /// Find a principal by email
    ///
    /// Callers pass an already normalized (trimmed, lowercase) address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, DomainError>;
}
