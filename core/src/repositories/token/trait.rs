//! Refresh store trait defining the interface for refresh token state.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Result of a conditional write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The stored value matched the expectation and was replaced
    Swapped,
    /// The stored value had changed; nothing was written
    Conflict,
}

/// Keyed storage of the single current refresh token per principal
///
/// Implementations must make `conditional_set` atomic: two concurrent calls
/// carrying the same expectation can never both return `Swapped`. Records are
/// identified by their token hash, so an expectation matches when the stored
/// record has the same `token_hash` (or when both sides are absent).
///
/// Transport failures surface as `DomainError::StoreUnavailable`.
#[async_trait]
pub trait RefreshStore: Send + Sync {
    /// Read the current refresh token record for a principal
    ///
    /// # Returns
    /// * `Ok(Some(record))` - A token is currently installed
    /// * `Ok(None)` - The principal has no refresh token
    async fn get(&self, principal_id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Replace the record only if the stored state still equals `expected`
    ///
    /// # Arguments
    /// * `principal_id` - Key of the record
    /// * `expected` - The record read earlier, or `None` if none was stored
    /// * `replacement` - New record to install
    async fn conditional_set(
        &self,
        principal_id: Uuid,
        expected: Option<&RefreshTokenRecord>,
        replacement: RefreshTokenRecord,
    ) -> Result<SetOutcome, DomainError>;

    /// Unconditionally install a record, superseding whatever was stored
    ///
    /// Used when a full login issues a fresh pair.
    async fn put(&self, record: RefreshTokenRecord) -> Result<(), DomainError>;
}

/// Whether a stored record satisfies a conditional write expectation
pub fn expectation_holds(
    current: Option<&RefreshTokenRecord>,
    expected: Option<&RefreshTokenRecord>,
) -> bool {
    match (current, expected) {
        (None, None) => true,
        (Some(current), Some(expected)) => current.token_hash == expected.token_hash,
        _ => false,
    }
}
