//! Principal entity: the identity a token is issued for.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity record owned by the external identity store.
///
/// Treated as immutable for the duration of a token operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable unique identifier, used as the `sub` claim
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

impl Principal {
    /// Creates a principal with a freshly generated id
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name, email)
    }

    /// Creates a principal with a known id
    pub fn with_id(id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
        }
    }
}
