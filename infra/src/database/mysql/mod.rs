//! MySQL implementations of the core collaborator traits

pub mod principal_repository_impl;
pub mod refresh_store_impl;

pub use principal_repository_impl::MySqlPrincipalRepository;
pub use refresh_store_impl::MySqlRefreshStore;

use tc_core::errors::DomainError;

use crate::InfrastructureError;

/// Convert a driver failure into the domain's store error
pub(crate) fn store_error(err: sqlx::Error) -> DomainError {
    InfrastructureError::Database(err).into()
}

/// A row that cannot be mapped back into a domain value
pub(crate) fn corrupt_row(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read column '{}': {}", column, err),
    }
}
