//! Database module - MySQL implementations using SQLx
//!
//! Refresh token state lives on the `users` row of its principal, next to
//! the identity columns the principal lookup reads.

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::{MySqlPrincipalRepository, MySqlRefreshStore};
