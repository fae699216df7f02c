//! MySQL implementation of the RefreshStore trait.
//!
//! The current refresh token of a principal is kept in three nullable
//! columns of its `users` row. Only the SHA-256 hash of the token is stored.
//! The conditional write is a single `UPDATE` guarded by a null-safe
//! comparison on the stored hash, so MySQL's row locking decides which of
//! two racing rotations wins.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::{debug, warn};
use uuid::Uuid;

use tc_core::domain::entities::RefreshTokenRecord;
use tc_core::errors::DomainError;
use tc_core::repositories::{RefreshStore, SetOutcome};

use super::{corrupt_row, store_error};

/// MySQL implementation of RefreshStore
pub struct MySqlRefreshStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshStore {
    /// Create a new MySQL refresh store
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(
        principal_id: Uuid,
        row: &sqlx::mysql::MySqlRow,
    ) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let token_hash: Option<String> = row
            .try_get("refresh_token_hash")
            .map_err(|e| corrupt_row("refresh_token_hash", e))?;
        let issued_at: Option<DateTime<Utc>> = row
            .try_get("refresh_token_issued_at")
            .map_err(|e| corrupt_row("refresh_token_issued_at", e))?;
        let expires_at: Option<DateTime<Utc>> = row
            .try_get("refresh_token_expires_at")
            .map_err(|e| corrupt_row("refresh_token_expires_at", e))?;

        match (token_hash, issued_at, expires_at) {
            (Some(token_hash), Some(issued_at), Some(expires_at)) => Ok(Some(RefreshTokenRecord {
                principal_id,
                token_hash,
                issued_at,
                expires_at,
            })),
            (None, _, _) => Ok(None),
            _ => Err(DomainError::Internal {
                message: format!("Incomplete refresh token columns for principal {}", principal_id),
            }),
        }
    }
}

#[async_trait]
impl RefreshStore for MySqlRefreshStore {
    async fn get(&self, principal_id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let query = r#"
            SELECT refresh_token_hash, refresh_token_issued_at, refresh_token_expires_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(principal_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        match row {
            Some(row) => Self::row_to_record(principal_id, &row),
            None => Ok(None),
        }
    }

    async fn conditional_set(
        &self,
        principal_id: Uuid,
        expected: Option<&RefreshTokenRecord>,
        replacement: RefreshTokenRecord,
    ) -> Result<SetOutcome, DomainError> {
        if replacement.principal_id != principal_id {
            return Err(DomainError::Internal {
                message: "Replacement record belongs to another principal".to_string(),
            });
        }

        // `<=>` also matches when both sides are NULL
        let query = r#"
            UPDATE users SET
                refresh_token_hash = ?,
                refresh_token_issued_at = ?,
                refresh_token_expires_at = ?
            WHERE id = ? AND refresh_token_hash <=> ?
        "#;

        let result = sqlx::query(query)
            .bind(&replacement.token_hash)
            .bind(replacement.issued_at)
            .bind(replacement.expires_at)
            .bind(principal_id.to_string())
            .bind(expected.map(|record| record.token_hash.as_str()))
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        if result.rows_affected() == 1 {
            debug!(principal_id = %principal_id, "Refresh token swapped");
            Ok(SetOutcome::Swapped)
        } else {
            debug!(principal_id = %principal_id, "Refresh token changed concurrently");
            Ok(SetOutcome::Conflict)
        }
    }

    async fn put(&self, record: RefreshTokenRecord) -> Result<(), DomainError> {
        let query = r#"
            UPDATE users SET
                refresh_token_hash = ?,
                refresh_token_issued_at = ?,
                refresh_token_expires_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&record.token_hash)
            .bind(record.issued_at)
            .bind(record.expires_at)
            .bind(record.principal_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        if result.rows_affected() == 0 {
            warn!(principal_id = %record.principal_id, "No users row for refresh token");
            return Err(DomainError::Internal {
                message: format!("No stored principal {}", record.principal_id),
            });
        }

        Ok(())
    }
}
