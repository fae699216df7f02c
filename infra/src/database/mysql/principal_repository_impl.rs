//! MySQL implementation of the PrincipalRepository trait.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use tc_core::domain::entities::Principal;
use tc_core::errors::DomainError;
use tc_core::repositories::PrincipalRepository;

use super::{corrupt_row, store_error};

/// MySQL implementation of PrincipalRepository
pub struct MySqlPrincipalRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlPrincipalRepository {
    /// Create a new MySQL principal repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_principal(row: &sqlx::mysql::MySqlRow) -> Result<Principal, DomainError> {
        let id: String = row.try_get("id").map_err(|e| corrupt_row("id", e))?;

        Ok(Principal {
            id: Uuid::parse_str(&id).map_err(|e| corrupt_row("id", e))?,
            name: row
                .try_get("person_name")
                .map_err(|e| corrupt_row("person_name", e))?,
            email: row.try_get("email").map_err(|e| corrupt_row("email", e))?,
        })
    }
}

#[async_trait]
impl PrincipalRepository for MySqlPrincipalRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, DomainError> {
        let query = r#"
            SELECT id, person_name, email
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_principal(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, DomainError> {
        let query = r#"
            SELECT id, person_name, email
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_principal(&row)?)),
            None => Ok(None),
        }
    }
}
