//! In-process principal directory

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tc_shared::validation::normalize_email;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::principal::Principal;
use crate::errors::DomainError;

use super::r#trait::PrincipalRepository;

/// Principal directory held in memory
#[derive(Clone, Default)]
pub struct InMemoryPrincipalRepository {
    principals: Arc<RwLock<HashMap<Uuid, Principal>>>,
}

impl InMemoryPrincipalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-populated with principals
    pub fn with_principals(principals: impl IntoIterator<Item = Principal>) -> Self {
        let map = principals.into_iter().map(|p| (p.id, p)).collect();
        Self {
            principals: Arc::new(RwLock::new(map)),
        }
    }

    /// Add or replace a principal
    pub async fn insert(&self, principal: Principal) {
        self.principals.write().await.insert(principal.id, principal);
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Principal>, DomainError> {
        let principals = self.principals.read().await;
        Ok(principals.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, DomainError> {
        let wanted = normalize_email(email);
        let principals = self.principals.read().await;
        Ok(principals
            .values()
            .find(|p| normalize_email(&p.email) == wanted)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_id_and_email() {
        let ana = Principal::new("Ana", "ana@example.com");
        let repo = InMemoryPrincipalRepository::with_principals([ana.clone()]);

        assert_eq!(repo.find_by_id(ana.id).await.unwrap(), Some(ana.clone()));
        assert_eq!(repo.find_by_email("ana@example.com").await.unwrap(), Some(ana.clone()));
        assert_eq!(repo.find_by_email(" ANA@Example.com ").await.unwrap(), Some(ana));
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
        assert!(repo.find_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert() {
        let repo = InMemoryPrincipalRepository::new();
        let bob = Principal::new("Bob", "bob@example.com");
        repo.insert(bob.clone()).await;

        assert_eq!(repo.find_by_id(bob.id).await.unwrap(), Some(bob));
    }
}
