//! In-process refresh store backed by a locked map

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

use super::r#trait::{expectation_holds, RefreshStore, SetOutcome};

/// Refresh store for single-process deployments and tests
///
/// The compare and the write of `conditional_set` happen under one write
/// lock, which makes the swap atomic.
#[derive(Clone, Default)]
pub struct InMemoryRefreshStore {
    records: Arc<RwLock<HashMap<Uuid, RefreshTokenRecord>>>,
}

impl InMemoryRefreshStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of principals with an installed token
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RefreshStore for InMemoryRefreshStore {
    async fn get(&self, principal_id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&principal_id).cloned())
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

        let mut records = self.records.write().await;
        if !expectation_holds(records.get(&principal_id), expected) {
            return Ok(SetOutcome::Conflict);
        }

        records.insert(principal_id, replacement);
        Ok(SetOutcome::Swapped)
    }

    async fn put(&self, record: RefreshTokenRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert(record.principal_id, record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn record(principal_id: Uuid, raw: &str) -> RefreshTokenRecord {
        let now = Utc.with_ymd_and_hms(2024, 11, 29, 20, 58, 20).unwrap();
        RefreshTokenRecord::new(principal_id, raw, now, now + Duration::hours(1))
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let store = InMemoryRefreshStore::new();
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_conditional_set_from_empty() {
        let store = InMemoryRefreshStore::new();
        let id = Uuid::new_v4();

        let outcome = store.conditional_set(id, None, record(id, "r1")).await.unwrap();
        assert_eq!(outcome, SetOutcome::Swapped);

        // A second install against "nothing stored" must fail
        let outcome = store.conditional_set(id, None, record(id, "r2")).await.unwrap();
        assert_eq!(outcome, SetOutcome::Conflict);
        assert!(store.get(id).await.unwrap().unwrap().matches("r1"));
    }

    #[tokio::test]
    async fn test_conditional_set_swaps_only_matching_expectation() {
        let store = InMemoryRefreshStore::new();
        let id = Uuid::new_v4();
        let first = record(id, "r1");
        store.put(first.clone()).await.unwrap();

        let outcome = store.conditional_set(id, Some(&first), record(id, "r2")).await.unwrap();
        assert_eq!(outcome, SetOutcome::Swapped);

        // Stale expectation
        let outcome = store.conditional_set(id, Some(&first), record(id, "r3")).await.unwrap();
        assert_eq!(outcome, SetOutcome::Conflict);

        let stored = store.get(id).await.unwrap().unwrap();
        assert!(stored.matches("r2"));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_conditional_set_rejects_foreign_record() {
        let store = InMemoryRefreshStore::new();
        let id = Uuid::new_v4();

        let result = store.conditional_set(id, None, record(Uuid::new_v4(), "r1")).await;
        assert!(matches!(result, Err(DomainError::Internal { .. })));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_put_supersedes() {
        let store = InMemoryRefreshStore::new();
        let id = Uuid::new_v4();
        store.put(record(id, "r1")).await.unwrap();
        store.put(record(id, "r2")).await.unwrap();

        let stored = store.get(id).await.unwrap().unwrap();
        assert!(!stored.matches("r1"));
        assert!(stored.matches("r2"));
    }
}
