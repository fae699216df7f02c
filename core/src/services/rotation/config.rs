//! Configuration for refresh token rotation

use std::future::Future;
use std::time::Duration;

use tc_shared::RotationConfig;
use tracing::warn;

use crate::errors::{DomainError, DomainResult};

/// Configuration for the rotation service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationServiceConfig {
    /// Read/compare/swap attempts per exchange, at least 1
    pub max_attempts: u32,
    /// Upper bound for each refresh store call
    pub store_timeout: Duration,
}

impl Default for RotationServiceConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            store_timeout: Duration::from_millis(2000),
        }
    }
}

impl From<&RotationConfig> for RotationServiceConfig {
    fn from(config: &RotationConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            store_timeout: Duration::from_millis(config.store_timeout_ms),
        }
    }
}

impl RotationServiceConfig {
    /// Runs a store call, failing with `StoreTimeout` once the bound elapses
    pub(crate) async fn bounded<T, F>(&self, operation: &'static str, call: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = u64::try_from(self.store_timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(operation, timeout_ms, "Store call timed out");
                Err(DomainError::StoreTimeout { timeout_ms })
            }
        }
    }
}
