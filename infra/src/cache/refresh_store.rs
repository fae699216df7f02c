//! Redis implementation of the RefreshStore trait.
//!
//! Each principal has one key, `refresh:{principal_id}` under the configured
//! prefix, holding the JSON encoded record. Keys outlive the token they
//! describe by a grace window, so an expired token is still found and
//! reported as expired rather than unknown. The conditional write runs as a
//! Lua script so the compare and the set happen in one server-side step.

use async_trait::async_trait;
use redis::Script;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use tc_core::domain::entities::RefreshTokenRecord;
use tc_core::errors::DomainError;
use tc_core::repositories::{RefreshStore, SetOutcome};

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// KEYS[1] record key; ARGV[1] expected hash or ""; ARGV[2] record; ARGV[3] ttl ms
const COMPARE_AND_SET: &str = r#"
local current = redis.call('GET', KEYS[1])
local current_hash = ''
if current then
    current_hash = cjson.decode(current)['token_hash'] or ''
end
if current_hash ~= ARGV[1] then
    return 0
end
redis.call('SET', KEYS[1], ARGV[2], 'PX', ARGV[3])
return 1
"#;

/// How long a key outlives the expiry of its token
const EXPIRY_GRACE: Duration = Duration::from_secs(24 * 60 * 60);

/// Redis implementation of RefreshStore
pub struct RedisRefreshStore {
    client: RedisClient,
    compare_and_set: Script,
}

impl RedisRefreshStore {
    /// Create a refresh store on top of a connected client
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            compare_and_set: Script::new(COMPARE_AND_SET),
        }
    }

    /// Key holding the record of a principal
    pub fn record_key(&self, principal_id: Uuid) -> String {
        self.client.make_key(&format!("refresh:{}", principal_id))
    }

    /// Key lifetime for a record: the token's own lifetime plus the grace window
    fn ttl_for(record: &RefreshTokenRecord) -> Duration {
        (record.expires_at - record.issued_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
            .saturating_add(EXPIRY_GRACE)
    }

    fn encode(record: &RefreshTokenRecord) -> Result<String, DomainError> {
        serde_json::to_string(record).map_err(|e| InfrastructureError::Serialization(e).into())
    }
}

#[async_trait]
impl RefreshStore for RedisRefreshStore {
    async fn get(&self, principal_id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let raw = self.client.get(&self.record_key(principal_id)).await?;

        match raw {
            Some(raw) => {
                let record = serde_json::from_str(&raw).map_err(InfrastructureError::Serialization)?;
                Ok(Some(record))
            }
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

        let key = self.record_key(principal_id);
        let expected_hash = expected.map(|record| record.token_hash.as_str()).unwrap_or("");
        let payload = Self::encode(&replacement)?;
        let ttl_ms = Self::ttl_for(&replacement).as_millis() as u64;

        // Not retried: a lost reply may hide a swap that already happened
        let mut conn = self.client.connection();
        let swapped: i64 = self
            .compare_and_set
            .key(&key)
            .arg(expected_hash)
            .arg(payload)
            .arg(ttl_ms)
            .invoke_async(&mut conn)
            .await
            .map_err(InfrastructureError::Cache)?;

        if swapped == 1 {
            debug!(principal_id = %principal_id, "Refresh token swapped");
            Ok(SetOutcome::Swapped)
        } else {
            debug!(principal_id = %principal_id, "Refresh token changed concurrently");
            Ok(SetOutcome::Conflict)
        }
    }

    async fn put(&self, record: RefreshTokenRecord) -> Result<(), DomainError> {
        let payload = Self::encode(&record)?;
        self.client
            .set_with_expiry(&self.record_key(record.principal_id), &payload, Self::ttl_for(&record))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(lifetime: chrono::Duration) -> RefreshTokenRecord {
        let issued_at = Utc.with_ymd_and_hms(2024, 11, 29, 20, 58, 20).unwrap();
        RefreshTokenRecord::new(Uuid::new_v4(), "raw-token", issued_at, issued_at + lifetime)
    }

    #[test]
    fn test_key_outlives_token_by_grace_window() {
        let ttl = RedisRefreshStore::ttl_for(&record(chrono::Duration::days(7)));
        assert_eq!(ttl, Duration::from_secs(7 * 24 * 60 * 60) + EXPIRY_GRACE);
        assert!(ttl > Duration::from_secs(7 * 24 * 60 * 60));
    }

    #[test]
    fn test_expired_record_still_gets_grace_window() {
        assert_eq!(
            RedisRefreshStore::ttl_for(&record(chrono::Duration::zero())),
            EXPIRY_GRACE
        );
        assert_eq!(
            RedisRefreshStore::ttl_for(&record(chrono::Duration::seconds(-5))),
            EXPIRY_GRACE
        );
    }

    #[test]
    fn test_encoded_record_carries_hash_field() {
        let record = record(chrono::Duration::minutes(5));
        let json: serde_json::Value =
            serde_json::from_str(&RedisRefreshStore::encode(&record).unwrap()).unwrap();

        assert_eq!(json["token_hash"], record.token_hash.as_str());
        assert!(!json.to_string().contains("raw-token"));
    }
}
