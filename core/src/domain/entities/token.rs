//! Token entities for access/refresh authentication.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::principal::Principal;

/// Number of random bytes behind every refresh token
pub const REFRESH_TOKEN_BYTES: usize = 64;

/// Claims structure for the access token payload
///
/// All timestamps are Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID)
    pub sub: String,

    /// JWT ID, unique per issued token
    pub jti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Principal display name
    pub name: String,

    /// Principal email
    pub email: String,

    /// Issuer
    ///
    /// Absent in the payload decodes as empty so the validator can report it
    /// as an issuer failure rather than a malformed token.
    #[serde(default)]
    pub iss: String,

    /// Audience
    #[serde(default)]
    pub aud: String,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Builds the claim set for a principal.
    ///
    /// Every claim is listed explicitly; nothing else from the principal
    /// ends up in the token.
    pub fn for_principal(
        principal: &Principal,
        jti: Uuid,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        issuer: &str,
        audience: &str,
    ) -> Self {
        Self {
            sub: principal.id.to_string(),
            jti: jti.to_string(),
            iat: issued_at.timestamp(),
            name: principal.name.clone(),
            email: principal.email.clone(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            exp: expires_at.timestamp(),
        }
    }

    /// Checks whether the token is expired at `now`
    ///
    /// A token is expired from its `exp` second onwards.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Gets the principal ID from the subject claim
    pub fn principal_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Expiration as a timestamp, if it is representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Server-side refresh token state for one principal.
///
/// Only the SHA-256 digest of the raw token is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Principal this token belongs to
    pub principal_id: Uuid,

    /// Hex encoded SHA-256 of the raw token
    pub token_hash: String,

    /// When the token was issued
    pub issued_at: DateTime<Utc>,

    /// When the token stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Creates a record for a freshly issued raw token
    pub fn new(
        principal_id: Uuid,
        raw_token: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            principal_id,
            token_hash: Self::hash_token(raw_token),
            issued_at,
            expires_at,
        }
    }

    /// Hashes a raw refresh token for storage
    pub fn hash_token(raw_token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw_token.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Compares a presented raw token against the stored digest in constant time
    pub fn matches(&self, presented: &str) -> bool {
        let presented_hash = Self::hash_token(presented);
        constant_time_eq(presented_hash.as_bytes(), self.token_hash.as_bytes())
    }

    /// Checks whether the record is expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Freshly issued access/refresh pair.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedTokenPair {
    /// Signed access token
    pub access_token: String,

    /// Access token expiry
    pub access_expires_at: DateTime<Utc>,

    /// Raw refresh token, handed to the client exactly once
    pub refresh_token: String,

    /// Refresh token expiry
    pub refresh_expires_at: DateTime<Utc>,

    /// Issue time shared by both tokens
    pub issued_at: DateTime<Utc>,

    /// `jti` of the access token
    pub jti: Uuid,
}

impl IssuedTokenPair {
    /// Store record for the refresh half of this pair
    pub fn refresh_record(&self, principal_id: Uuid) -> RefreshTokenRecord {
        RefreshTokenRecord::new(
            principal_id,
            &self.refresh_token,
            self.issued_at,
            self.refresh_expires_at,
        )
    }
}

impl fmt::Debug for IssuedTokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedTokenPair")
            .field("access_token", &"[REDACTED]")
            .field("access_expires_at", &self.access_expires_at)
            .field("refresh_token", &"[REDACTED]")
            .field("refresh_expires_at", &self.refresh_expires_at)
            .field("issued_at", &self.issued_at)
            .field("jti", &self.jti)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 29, 20, 58, 20).unwrap()
    }

    #[test]
    fn test_claims_for_principal() {
        let principal = Principal::new("Ana", "ana@example.com");
        let jti = Uuid::new_v4();
        let now = fixed_now();
        let claims = Claims::for_principal(
            &principal,
            jti,
            now,
            now + Duration::minutes(5),
            "token-core",
            "token-core-api",
        );

        assert_eq!(claims.sub, principal.id.to_string());
        assert_eq!(claims.jti, jti.to_string());
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, now.timestamp() + 300);
        assert_eq!(claims.name, "Ana");
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.iss, "token-core");
        assert_eq!(claims.aud, "token-core-api");
        assert_eq!(claims.principal_id().unwrap(), principal.id);
    }

    #[test]
    fn test_claims_serialize_only_known_fields() {
        let principal = Principal::new("Ana", "ana@example.com");
        let now = fixed_now();
        let claims = Claims::for_principal(
            &principal,
            Uuid::new_v4(),
            now,
            now + Duration::minutes(5),
            "iss",
            "aud",
        );

        let value = serde_json::to_value(&claims).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["aud", "email", "exp", "iat", "iss", "jti", "name", "sub"]);
    }

    #[test]
    fn test_claims_expiry_boundary() {
        let principal = Principal::new("Ana", "ana@example.com");
        let now = fixed_now();
        let expires_at = now + Duration::minutes(5);
        let claims =
            Claims::for_principal(&principal, Uuid::new_v4(), now, expires_at, "iss", "aud");

        assert!(!claims.is_expired_at(expires_at - Duration::seconds(1)));
        assert!(claims.is_expired_at(expires_at));
        assert_eq!(claims.expires_at(), Some(expires_at));
    }

    #[test]
    fn test_record_stores_hash_not_raw_token() {
        let now = fixed_now();
        let record = RefreshTokenRecord::new(
            Uuid::new_v4(),
            "raw-refresh-token",
            now,
            now + Duration::hours(1),
        );

        assert_ne!(record.token_hash, "raw-refresh-token");
        assert_eq!(record.token_hash.len(), 64);
        assert!(record.matches("raw-refresh-token"));
        assert!(!record.matches("raw-refresh-tokeN"));
        assert!(!record.matches(""));
    }

    #[test]
    fn test_record_expiry_is_inclusive() {
        let now = fixed_now();
        let record =
            RefreshTokenRecord::new(Uuid::new_v4(), "token", now, now + Duration::hours(1));

        assert!(!record.is_expired_at(now + Duration::minutes(59)));
        assert!(record.is_expired_at(now + Duration::hours(1)));
    }

    #[test]
    fn test_token_pair_debug_redacts_tokens() {
        let now = fixed_now();
        let pair = IssuedTokenPair {
            access_token: "header.payload.signature".to_string(),
            access_expires_at: now,
            refresh_token: "secret-refresh".to_string(),
            refresh_expires_at: now,
            issued_at: now,
            jti: Uuid::new_v4(),
        };

        let debug = format!("{:?}", pair);
        assert!(!debug.contains("secret-refresh"));
        assert!(!debug.contains("header.payload.signature"));
        assert!(debug.contains("[REDACTED]"));
    }
}
