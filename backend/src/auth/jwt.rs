//! JWT token issuance and validation
//!
//! Tokens are compact HS256 JWTs: three dot-separated base64url segments
//! carrying `{sub, uid, iat, exp}`. Keys are pre-computed once at startup
//! and shared behind Arc so per-request validation never re-derives them.

use crate::auth::AuthError;
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Claims embedded in every issued token
///
/// Immutable after issuance; the service never re-signs or mutates a
/// token once handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username, the unique login identifier)
    pub sub: String,
    /// Stable internal user id; mutations are keyed by this, never by a
    /// client-supplied field
    pub uid: Uuid,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Pre-computed signing keys
///
/// Expensive to derive, so they are built once and cloned cheaply.
#[derive(Clone)]
struct TokenKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl TokenKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token issuance and validation service
///
/// Holds the symmetric signing key injected from configuration at
/// startup. Validation consults only this key and the system clock,
/// never the credential store.
#[derive(Clone)]
pub struct TokenService {
    keys: TokenKeys,
    ttl_secs: i64,
}

impl TokenService {
    /// Create a new token service with pre-computed keys
    ///
    /// Call once at application startup and store in `AppState`; do not
    /// create per-request.
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            keys: TokenKeys::new(secret),
            ttl_secs,
        }
    }

    /// Issue a signed bearer token for an authenticated identity
    pub fn issue(&self, user_id: Uuid, username: &str) -> Result<String> {
        self.issue_with_ttl(user_id, username, self.ttl_secs)
    }

    /// Issue a token with an explicit time-to-live
    fn issue_with_ttl(&self, user_id: Uuid, username: &str, ttl_secs: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            uid: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
    }

    /// Validate a token and return its claims
    ///
    /// Fails with `Malformed` when the token does not parse, with
    /// `BadSignature` when it was signed under a different key, and with
    /// `Expired` when `exp` is in the past (zero leeway).
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.keys.decoding, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::Expired,
                    ErrorKind::InvalidSignature => AuthError::BadSignature,
                    _ => AuthError::Malformed,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Configured token lifetime in seconds
    #[inline]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }
}
