//! Credential verification against the user store
//!
//! Read-only: looks up the stored credential and compares the supplied
//! password against the persisted argon2 hash. Never mutates stored
//! credentials and never sees a plaintext password after hashing.

use crate::auth::{AuthError, PasswordService};
use crate::error::ApiError;
use crate::repositories::user::{UserRecord, UserRepository};
use sqlx::PgPool;

/// Credential verifier
pub struct CredentialVerifier;

impl CredentialVerifier {
    /// Verify a username/password pair
    ///
    /// Returns the stored user record on success. Fails with
    /// `AuthError::UnknownUser` when no credential exists under the
    /// username and `AuthError::BadPassword` on a hash mismatch; the
    /// HTTP layer maps both to the same generic 401.
    ///
    /// Hash comparison runs on the blocking thread pool since argon2 is
    /// deliberately CPU-heavy.
    pub async fn verify(
        pool: &PgPool,
        username: &str,
        password: &str,
    ) -> Result<UserRecord, ApiError> {
        let user = UserRepository::find_by_username(pool, username)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(AuthError::UnknownUser)?;

        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone())
                .await
                .map_err(ApiError::Internal)?;

        if !valid {
            return Err(AuthError::BadPassword.into());
        }

        Ok(user)
    }
}
