//! User service for registration, login, and account management
//!
//! Password hashing and verification run on the blocking thread pool;
//! tokens come from the pre-computed service in `AppState`. All
//! mutations are keyed by the authenticated identity's internal id, not
//! by any client-supplied field.

use crate::auth::{CredentialVerifier, PasswordService, TokenService};
use crate::error::ApiError;
use crate::repositories::user::{UpdateUser, UserRecord, UserRepository};
use crate::repositories::MovieRepository;
use cinelog_shared::types::{LoginResponse, RegisterRequest, UpdateUserRequest, UserProfile};
use cinelog_shared::validation;
use sqlx::PgPool;
use uuid::Uuid;

/// User service for account operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// Open endpoint: no token required. Enforces username and email
    /// uniqueness and stores only the argon2 hash of the password.
    pub async fn register(pool: &PgPool, req: &RegisterRequest) -> Result<UserProfile, ApiError> {
        validation::validate_username(&req.username).map_err(ApiError::Validation)?;
        validation::validate_password(&req.password).map_err(ApiError::Validation)?;
        validation::validate_email(&req.email).map_err(ApiError::Validation)?;

        if UserRepository::username_exists(pool, &req.username)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Username already exists".to_string()));
        }
        if UserRepository::email_exists(pool, &req.email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict(
                "Email address is already taken".to_string(),
            ));
        }

        let password_hash = PasswordService::hash_async(req.password.clone())
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(
            pool,
            &req.username,
            &req.email,
            &password_hash,
            req.birthday,
        )
        .await
        .map_err(ApiError::Internal)?;

        Ok(Self::profile_of(user, Vec::new()))
    }

    /// Login with username and password
    ///
    /// Credential failures surface as one generic 401; the response
    /// never says whether the username or the password was wrong.
    pub async fn login(
        pool: &PgPool,
        tokens: &TokenService,
        username: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let user = CredentialVerifier::verify(pool, username, password).await?;

        let token = tokens
            .issue(user.id, &user.username)
            .map_err(ApiError::Internal)?;

        let profile = Self::load_profile(pool, user).await?;

        Ok(LoginResponse {
            user: profile,
            token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.ttl_secs(),
        })
    }

    /// Get a user's profile by internal id
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<UserProfile, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Self::load_profile(pool, user).await
    }

    /// Update the authenticated user's account
    ///
    /// Partial update; a supplied password is re-hashed before storage.
    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        req: UpdateUserRequest,
    ) -> Result<UserProfile, ApiError> {
        let current = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        if let Some(username) = &req.username {
            validation::validate_username(username).map_err(ApiError::Validation)?;
            if username != &current.username
                && UserRepository::username_exists(pool, username)
                    .await
                    .map_err(ApiError::Internal)?
            {
                return Err(ApiError::Conflict("Username already exists".to_string()));
            }
        }
        if let Some(email) = &req.email {
            validation::validate_email(email).map_err(ApiError::Validation)?;
            if email != &current.email
                && UserRepository::email_exists(pool, email)
                    .await
                    .map_err(ApiError::Internal)?
            {
                return Err(ApiError::Conflict(
                    "Email address is already taken".to_string(),
                ));
            }
        }

        let password_hash = match req.password {
            Some(password) => {
                validation::validate_password(&password).map_err(ApiError::Validation)?;
                Some(
                    PasswordService::hash_async(password)
                        .await
                        .map_err(ApiError::Internal)?,
                )
            }
            None => None,
        };

        let updated = UserRepository::update(
            pool,
            user_id,
            UpdateUser {
                username: req.username,
                email: req.email,
                password_hash,
                birthday: req.birthday,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Self::load_profile(pool, updated).await
    }

    /// Delete the authenticated user's account
    pub async fn delete(pool: &PgPool, user_id: Uuid) -> Result<(), ApiError> {
        let deleted = UserRepository::delete(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    /// Add a movie to the authenticated user's favorites (idempotent)
    pub async fn add_favorite(
        pool: &PgPool,
        user_id: Uuid,
        movie_id: Uuid,
    ) -> Result<UserProfile, ApiError> {
        MovieRepository::find_by_id(pool, movie_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

        UserRepository::add_favorite(pool, user_id, movie_id)
            .await
            .map_err(ApiError::Internal)?;

        Self::get_profile(pool, user_id).await
    }

    /// Remove a movie from the authenticated user's favorites
    pub async fn remove_favorite(
        pool: &PgPool,
        user_id: Uuid,
        movie_id: Uuid,
    ) -> Result<UserProfile, ApiError> {
        let removed = UserRepository::remove_favorite(pool, user_id, movie_id)
            .await
            .map_err(ApiError::Internal)?;

        if !removed {
            return Err(ApiError::NotFound(
                "Movie not found in favorites".to_string(),
            ));
        }

        Self::get_profile(pool, user_id).await
    }

    async fn load_profile(pool: &PgPool, user: UserRecord) -> Result<UserProfile, ApiError> {
        let favorites = UserRepository::list_favorites(pool, user.id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(Self::profile_of(user, favorites))
    }

    fn profile_of(user: UserRecord, favorites: Vec<Uuid>) -> UserProfile {
        UserProfile {
            id: user.id,
            username: user.username,
            email: user.email,
            birthday: user.birthday,
            favorites,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    // Registration/login flows against a real store are covered by the
    // database-backed integration tests in tests/.
}
