//! User repository for database operations
//!
//! Owns the credential rows and the favorites join table. Usernames and
//! emails are unique at the schema level; the repository only ever
//! stores password hashes, never plaintext.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub birthday: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for a partial user update
///
/// `password_hash` is already hashed by the caller; the repository never
/// sees a plaintext password.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub birthday: Option<NaiveDate>,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(
        pool: &PgPool,
        username: &str,
        email: &str,
        password_hash: &str,
        birthday: Option<NaiveDate>,
    ) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, email, password_hash, birthday)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, password_hash, birthday, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(birthday)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find user by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, password_hash, birthday, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, email, password_hash, birthday, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Check if username exists
    pub async fn username_exists(pool: &PgPool, username: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Check if email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Update a user, keyed by internal id
    pub async fn update(pool: &PgPool, id: Uuid, updates: UpdateUser) -> Result<UserRecord> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                birthday = COALESCE($5, birthday),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, password_hash, birthday, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(updates.username)
        .bind(updates.email)
        .bind(updates.password_hash)
        .bind(updates.birthday)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Delete a user, keyed by internal id
    ///
    /// Returns false when no row matched. Favorites go with the user via
    /// ON DELETE CASCADE.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM users WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List a user's favorite movie ids
    pub async fn list_favorites(pool: &PgPool, user_id: Uuid) -> Result<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT movie_id FROM user_favorites
            WHERE user_id = $1
            ORDER BY added_at
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(ids)
    }

    /// Add a movie to a user's favorites (idempotent)
    pub async fn add_favorite(pool: &PgPool, user_id: Uuid, movie_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_favorites (user_id, movie_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, movie_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Remove a movie from a user's favorites
    ///
    /// Returns false when the movie was not in the favorites list.
    pub async fn remove_favorite(pool: &PgPool, user_id: Uuid, movie_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM user_favorites
            WHERE user_id = $1 AND movie_id = $2
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
