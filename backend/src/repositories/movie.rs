//! Movie repository for database operations
//!
//! Movies keep their genre and director as embedded JSONB documents, so
//! lookups by genre or director name are field queries into the
//! document rather than joins.

use anyhow::Result;
use cinelog_shared::types::{Director, Genre, MovieResponse};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

/// Movie record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MovieRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub genre: Json<Genre>,
    pub director: Json<Director>,
    pub image_path: Option<String>,
    pub featured: bool,
}

impl From<MovieRecord> for MovieResponse {
    fn from(record: MovieRecord) -> Self {
        MovieResponse {
            id: record.id,
            title: record.title,
            description: record.description,
            genre: record.genre.0,
            director: record.director.0,
            image_path: record.image_path,
            featured: record.featured,
        }
    }
}

const MOVIE_COLUMNS: &str = "id, title, description, genre, director, image_path, featured";

/// Movie repository for database operations
pub struct MovieRepository;

impl MovieRepository {
    /// List all movies
    pub async fn list_all(pool: &PgPool) -> Result<Vec<MovieRecord>> {
        let movies = sqlx::query_as::<_, MovieRecord>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title"
        ))
        .fetch_all(pool)
        .await?;

        Ok(movies)
    }

    /// Find a movie by exact title
    pub async fn find_by_title(pool: &PgPool, title: &str) -> Result<Option<MovieRecord>> {
        let movie = sqlx::query_as::<_, MovieRecord>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE title = $1"
        ))
        .bind(title)
        .fetch_optional(pool)
        .await?;

        Ok(movie)
    }

    /// Find a movie by id
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<MovieRecord>> {
        let movie = sqlx::query_as::<_, MovieRecord>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(movie)
    }

    /// List movies whose embedded genre matches by name
    pub async fn find_by_genre(pool: &PgPool, genre_name: &str) -> Result<Vec<MovieRecord>> {
        let movies = sqlx::query_as::<_, MovieRecord>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE genre->>'name' = $1 ORDER BY title"
        ))
        .bind(genre_name)
        .fetch_all(pool)
        .await?;

        Ok(movies)
    }

    /// List movies whose embedded director matches by name
    pub async fn find_by_director(pool: &PgPool, director_name: &str) -> Result<Vec<MovieRecord>> {
        let movies = sqlx::query_as::<_, MovieRecord>(&format!(
            "SELECT {MOVIE_COLUMNS} FROM movies WHERE director->>'name' = $1 ORDER BY title"
        ))
        .bind(director_name)
        .fetch_all(pool)
        .await?;

        Ok(movies)
    }

    /// Fetch a director's details from any movie they directed
    pub async fn find_director(pool: &PgPool, director_name: &str) -> Result<Option<Director>> {
        let director = sqlx::query_scalar::<_, Json<Director>>(
            r#"
            SELECT director FROM movies
            WHERE director->>'name' = $1
            LIMIT 1
            "#,
        )
        .bind(director_name)
        .fetch_optional(pool)
        .await?;

        Ok(director.map(|d| d.0))
    }
}

#[cfg(test)]
mod tests {
    // Integration tests require database - see tests/movies_integration_test.rs
}
