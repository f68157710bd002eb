//! Movie catalog routes
//!
//! Read-only pass-through queries. All of them require a valid bearer
//! token; the `AuthUser` extractor rejects the request before any query
//! runs.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::repositories::MovieRepository;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use cinelog_shared::types::{Director, MovieResponse};

/// Create movie routes
pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_movies))
        .route("/title/:title", get(get_movie_by_title))
        .route("/genres/:name", get(get_movies_by_genre))
        .route("/directors/:name", get(get_director))
        .route("/directors/:name/movies", get(get_movies_by_director))
}

/// List all movies
///
/// GET /api/v1/movies
async fn list_movies(
    State(state): State<AppState>,
    _auth_user: AuthUser,
) -> ApiResult<Json<Vec<MovieResponse>>> {
    let movies = MovieRepository::list_all(&state.db)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(movies.into_iter().map(Into::into).collect()))
}

/// Get a movie by exact title
///
/// GET /api/v1/movies/title/{title}
async fn get_movie_by_title(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(title): Path<String>,
) -> ApiResult<Json<MovieResponse>> {
    let movie = MovieRepository::find_by_title(&state.db, &title)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;
    Ok(Json(movie.into()))
}

/// List movies matching a genre name
///
/// GET /api/v1/movies/genres/{name}
async fn get_movies_by_genre(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<MovieResponse>>> {
    let movies = MovieRepository::find_by_genre(&state.db, &name)
        .await
        .map_err(ApiError::Internal)?;

    if movies.is_empty() {
        return Err(ApiError::NotFound(
            "No movies found for the given genre".to_string(),
        ));
    }

    Ok(Json(movies.into_iter().map(Into::into).collect()))
}

/// Get a director's details
///
/// GET /api/v1/movies/directors/{name}
async fn get_director(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(name): Path<String>,
) -> ApiResult<Json<Director>> {
    let director = MovieRepository::find_director(&state.db, &name)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| ApiError::NotFound("Director not found".to_string()))?;
    Ok(Json(director))
}

/// List movies by a director
///
/// GET /api/v1/movies/directors/{name}/movies
async fn get_movies_by_director(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(name): Path<String>,
) -> ApiResult<Json<Vec<MovieResponse>>> {
    let movies = MovieRepository::find_by_director(&state.db, &name)
        .await
        .map_err(ApiError::Internal)?;
    Ok(Json(movies.into_iter().map(Into::into).collect()))
}
