//! User account and favorites routes
//!
//! Every route that touches a specific user's account first checks that
//! the authenticated identity owns it: the claim subject must match the
//! path username, otherwise 403 regardless of token validity. The
//! actual mutation is then keyed by the authenticated internal id.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use cinelog_shared::types::{RegisterRequest, UpdateUserRequest, UserProfile};
use uuid::Uuid;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/:username", get(get_user).put(update_user).delete(delete_user))
        .route(
            "/:username/favorites/:movie_id",
            post(add_favorite).delete(remove_favorite),
        )
}

/// A valid token proves identity, not authorization for a specific
/// target; this is the per-resource ownership check on top of it.
fn ensure_owner(auth: &AuthUser, username: &str) -> Result<(), ApiError> {
    if auth.username != username {
        return Err(ApiError::Forbidden(
            "You are not authorized to access this user".to_string(),
        ));
    }
    Ok(())
}

/// Register a new user
///
/// POST /api/v1/users
///
/// Open endpoint; returns 201 with the new profile. The password is
/// hashed on the blocking thread pool and only the hash is stored.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let profile = UserService::register(&state.db, &req).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Get a user's profile
///
/// GET /api/v1/users/{username}
async fn get_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(username): Path<String>,
) -> ApiResult<Json<UserProfile>> {
    ensure_owner(&auth_user, &username)?;
    let profile = UserService::get_profile(&state.db, auth_user.user_id).await?;
    Ok(Json(profile))
}

/// Update a user's account
///
/// PUT /api/v1/users/{username}
async fn update_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(username): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserProfile>> {
    ensure_owner(&auth_user, &username)?;
    let profile = UserService::update(&state.db, auth_user.user_id, req).await?;
    Ok(Json(profile))
}

/// Delete a user's account
///
/// DELETE /api/v1/users/{username}
async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(username): Path<String>,
) -> ApiResult<StatusCode> {
    ensure_owner(&auth_user, &username)?;
    UserService::delete(&state.db, auth_user.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a movie to a user's favorites
///
/// POST /api/v1/users/{username}/favorites/{movie_id}
async fn add_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<UserProfile>> {
    ensure_owner(&auth_user, &username)?;
    let profile = UserService::add_favorite(&state.db, auth_user.user_id, movie_id).await?;
    Ok(Json(profile))
}

/// Remove a movie from a user's favorites
///
/// DELETE /api/v1/users/{username}/favorites/{movie_id}
async fn remove_favorite(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((username, movie_id)): Path<(String, Uuid)>,
) -> ApiResult<Json<UserProfile>> {
    ensure_owner(&auth_user, &username)?;
    let profile = UserService::remove_favorite(&state.db, auth_user.user_id, movie_id).await?;
    Ok(Json(profile))
}
