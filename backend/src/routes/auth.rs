//! Authentication routes

use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use cinelog_shared::types::{LoginRequest, LoginResponse};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login with username and password
///
/// POST /api/v1/login
///
/// Returns the user's profile and a signed bearer token. Any credential
/// failure yields the same generic 401.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response =
        UserService::login(&state.db, state.tokens(), &req.username, &req.password).await?;
    Ok(Json(response))
}
