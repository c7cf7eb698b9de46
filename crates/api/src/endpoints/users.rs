//! User endpoints: profiles and the follow edge set.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chirp_common::AppResult;

use crate::{
    extractors::ApiKey,
    response::{ResultResponse, UserResponse},
    state::AppState,
};

/// Create the user router, mounted under `/api/users`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/{user_id}", get(get_user))
        .route("/{user_id}/follow", post(follow_user).delete(unfollow_user))
}

/// Profile of the calling user.
async fn get_me(
    ApiKey(key): ApiKey,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let profile = state.user_service.get_me(&key).await?;
    Ok(Json(UserResponse {
        result: true,
        user: profile.into(),
    }))
}

/// Profile of a user by ID.
async fn get_user(
    ApiKey(key): ApiKey,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    let profile = state.user_service.get_by_id(&key, user_id).await?;
    Ok(Json(UserResponse {
        result: true,
        user: profile.into(),
    }))
}

/// Follow a user.
async fn follow_user(
    ApiKey(key): ApiKey,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ResultResponse>> {
    state.user_service.follow(&key, user_id).await?;
    Ok(Json(ResultResponse::ok()))
}

/// Unfollow a user.
async fn unfollow_user(
    ApiKey(key): ApiKey,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> AppResult<Json<ResultResponse>> {
    state.user_service.unfollow(&key, user_id).await?;
    Ok(Json(ResultResponse::ok()))
}
