//! Tweet endpoints: the feed, posting, deletion, and likes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use chirp_common::AppResult;
use serde::Deserialize;
use validator::Validate;

use crate::{
    extractors::ApiKey,
    response::{ResultResponse, TweetCreatedResponse, TweetListResponse},
    state::AppState,
};

/// Create the tweet router, mounted under `/api/tweets`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tweets).post(create_tweet))
        .route("/{tweet_id}", axum::routing::delete(delete_tweet))
        .route("/{tweet_id}/likes", post(like_tweet).delete(unlike_tweet))
}

/// Body of a post-tweet request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTweetRequest {
    /// Tweet text content.
    #[validate(length(max = 500, message = "Tweet content too long"))]
    pub tweet_data: String,
    /// Media IDs to snapshot as attachment links.
    #[serde(default)]
    pub tweet_media_ids: Option<Vec<i32>>,
}

/// Post a tweet.
async fn create_tweet(
    ApiKey(key): ApiKey,
    State(state): State<AppState>,
    Json(req): Json<CreateTweetRequest>,
) -> AppResult<Json<TweetCreatedResponse>> {
    req.validate()?;

    let tweet_id = state
        .tweet_service
        .create(&key, &req.tweet_data, req.tweet_media_ids)
        .await?;

    Ok(Json(TweetCreatedResponse {
        result: true,
        tweet_id,
    }))
}

/// The whole feed, ordered by ascending tweet ID.
async fn list_tweets(
    ApiKey(key): ApiKey,
    State(state): State<AppState>,
) -> AppResult<Json<TweetListResponse>> {
    let views = state.tweet_service.list(&key).await?;
    Ok(Json(TweetListResponse {
        result: true,
        tweets: views.into_iter().map(Into::into).collect(),
    }))
}

/// Delete a tweet (author only).
async fn delete_tweet(
    ApiKey(key): ApiKey,
    State(state): State<AppState>,
    Path(tweet_id): Path<i32>,
) -> AppResult<Json<ResultResponse>> {
    state.tweet_service.delete(&key, tweet_id).await?;
    Ok(Json(ResultResponse::ok()))
}

/// Like a tweet.
async fn like_tweet(
    ApiKey(key): ApiKey,
    State(state): State<AppState>,
    Path(tweet_id): Path<i32>,
) -> AppResult<Json<ResultResponse>> {
    state.tweet_service.like(&key, tweet_id).await?;
    Ok(Json(ResultResponse::ok()))
}

/// Remove a like from a tweet.
async fn unlike_tweet(
    ApiKey(key): ApiKey,
    State(state): State<AppState>,
    Path(tweet_id): Path<i32>,
) -> AppResult<Json<ResultResponse>> {
    state.tweet_service.unlike(&key, tweet_id).await?;
    Ok(Json(ResultResponse::ok()))
}
