//! API response types.
//!
//! Every success body carries `result: true`; error bodies are produced by
//! the [`chirp_common::AppError`] `IntoResponse` impl and carry
//! `result: false` plus `error_type`/`error_message`.

use serde::Serialize;

use crate::schemas::{TweetDetail, UserDetail};

/// Bare success response.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub result: bool,
}

impl ResultResponse {
    /// A `{"result": true}` body.
    #[must_use]
    pub const fn ok() -> Self {
        Self { result: true }
    }
}

/// Response for a created tweet.
#[derive(Debug, Serialize)]
pub struct TweetCreatedResponse {
    pub result: bool,
    pub tweet_id: i32,
}

/// Response for a created media record.
#[derive(Debug, Serialize)]
pub struct MediaCreatedResponse {
    pub result: bool,
    pub media_id: i32,
}

/// Response carrying the tweet feed.
#[derive(Debug, Serialize)]
pub struct TweetListResponse {
    pub result: bool,
    pub tweets: Vec<TweetDetail>,
}

/// Response carrying a user profile.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub result: bool,
    pub user: UserDetail,
}
