//! Application state shared by all endpoint handlers.

#![allow(missing_docs)]

use chirp_core::{MediaService, TweetService, UserService};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub tweet_service: TweetService,
    pub media_service: MediaService,
}
