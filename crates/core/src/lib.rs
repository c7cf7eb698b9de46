//! Business logic for chirp.
//!
//! One service per domain aggregate:
//!
//! - [`UserService`]: identity resolution and the follow edge set
//! - [`TweetService`]: posting, deletion, likes, and the feed
//! - [`MediaService`]: uploads bridged to the content store
//!
//! Each mutating service method owns exactly one database transaction;
//! the query layer underneath composes into it.

pub mod services;

pub use services::{
    IMAGE_ROUTE_PREFIX, MediaService, TweetService, TweetView, UserProfile, UserService,
    resolve_or_register,
};
