//! Business logic services.

pub mod media;
pub mod tweet;
pub mod user;

pub use media::{IMAGE_ROUTE_PREFIX, MediaService};
pub use tweet::{TweetService, TweetView};
pub use user::{UserProfile, UserService, resolve_or_register};
