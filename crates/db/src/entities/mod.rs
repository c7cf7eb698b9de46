//! Database entities.

#![allow(missing_docs)]

pub mod follow;
pub mod like;
pub mod media;
pub mod tweet;
pub mod user;

pub use follow::Entity as Follow;
pub use like::Entity as Like;
pub use media::Entity as Media;
pub use tweet::Entity as Tweet;
pub use user::Entity as User;
