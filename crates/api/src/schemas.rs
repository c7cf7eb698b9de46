//! Client-facing representations of entities.

use chirp_core::{TweetView, UserProfile};
use chirp_db::entities::{tweet, user};
use serde::Serialize;

/// Brief user shape: `{id, name}`.
///
/// Used for tweet authors and follower/following lists.
#[derive(Debug, Clone, Serialize)]
pub struct BriefUser {
    pub id: i32,
    pub name: String,
}

impl From<user::Model> for BriefUser {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// The historical alternative brief shape: `{user_id, name}`.
///
/// Only tweet `likes` arrays use this one. The divergence from
/// [`BriefUser`] is preserved for wire compatibility; see DESIGN.md.
#[derive(Debug, Clone, Serialize)]
pub struct LikerUser {
    pub user_id: i32,
    pub name: String,
}

impl From<user::Model> for LikerUser {
    fn from(user: user::Model) -> Self {
        Self {
            user_id: user.id,
            name: user.name,
        }
    }
}

/// Detailed user shape with one-hop follow relations.
///
/// Empty relation sets serialize as empty arrays, never null.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    pub id: i32,
    pub name: String,
    pub followers: Vec<BriefUser>,
    pub following: Vec<BriefUser>,
}

impl From<UserProfile> for UserDetail {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.user.id,
            name: profile.user.name,
            followers: profile.followers.into_iter().map(Into::into).collect(),
            following: profile.following.into_iter().map(Into::into).collect(),
        }
    }
}

/// Detailed tweet shape with author and likers attached.
#[derive(Debug, Clone, Serialize)]
pub struct TweetDetail {
    pub id: i32,
    pub content: String,
    pub attachments: Vec<String>,
    pub author: BriefUser,
    pub likes: Vec<LikerUser>,
}

impl From<TweetView> for TweetDetail {
    fn from(view: TweetView) -> Self {
        let tweet::Model {
            id,
            content,
            attachments,
            ..
        } = view.tweet;
        Self {
            id,
            content,
            attachments,
            author: view.author.into(),
            likes: view.likers.into_iter().map(Into::into).collect(),
        }
    }
}
