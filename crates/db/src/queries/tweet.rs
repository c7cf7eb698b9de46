//! Tweet and like-edge queries.

use chirp_common::AppResult;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
};

use super::db_err;
use crate::entities::{Like, Tweet, like, tweet, user};

/// Find a tweet by ID.
pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<Option<tweet::Model>> {
    Tweet::find_by_id(id).one(conn).await.map_err(db_err)
}

/// The full tweet table, ordered by ascending ID (insertion order).
pub async fn list_all<C: ConnectionTrait>(conn: &C) -> AppResult<Vec<tweet::Model>> {
    Tweet::find()
        .order_by_asc(tweet::Column::Id)
        .all(conn)
        .await
        .map_err(db_err)
}

/// Insert a tweet and return the stored row.
pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    content: &str,
    attachments: Vec<String>,
    author_id: i32,
) -> AppResult<tweet::Model> {
    let model = tweet::ActiveModel {
        content: Set(content.to_owned()),
        attachments: Set(attachments),
        author_id: Set(author_id),
        ..Default::default()
    };
    Tweet::insert(model)
        .exec_with_returning(conn)
        .await
        .map_err(db_err)
}

/// Delete a tweet. Like edges go with it via the foreign key cascade.
pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<()> {
    Tweet::delete_by_id(id)
        .exec(conn)
        .await
        .map(|_| ())
        .map_err(db_err)
}

/// Users who liked `tweet_id`, ordered by ascending user ID.
pub async fn likers_of<C: ConnectionTrait>(
    conn: &C,
    tweet_id: i32,
) -> AppResult<Vec<user::Model>> {
    let edges = Like::find()
        .filter(like::Column::TweetId.eq(tweet_id))
        .all(conn)
        .await
        .map_err(db_err)?;
    super::user::find_by_ids(conn, edges.into_iter().map(|e| e.user_id).collect()).await
}

/// Set-membership check on the like edge set.
pub async fn has_liked<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    tweet_id: i32,
) -> AppResult<bool> {
    Like::find_by_id((user_id, tweet_id))
        .one(conn)
        .await
        .map(|edge| edge.is_some())
        .map_err(db_err)
}

/// Insert a like edge.
pub async fn insert_like<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    tweet_id: i32,
) -> AppResult<()> {
    let model = like::ActiveModel {
        user_id: Set(user_id),
        tweet_id: Set(tweet_id),
    };
    Like::insert(model)
        .exec_without_returning(conn)
        .await
        .map(|_| ())
        .map_err(db_err)
}

/// Remove a like edge.
pub async fn delete_like<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
    tweet_id: i32,
) -> AppResult<()> {
    Like::delete_by_id((user_id, tweet_id))
        .exec(conn)
        .await
        .map(|_| ())
        .map_err(db_err)
}
