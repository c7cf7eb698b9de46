//! User and follow-edge queries.

use chirp_common::AppResult;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use super::db_err;
use crate::entities::{Follow, User, follow, user};

/// Find a user by API key.
pub async fn find_by_key<C: ConnectionTrait>(conn: &C, key: &str) -> AppResult<Option<user::Model>> {
    User::find()
        .filter(user::Column::Key.eq(key))
        .one(conn)
        .await
        .map_err(db_err)
}

/// Find a user by ID.
pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> AppResult<Option<user::Model>> {
    User::find_by_id(id).one(conn).await.map_err(db_err)
}

/// Batch-load users by ID, ordered by ascending ID.
pub async fn find_by_ids<C: ConnectionTrait>(conn: &C, ids: Vec<i32>) -> AppResult<Vec<user::Model>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    User::find()
        .filter(user::Column::Id.is_in(ids))
        .order_by_asc(user::Column::Id)
        .all(conn)
        .await
        .map_err(db_err)
}

/// Insert a user unless a row with the same key already exists.
///
/// Uses `ON CONFLICT DO NOTHING` on the unique key column, so a
/// concurrent insert of the same key never fails the statement; the
/// caller re-reads on `None` to pick up the winning row.
pub async fn insert_if_unseen<C: ConnectionTrait>(
    conn: &C,
    key: &str,
    name: &str,
) -> AppResult<Option<user::Model>> {
    let model = user::ActiveModel {
        key: Set(key.to_owned()),
        name: Set(name.to_owned()),
        ..Default::default()
    };

    // A suppressed insert surfaces as RecordNotInserted without a
    // RETURNING clause, but as RecordNotFound when RETURNING yields no
    // row; both mean the key was already taken.
    match User::insert(model)
        .on_conflict(OnConflict::column(user::Column::Key).do_nothing().to_owned())
        .exec_with_returning(conn)
        .await
    {
        Ok(user) => Ok(Some(user)),
        Err(DbErr::RecordNotInserted | DbErr::RecordNotFound(_)) => Ok(None),
        Err(e) => Err(db_err(e)),
    }
}

/// Users following `user_id`.
pub async fn followers_of<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
) -> AppResult<Vec<user::Model>> {
    let edges = Follow::find()
        .filter(follow::Column::FolloweeId.eq(user_id))
        .all(conn)
        .await
        .map_err(db_err)?;
    find_by_ids(conn, edges.into_iter().map(|e| e.follower_id).collect()).await
}

/// Users that `user_id` is following (the derived inverse view).
pub async fn following_of<C: ConnectionTrait>(
    conn: &C,
    user_id: i32,
) -> AppResult<Vec<user::Model>> {
    let edges = Follow::find()
        .filter(follow::Column::FollowerId.eq(user_id))
        .all(conn)
        .await
        .map_err(db_err)?;
    find_by_ids(conn, edges.into_iter().map(|e| e.followee_id).collect()).await
}

/// Set-membership check on the follow edge set.
pub async fn is_following<C: ConnectionTrait>(
    conn: &C,
    follower_id: i32,
    followee_id: i32,
) -> AppResult<bool> {
    Follow::find_by_id((follower_id, followee_id))
        .one(conn)
        .await
        .map(|edge| edge.is_some())
        .map_err(db_err)
}

/// Insert a follow edge.
pub async fn insert_follow<C: ConnectionTrait>(
    conn: &C,
    follower_id: i32,
    followee_id: i32,
) -> AppResult<()> {
    let model = follow::ActiveModel {
        follower_id: Set(follower_id),
        followee_id: Set(followee_id),
    };
    Follow::insert(model)
        .exec_without_returning(conn)
        .await
        .map(|_| ())
        .map_err(db_err)
}

/// Remove a follow edge.
pub async fn delete_follow<C: ConnectionTrait>(
    conn: &C,
    follower_id: i32,
    followee_id: i32,
) -> AppResult<()> {
    Follow::delete_by_id((follower_id, followee_id))
        .exec(conn)
        .await
        .map(|_| ())
        .map_err(db_err)
}
