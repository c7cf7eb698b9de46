//! User service: identity resolution and the follow edge set.

use std::sync::Arc;

use chirp_common::{AppError, AppResult, generate_display_name};
use chirp_db::{entities::user, queries};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

/// A user together with its one-hop follow relations.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user: user::Model,
    pub followers: Vec<user::Model>,
    pub following: Vec<user::Model>,
}

/// Resolve the caller identity for a key, registering it on first sight.
///
/// Registration is race-safe: the insert ignores a unique-key conflict and
/// the winning row is re-read, so two concurrent first-uses of a key end
/// up with exactly one persisted user.
pub async fn resolve_or_register<C: ConnectionTrait>(
    conn: &C,
    key: &str,
) -> AppResult<user::Model> {
    if let Some(user) = queries::user::find_by_key(conn, key).await? {
        return Ok(user);
    }

    let name = generate_display_name();
    if let Some(user) = queries::user::insert_if_unseen(conn, key, &name).await? {
        tracing::debug!(user_id = user.id, "Registered first-seen API key");
        return Ok(user);
    }

    // Lost the insert race; the winning row exists now.
    queries::user::find_by_key(conn, key)
        .await?
        .ok_or_else(|| AppError::Internal("User row missing after key conflict".to_string()))
}

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    db: Arc<DatabaseConnection>,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Profile of the caller itself.
    pub async fn get_me(&self, key: &str) -> AppResult<UserProfile> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let user = resolve_or_register(&txn, key).await?;
        let profile = load_profile(&txn, user).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(profile)
    }

    /// Profile of another user by ID.
    ///
    /// The caller is still resolved first so that an unseen key registers
    /// a user even on this read path.
    pub async fn get_by_id(&self, key: &str, user_id: i32) -> AppResult<UserProfile> {
        let txn = self.db.begin().await.map_err(db_err)?;

        resolve_or_register(&txn, key).await?;
        let user = queries::user::find_by_id(&txn, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        let profile = load_profile(&txn, user).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(profile)
    }

    /// Follow a user.
    pub async fn follow(&self, key: &str, user_id: i32) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let caller = resolve_or_register(&txn, key).await?;
        let target = queries::user::find_by_id(&txn, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User to follow not found".to_string()))?;

        if caller.id == target.id {
            return Err(AppError::BadRequest("Cannot follow yourself".to_string()));
        }
        if queries::user::is_following(&txn, caller.id, target.id).await? {
            return Err(AppError::Conflict(
                "Already following this user".to_string(),
            ));
        }

        queries::user::insert_follow(&txn, caller.id, target.id).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    /// Unfollow a user.
    pub async fn unfollow(&self, key: &str, user_id: i32) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let caller = resolve_or_register(&txn, key).await?;
        let target = queries::user::find_by_id(&txn, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User to unfollow not found".to_string()))?;

        if !queries::user::is_following(&txn, caller.id, target.id).await? {
            return Err(AppError::Conflict("Not following this user".to_string()));
        }

        queries::user::delete_follow(&txn, caller.id, target.id).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}

async fn load_profile<C: ConnectionTrait>(conn: &C, user: user::Model) -> AppResult<UserProfile> {
    let followers = queries::user::followers_of(conn, user.id).await?;
    let following = queries::user::following_of(conn, user.id).await?;
    Ok(UserProfile {
        user,
        followers,
        following,
    })
}

fn db_err(e: sea_orm::DbErr) -> AppError {
    AppError::Database(e.to_string())
}
