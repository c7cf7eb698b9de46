//! Tweet service: posting, deletion, likes, and the feed.

use std::sync::Arc;

use chirp_common::{AppError, AppResult};
use chirp_db::{
    entities::{tweet, user},
    queries,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::services::user::resolve_or_register;

/// A tweet together with its author and likers.
#[derive(Debug, Clone)]
pub struct TweetView {
    pub tweet: tweet::Model,
    pub author: user::Model,
    pub likers: Vec<user::Model>,
}

/// Tweet service for business logic.
#[derive(Clone)]
pub struct TweetService {
    db: Arc<DatabaseConnection>,
}

impl TweetService {
    /// Create a new tweet service.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Post a tweet, resolving attachment media IDs to link snapshots.
    ///
    /// Unknown media IDs are silently skipped. Returns the new tweet ID.
    pub async fn create(
        &self,
        key: &str,
        content: &str,
        media_ids: Option<Vec<i32>>,
    ) -> AppResult<i32> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let caller = resolve_or_register(&txn, key).await?;

        let attachments = match media_ids {
            Some(ids) if !ids.is_empty() => queries::media::links_by_ids(&txn, &ids).await?,
            _ => Vec::new(),
        };

        let tweet = queries::tweet::insert(&txn, content, attachments, caller.id).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(tweet.id)
    }

    /// Delete a tweet. Only the author may do this.
    pub async fn delete(&self, key: &str, tweet_id: i32) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let caller = resolve_or_register(&txn, key).await?;
        let tweet = queries::tweet::find_by_id(&txn, tweet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tweet not found".to_string()))?;

        if tweet.author_id != caller.id {
            return Err(AppError::Forbidden(
                "Not authorized to delete this tweet".to_string(),
            ));
        }

        queries::tweet::delete(&txn, tweet.id).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    /// Like a tweet.
    pub async fn like(&self, key: &str, tweet_id: i32) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let caller = resolve_or_register(&txn, key).await?;
        let tweet = queries::tweet::find_by_id(&txn, tweet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tweet not found".to_string()))?;

        if queries::tweet::has_liked(&txn, caller.id, tweet.id).await? {
            return Err(AppError::Conflict("Tweet already liked".to_string()));
        }

        queries::tweet::insert_like(&txn, caller.id, tweet.id).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    /// Remove a like from a tweet.
    pub async fn unlike(&self, key: &str, tweet_id: i32) -> AppResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let caller = resolve_or_register(&txn, key).await?;
        let tweet = queries::tweet::find_by_id(&txn, tweet_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Tweet not found".to_string()))?;

        if !queries::tweet::has_liked(&txn, caller.id, tweet.id).await? {
            return Err(AppError::Conflict("Tweet was not liked".to_string()));
        }

        queries::tweet::delete_like(&txn, caller.id, tweet.id).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    /// The whole feed, ascending by ID, with authors and likers attached.
    ///
    /// The caller is resolved first so an unseen key registers a user even
    /// on this read path.
    pub async fn list(&self, key: &str) -> AppResult<Vec<TweetView>> {
        let txn = self.db.begin().await.map_err(db_err)?;

        resolve_or_register(&txn, key).await?;

        let tweets = queries::tweet::list_all(&txn).await?;
        let views = load_views(&txn, tweets).await?;

        txn.commit().await.map_err(db_err)?;
        Ok(views)
    }
}

async fn load_views<C: ConnectionTrait>(
    conn: &C,
    tweets: Vec<tweet::Model>,
) -> AppResult<Vec<TweetView>> {
    let mut author_ids: Vec<i32> = tweets.iter().map(|t| t.author_id).collect();
    author_ids.sort_unstable();
    author_ids.dedup();

    let authors = queries::user::find_by_ids(conn, author_ids).await?;

    let mut views = Vec::with_capacity(tweets.len());
    for tweet in tweets {
        let author = authors
            .iter()
            .find(|u| u.id == tweet.author_id)
            .cloned()
            // The FK guarantees an author row; a miss means a broken schema.
            .ok_or_else(|| {
                AppError::Internal(format!("Author {} missing for tweet {}", tweet.author_id, tweet.id))
            })?;
        let likers = queries::tweet::likers_of(conn, tweet.id).await?;
        views.push(TweetView {
            tweet,
            author,
            likers,
        });
    }
    Ok(views)
}

fn db_err(e: sea_orm::DbErr) -> AppError {
    AppError::Database(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_db::entities::like;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_user(id: i32, key: &str) -> user::Model {
        user::Model {
            id,
            key: key.to_string(),
            name: "qwertyuiopasdf".to_string(),
        }
    }

    fn test_tweet(id: i32, author_id: i32) -> tweet::Model {
        tweet::Model {
            id,
            content: "hello world".to_string(),
            attachments: Vec::new(),
            author_id,
        }
    }

    #[tokio::test]
    async fn test_create_returns_new_id() {
        let caller = test_user(1, "k1");
        let tweet = test_tweet(10, 1);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[caller]])
                .append_query_results([[tweet]])
                .into_connection(),
        );

        let id = TweetService::new(db)
            .create("k1", "hello world", None)
            .await
            .unwrap();

        assert_eq!(id, 10);
    }

    #[tokio::test]
    async fn test_delete_missing_tweet_is_not_found() {
        let caller = test_user(1, "k1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[caller]])
                .append_query_results([Vec::<tweet::Model>::new()])
                .into_connection(),
        );

        let err = TweetService::new(db).delete("k1", 99).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_by_non_author_is_forbidden() {
        let caller = test_user(1, "k1");
        let tweet = test_tweet(10, 2);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[caller]])
                .append_query_results([[tweet]])
                .into_connection(),
        );

        let err = TweetService::new(db).delete("k1", 10).await.unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_like_twice_conflicts() {
        let caller = test_user(1, "k1");
        let tweet = test_tweet(10, 2);
        let edge = like::Model {
            user_id: 1,
            tweet_id: 10,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[caller]])
                .append_query_results([[tweet]])
                .append_query_results([[edge]])
                .into_connection(),
        );

        let err = TweetService::new(db).like("k1", 10).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unlike_without_like_conflicts() {
        let caller = test_user(1, "k1");
        let tweet = test_tweet(10, 2);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[caller]])
                .append_query_results([[tweet]])
                .append_query_results([Vec::<like::Model>::new()])
                .into_connection(),
        );

        let err = TweetService::new(db).unlike("k1", 10).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_empty_feed() {
        let caller = test_user(1, "k1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[caller]])
                .append_query_results([Vec::<tweet::Model>::new()])
                .into_connection(),
        );

        let views = TweetService::new(db).list("k1").await.unwrap();

        assert!(views.is_empty());
    }

    #[tokio::test]
    async fn test_list_attaches_author_and_likers() {
        let caller = test_user(1, "k1");
        let author = test_user(2, "k2");
        let tweet = test_tweet(10, 2);
        let edge = like::Model {
            user_id: 1,
            tweet_id: 10,
        };
        let liker = test_user(1, "k1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[caller]])
                .append_query_results([[tweet.clone()]])
                .append_query_results([[author.clone()]])
                .append_query_results([[edge]])
                .append_query_results([[liker.clone()]])
                .into_connection(),
        );

        let views = TweetService::new(db).list("k1").await.unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].tweet, tweet);
        assert_eq!(views[0].author, author);
        assert_eq!(views[0].likers, vec![liker]);
    }
}
