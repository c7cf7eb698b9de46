//! HTTP endpoints.

pub mod media;
pub mod tweets;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/tweets", tweets::router())
        .nest("/api/users", users::router())
        .merge(media::router())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chirp_common::LocalStorage;
    use chirp_core::{MediaService, TweetService, UserService};
    use chirp_db::entities::{like, tweet, user};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use tower::ServiceExt;

    use super::router;
    use crate::state::AppState;

    fn state_with(db: DatabaseConnection) -> AppState {
        let db = Arc::new(db);
        let store = Arc::new(LocalStorage::new(std::env::temp_dir().join("chirp-api-tests")));
        AppState {
            user_service: UserService::new(Arc::clone(&db)),
            tweet_service: TweetService::new(Arc::clone(&db)),
            media_service: MediaService::new(db, store),
        }
    }

    fn test_user(id: i32, key: &str) -> user::Model {
        user::Model {
            id,
            key: key.to_string(),
            name: "qwertyuiopasdf".to_string(),
        }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_api_key_is_403() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = router().with_state(state_with(db));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/users/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = body_json(response).await;
        assert_eq!(json["result"], serde_json::json!(false));
        assert_eq!(json["error_type"], serde_json::json!("MISSING_API_KEY"));
    }

    #[tokio::test]
    async fn test_get_me_composes_empty_relations() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user(1, "k1")]])
            .append_query_results([Vec::<chirp_db::entities::follow::Model>::new()])
            .append_query_results([Vec::<chirp_db::entities::follow::Model>::new()])
            .into_connection();
        let app = router().with_state(state_with(db));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/users/me")
                    .header("api-key", "k1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({
                "result": true,
                "user": {"id": 1, "name": "qwertyuiopasdf", "followers": [], "following": []},
            })
        );
    }

    #[tokio::test]
    async fn test_double_like_is_405() {
        let caller = test_user(1, "k1");
        let tweet = tweet::Model {
            id: 10,
            content: "hello".to_string(),
            attachments: Vec::new(),
            author_id: 2,
        };
        let edge = like::Model {
            user_id: 1,
            tweet_id: 10,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[caller]])
            .append_query_results([[tweet]])
            .append_query_results([[edge]])
            .into_connection();
        let app = router().with_state(state_with(db));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/tweets/10/likes")
                    .header("api-key", "k1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = body_json(response).await;
        assert_eq!(json["result"], serde_json::json!(false));
        assert_eq!(json["error_type"], serde_json::json!("CONFLICT"));
    }

    #[tokio::test]
    async fn test_empty_feed_lists_empty_array() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_user(1, "k1")]])
            .append_query_results([Vec::<tweet::Model>::new()])
            .into_connection();
        let app = router().with_state(state_with(db));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/tweets")
                    .header("api-key", "k1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({"result": true, "tweets": []}));
    }
}
