//! Media service: the bridge between uploads, the content store, and the
//! media table.

use std::sync::Arc;

use chirp_common::{AppResult, StorageBackend, validate_file_name};
use chirp_db::queries;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::services::user::resolve_or_register;

/// Path prefix media links are served under.
pub const IMAGE_ROUTE_PREFIX: &str = "/api/images";

/// Media service for business logic.
#[derive(Clone)]
pub struct MediaService {
    db: Arc<DatabaseConnection>,
    store: Arc<dyn StorageBackend>,
}

impl MediaService {
    /// Create a new media service.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, store: Arc<dyn StorageBackend>) -> Self {
        Self { db, store }
    }

    /// Store an uploaded file and record it, returning the media ID.
    ///
    /// The file is written before the database transaction opens, matching
    /// the store's last-write-wins contract; a failed insert leaves the
    /// file behind but no row pointing at it.
    pub async fn upload(
        &self,
        key: &str,
        file_name: &str,
        data: &[u8],
        scheme: &str,
        host: &str,
    ) -> AppResult<i32> {
        validate_file_name(file_name)?;
        self.store.write(file_name, data).await?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| chirp_common::AppError::Database(e.to_string()))?;

        let caller = resolve_or_register(&txn, key).await?;
        let link = format!("{scheme}://{host}{IMAGE_ROUTE_PREFIX}/{file_name}");
        let media = queries::media::insert(&txn, file_name, &link, caller.id).await?;

        txn.commit()
            .await
            .map_err(|e| chirp_common::AppError::Database(e.to_string()))?;
        Ok(media.id)
    }

    /// Fetch stored file bytes by name.
    pub async fn load(&self, file_name: &str) -> AppResult<Vec<u8>> {
        self.store.read(file_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chirp_common::AppError;
    use chirp_db::entities::{media, user};
    use sea_orm::{DatabaseBackend, MockDatabase};

    struct MemoryStore {
        files: std::sync::Mutex<std::collections::HashMap<String, Vec<u8>>>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                files: std::sync::Mutex::new(std::collections::HashMap::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl StorageBackend for MemoryStore {
        async fn write(&self, name: &str, data: &[u8]) -> AppResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(name.to_string(), data.to_vec());
            Ok(())
        }

        async fn read(&self, name: &str) -> AppResult<Vec<u8>> {
            self.files
                .lock()
                .unwrap()
                .get(name)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("File {name} not found")))
        }

        async fn exists(&self, name: &str) -> AppResult<bool> {
            Ok(self.files.lock().unwrap().contains_key(name))
        }
    }

    fn empty_db() -> Arc<DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    #[tokio::test]
    async fn test_upload_rejects_traversal_names() {
        let service = MediaService::new(empty_db(), Arc::new(MemoryStore::new()));

        let err = service
            .upload("k1", "../etc/passwd", b"data", "http", "localhost")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_upload_writes_file_and_builds_link() {
        let caller = user::Model {
            id: 1,
            key: "k1".to_string(),
            name: "qwertyuiopasdf".to_string(),
        };
        let row = media::Model {
            id: 5,
            file_name: "photo.png".to_string(),
            link: "http://localhost:8000/api/images/photo.png".to_string(),
            uploader_id: 1,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[caller]])
                .append_query_results([[row]])
                .into_connection(),
        );
        let store = Arc::new(MemoryStore::new());
        let service = MediaService::new(db, store.clone());

        let media_id = service
            .upload("k1", "photo.png", b"bytes", "http", "localhost:8000")
            .await
            .unwrap();

        assert_eq!(media_id, 5);
        assert_eq!(store.read("photo.png").await.unwrap(), b"bytes");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        let service = MediaService::new(empty_db(), Arc::new(MemoryStore::new()));

        let err = service.load("nope.png").await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
