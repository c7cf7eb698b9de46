//! File storage for media uploads.
//!
//! A flat, name-keyed store on the local filesystem. Uploads overwrite
//! existing files with the same name (last write wins).

use std::path::PathBuf;

use crate::{AppError, AppResult};

/// Storage backend trait.
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Write a file under the given name, replacing any existing file.
    async fn write(&self, name: &str, data: &[u8]) -> AppResult<()>;

    /// Read a file by name.
    async fn read(&self, name: &str) -> AppResult<Vec<u8>>;

    /// Check if a file exists.
    async fn exists(&self, name: &str) -> AppResult<bool>;
}

/// Validates that a name addresses a single entry in the flat key space.
///
/// Names with path separators or `..` components would escape the store
/// directory and are rejected.
pub fn validate_file_name(name: &str) -> AppResult<()> {
    if name.is_empty() {
        return Err(AppError::BadRequest("File name is empty".to_string()));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(AppError::BadRequest(format!("Invalid file name: {name}")));
    }
    Ok(())
}

/// Local filesystem storage backend.
pub struct LocalStorage {
    base_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new local storage backend rooted at `base_dir`.
    #[must_use]
    pub const fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn path_for(&self, name: &str) -> AppResult<PathBuf> {
        validate_file_name(name)?;
        Ok(self.base_dir.join(name))
    }
}

#[async_trait::async_trait]
impl StorageBackend for LocalStorage {
    async fn write(&self, name: &str, data: &[u8]) -> AppResult<()> {
        let path = self.path_for(name)?;

        tokio::fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create media directory: {e}")))?;

        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {name}: {e}")))
    }

    async fn read(&self, name: &str) -> AppResult<Vec<u8>> {
        let path = self.path_for(name)?;

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("File {name} not found")))
            }
            Err(e) => Err(AppError::Storage(format!("Failed to read {name}: {e}"))),
        }
    }

    async fn exists(&self, name: &str) -> AppResult<bool> {
        let path = self.path_for(name)?;
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store(tag: &str) -> LocalStorage {
        let dir = std::env::temp_dir().join(format!("chirp-storage-{tag}-{}", std::process::id()));
        LocalStorage::new(dir)
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("photo.png").is_ok());
        assert!(validate_file_name("with spaces.jpg").is_ok());
        assert!(validate_file_name("").is_err());
        assert!(validate_file_name("..").is_err());
        assert!(validate_file_name("a/b.png").is_err());
        assert!(validate_file_name("..\\evil").is_err());
    }

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let store = test_store("round-trip");
        store.write("photo.png", b"fake image bytes").await.unwrap();

        let data = store.read("photo.png").await.unwrap();
        assert_eq!(data, b"fake image bytes");
        assert!(store.exists("photo.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = test_store("overwrite");
        store.write("a.png", b"first").await.unwrap();
        store.write("a.png", b"second").await.unwrap();

        assert_eq!(store.read("a.png").await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let store = test_store("missing");
        let err = store.read("nope.png").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
