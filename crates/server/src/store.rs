//! Generated file storage

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;

/// Where filled documents go between generation and download.
///
/// Carried in `AppState` as `Arc<dyn OutputStore>`.
#[async_trait]
pub trait OutputStore: Send + Sync {
    /// Persist `bytes` and return the file name they can be fetched under
    async fn store(&self, bytes: Vec<u8>) -> Result<String, AppError>;

    /// Fetch a stored file by name
    async fn retrieve(&self, name: &str) -> Result<Vec<u8>, AppError>;
}

/// Flat directory of `<uuid>.pdf` files, never cleaned up
#[derive(Debug, Clone)]
pub struct TempDirStore {
    dir: PathBuf,
}

impl TempDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl OutputStore for TempDirStore {
    async fn store(&self, bytes: Vec<u8>) -> Result<String, AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let name = format!("{}.pdf", Uuid::new_v4());
        tokio::fs::write(self.dir.join(&name), &bytes).await?;

        debug!(file = %name, bytes = bytes.len(), "stored document");
        Ok(name)
    }

    async fn retrieve(&self, name: &str) -> Result<Vec<u8>, AppError> {
        if !is_plain_file_name(name) {
            return Err(AppError::NotFound(name.to_string()));
        }

        tokio::fs::read(self.dir.join(name)).await.map_err(|e| {
            debug!(file = %name, error = %e, "document not readable");
            AppError::NotFound(name.to_string())
        })
    }
}

/// A name that stays inside the store directory
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && !name.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
        && name != "."
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_store_and_retrieve() {
        let dir = tempfile::tempdir().unwrap();
        let store = TempDirStore::new(dir.path());

        let name = store.store(b"%PDF-1.5 test".to_vec()).await.unwrap();
        assert!(name.ends_with(".pdf"));
        assert!(Uuid::parse_str(name.trim_end_matches(".pdf")).is_ok());

        let bytes = store.retrieve(&name).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.5 test".to_vec());
    }

    #[tokio::test]
    async fn test_names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = TempDirStore::new(dir.path());

        let first = store.store(vec![1]).await.unwrap();
        let second = store.store(vec![1]).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = TempDirStore::new(dir.path().join("nested/out"));

        let name = store.store(vec![0]).await.unwrap();
        assert!(store.dir().join(name).exists());
    }

    #[tokio::test]
    async fn test_retrieve_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = TempDirStore::new(dir.path());

        let result = store.retrieve("missing.pdf").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_retrieve_rejects_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"x").unwrap();
        let store = TempDirStore::new(dir.path().join("out"));

        for name in ["", ".", "..", "../secret.txt", "a/b.pdf", "a\\b.pdf"] {
            let result = store.retrieve(name).await;
            assert!(matches!(result, Err(AppError::NotFound(_))), "{name:?}");
        }
    }
}
