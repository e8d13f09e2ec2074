//! Blob storage behind a small trait so the API handlers do not care
//! where document bytes live. The default implementation writes to a
//! local directory; an S3-style backend can slot in behind the same
//! trait.

use std::io;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

/// Abstract blob store keyed by relative storage paths such as
/// `documents/{user_id}/{ts}_{filename}`.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write a blob, creating parent directories/prefixes as needed.
    async fn put(&self, path: &str, bytes: &[u8]) -> io::Result<()>;

    /// Read a blob in full.
    async fn get(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Delete a blob. Deleting an absent blob is an error.
    async fn delete(&self, path: &str) -> io::Result<()>;

    /// Public URL under which the blob can be fetched.
    fn url_for(&self, path: &str) -> String;
}

/// Blob store writing under a base directory on the local filesystem.
pub struct LocalBlobStore {
    base_dir: PathBuf,
}

impl LocalBlobStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a storage path below the base directory, rejecting
    /// absolute paths and `..` components.
    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe || relative.as_os_str().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid storage path: {path}"),
            ));
        }
        Ok(self.base_dir.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> io::Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, bytes).await
    }

    async fn get(&self, path: &str) -> io::Result<Vec<u8>> {
        let full = self.resolve(path)?;
        tokio::fs::read(&full).await
    }

    async fn delete(&self, path: &str) -> io::Result<()> {
        let full = self.resolve(path)?;
        tokio::fs::remove_file(&full).await
    }

    fn url_for(&self, path: &str) -> String {
        format!("/blobs/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        store
            .put("documents/u1/1_plan.pdf", b"inhalt")
            .await
            .unwrap();
        assert_eq!(store.get("documents/u1/1_plan.pdf").await.unwrap(), b"inhalt");

        store.delete("documents/u1/1_plan.pdf").await.unwrap();
        assert!(store.get("documents/u1/1_plan.pdf").await.is_err());
    }

    #[tokio::test]
    async fn deleting_absent_blob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        assert!(store.delete("documents/u1/fehlt.pdf").await.is_err());
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        assert!(store.put("../escape.txt", b"x").await.is_err());
        assert!(store.get("/etc/passwd").await.is_err());
    }

    #[test]
    fn url_is_prefixed_storage_path() {
        let store = LocalBlobStore::new("/tmp/blobs");
        assert_eq!(
            store.url_for("documents/u1/1_plan.pdf"),
            "/blobs/documents/u1/1_plan.pdf"
        );
    }
}
