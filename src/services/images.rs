//! Uploaded-image store
//!
//! Disk-backed blob storage for listing images. Each accepted file is
//! written under a unique name (UUID plus the original extension) inside
//! the upload directory, which the server exposes read-only under
//! [`UPLOAD_PUBLIC_PREFIX`]. Rejection policy: image MIME types only, a
//! fixed per-file size cap, and a fixed per-request file count cap.

use crate::config::{UploadConfig, UPLOAD_PUBLIC_PREFIX};
use crate::error::AppError;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

/// A stored image file
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Name of the file inside the upload directory
    pub file_name: String,
    /// Public path the file is served from (`/uploads/<file_name>`)
    pub public_path: String,
}

/// Disk-backed store for uploaded images
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    max_file_bytes: usize,
    max_files: usize,
}

impl ImageStore {
    /// Create a store over the configured upload directory
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            max_file_bytes: config.max_file_bytes,
            max_files: config.max_files,
        }
    }

    /// Maximum number of files accepted per request
    pub fn max_files(&self) -> usize {
        self.max_files
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!(
                "Failed to create upload directory {}: {}",
                self.dir.display(),
                e
            )))
    }

    /// Validate and persist one uploaded file.
    ///
    /// Rejects non-image content types and files over the size cap with
    /// `UploadRejected`. On success the file is written under a fresh
    /// UUID-based name and its public path is returned.
    pub async fn store(
        &self,
        original_name: Option<&str>,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<StoredImage, AppError> {
        if !content_type.is_some_and(|ct| ct.starts_with("image/")) {
            return Err(AppError::UploadRejected(
                "Only image uploads are accepted".to_string(),
            ));
        }
        if data.len() > self.max_file_bytes {
            return Err(AppError::UploadRejected(format!(
                "Image exceeds the {} byte limit",
                self.max_file_bytes
            )));
        }

        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext.to_lowercase()))
            .unwrap_or_default();
        let file_name = format!("{}{}", Uuid::new_v4(), extension);

        let path = self.dir.join(&file_name);
        fs::write(&path, data).await.map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "Failed to write uploaded image {}: {}",
                path.display(),
                e
            ))
        })?;

        info!("Saved uploaded image: {} ({} bytes)", file_name, data.len());
        Ok(StoredImage {
            public_path: format!("{}/{}", UPLOAD_PUBLIC_PREFIX, file_name),
            file_name,
        })
    }

    /// Remove files stored earlier in a request whose listing was never
    /// created. Failures are logged and ignored.
    pub async fn discard(&self, images: &[StoredImage]) {
        for image in images {
            let path = self.dir.join(&image.file_name);
            if let Err(e) = fs::remove_file(&path).await {
                warn!("Failed to remove stored image {}: {}", image.file_name, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &Path) -> ImageStore {
        ImageStore::new(&UploadConfig {
            dir: dir.to_path_buf(),
            max_file_bytes: 1024,
            max_files: 10,
        })
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_public_path() {
        let temp = tempdir().expect("Failed to create temp dir");
        let images = store_in(temp.path());

        let stored = images
            .store(Some("Sofa Photo.JPG"), Some("image/jpeg"), b"fake image")
            .await
            .expect("store should accept a small image");

        assert!(stored.file_name.ends_with(".jpg"));
        assert_eq!(
            stored.public_path,
            format!("/uploads/{}", stored.file_name)
        );
        let on_disk = std::fs::read(temp.path().join(&stored.file_name)).unwrap();
        assert_eq!(on_disk, b"fake image");
    }

    #[tokio::test]
    async fn test_store_generates_unique_names() {
        let temp = tempdir().expect("Failed to create temp dir");
        let images = store_in(temp.path());

        let first = images
            .store(Some("a.png"), Some("image/png"), b"one")
            .await
            .unwrap();
        let second = images
            .store(Some("a.png"), Some("image/png"), b"two")
            .await
            .unwrap();
        assert_ne!(first.file_name, second.file_name);
    }

    #[tokio::test]
    async fn test_store_rejects_non_image() {
        let temp = tempdir().expect("Failed to create temp dir");
        let images = store_in(temp.path());

        let result = images
            .store(Some("notes.txt"), Some("text/plain"), b"hello")
            .await;
        assert!(matches!(result, Err(AppError::UploadRejected(_))));

        let result = images.store(Some("mystery"), None, b"hello").await;
        assert!(matches!(result, Err(AppError::UploadRejected(_))));
    }

    #[tokio::test]
    async fn test_store_rejects_oversized_file() {
        let temp = tempdir().expect("Failed to create temp dir");
        let images = store_in(temp.path());

        let big = vec![0u8; 2048];
        let result = images.store(Some("big.png"), Some("image/png"), &big).await;
        assert!(matches!(result, Err(AppError::UploadRejected(_))));
    }

    #[tokio::test]
    async fn test_discard_removes_files() {
        let temp = tempdir().expect("Failed to create temp dir");
        let images = store_in(temp.path());

        let stored = images
            .store(Some("a.png"), Some("image/png"), b"one")
            .await
            .unwrap();
        let path = temp.path().join(&stored.file_name);
        assert!(path.exists());

        images.discard(&[stored]).await;
        assert!(!path.exists());
    }
}
