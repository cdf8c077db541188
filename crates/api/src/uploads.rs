//! Profile image storage.
//!
//! The auth core only needs a URL back from whatever holds the bytes, so
//! the store is a trait; the production implementation writes to a local
//! directory served under `/uploads`.

use std::path::PathBuf;

use async_trait::async_trait;

/// MIME types accepted for profile images.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Failure writing to the image store. Always surfaced to clients as a 500.
#[derive(Debug, thiserror::Error)]
#[error("image store failure: {0}")]
pub struct ImageStoreError(pub String);

/// One-way object store for profile images: bytes in, URL out.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn put(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, ImageStoreError>;
}

/// Filesystem-backed store. Objects land in `dir` and are served at
/// `/uploads/<object>` by the static-file route.
pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn put(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<String, ImageStoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ImageStoreError(e.to_string()))?;

        // Object name: timestamp prefix for uniqueness, sanitized stem of
        // the client filename for readability, extension from the verified
        // content type (never from the client name).
        let stem: String = filename
            .chars()
            .take_while(|c| *c != '.')
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .take(40)
            .collect();
        let stem = if stem.is_empty() { "image".to_string() } else { stem };
        let ext = if content_type == "image/png" { "png" } else { "jpg" };
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let object = format!("{nanos}-{stem}.{ext}");

        tokio::fs::write(self.dir.join(&object), bytes)
            .await
            .map_err(|e| ImageStoreError(e.to_string()))?;

        Ok(format!("/uploads/{object}"))
    }
}
