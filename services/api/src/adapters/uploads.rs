//! services/api/src/adapters/uploads.rs
//!
//! Disk-backed implementation of the `FileStore` port. Uploaded files land
//! in a single directory under a generated name and are served back as
//! static assets under a fixed URL prefix.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use all_islam_core::domain::StoredFile;
use all_islam_core::ports::{FileStore, PortError, PortResult};

/// URL prefix the upload directory is mounted under.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// A file store that writes uploads to a local directory.
#[derive(Clone)]
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Builds a collision-resistant stored name: a fresh UUID plus the original
/// extension, so the served file keeps a sensible content type.
fn stored_name(original_name: &str) -> String {
    let id = Uuid::new_v4();
    match Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(ext) if !ext.is_empty() => format!("{}.{}", id, ext.to_ascii_lowercase()),
        _ => id.to_string(),
    }
}

#[async_trait]
impl FileStore for DiskFileStore {
    async fn save(&self, original_name: &str, bytes: &[u8]) -> PortResult<StoredFile> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| PortError::Unexpected(format!("Failed to create upload dir: {}", e)))?;

        let name = stored_name(original_name);
        let path = self.root.join(&name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| PortError::Unexpected(format!("Failed to write upload: {}", e)))?;

        tracing::debug!(path = %path.display(), "Stored upload");
        Ok(StoredFile {
            url: format!("{}/{}", UPLOADS_URL_PREFIX, name),
            file_name: original_name.to_string(),
        })
    }
}
