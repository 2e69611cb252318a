//! Device collaborators: where photos come from and where exports go.
//!
//! The presentation layer supplies real implementations (camera, share sheet).
//! [`DirectoryFileSink`] covers the desktop and test case.

use crate::errors::Result;
use crate::media::bytes_to_data_url;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Captures a photo, returning the encoded image bytes
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Takes or picks a photo
    async fn capture_photo(&self) -> Result<Vec<u8>>;
}

/// Persists a generated file
#[async_trait]
pub trait FileSink: Send + Sync {
    /// Writes `bytes` under `file_name`, returning where it ended up.
    async fn write_file(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Writes files into one directory, creating it on first use
#[derive(Debug, Clone)]
pub struct DirectoryFileSink {
    dir: PathBuf,
}

impl DirectoryFileSink {
    /// Sink rooted at `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl FileSink for DirectoryFileSink {
    async fn write_file(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(file_name);
        tokio::fs::write(&path, bytes).await?;
        info!(path = %path.display(), bytes = bytes.len(), "File written");
        Ok(path)
    }
}

/// Captures a photo and returns it as a data URL ready to store on an item.
pub async fn capture_item_photo(source: &dyn PhotoSource) -> Result<String> {
    let bytes = source.capture_photo().await?;
    bytes_to_data_url(&bytes)
}
