//! Flat file-per-key image storage

use std::io;
use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info, warn};

/// Extension appended to every cache entry file
const IMAGE_EXT: &str = "jpg";

/// A disk-backed image cache with one file per status code
///
/// Keys are used directly as file stems, so callers must only pass
/// path-safe keys (the proxy validates them as digit strings before any
/// cache call). Concurrent writers to the same key interleave freely;
/// last writer wins.
pub struct ImageCache {
    /// Directory where cached images are stored
    cache_dir: PathBuf,
}

impl ImageCache {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Ensure the cache directory exists, creating parents as needed
    pub async fn init(&self) -> io::Result<()> {
        fs::create_dir_all(&self.cache_dir).await?;
        info!(cache_dir = ?self.cache_dir, "Cache initialized");
        Ok(())
    }

    /// Path of the entry for a key, whether or not it exists
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.{}", key, IMAGE_EXT))
    }

    /// Read the entry for a key
    ///
    /// A missing file is a miss, not an error. Unexpected read failures
    /// are logged and also reported as a miss.
    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        let path = self.entry_path(key);
        match fs::read(&path).await {
            Ok(data) => {
                debug!(key = %key, size = data.len(), "Cache hit");
                Some(data)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(key = %key, "Cache miss");
                None
            }
            Err(e) => {
                warn!(key = %key, path = ?path, error = %e, "Failed to read cached file");
                None
            }
        }
    }

    /// Write the entry for a key, replacing any previous content
    pub async fn put(&self, key: &str, data: &[u8]) -> io::Result<()> {
        let path = self.entry_path(key);
        fs::write(&path, data).await?;
        debug!(key = %key, size = data.len(), "Cached image");
        Ok(())
    }

    /// Remove the entry for a key, reporting whether one existed
    pub async fn delete(&self, key: &str) -> io::Result<bool> {
        let path = self.entry_path(key);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key = %key, "Removed cache entry");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
