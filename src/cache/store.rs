//! Cache storage implementation.

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::entry::CacheEntry;

/// Disk storage for cached HTTP responses, rooted at one namespace
/// directory.
pub struct CacheStore {
    /// Root directory for this namespace.
    root: PathBuf,
}

impl CacheStore {
    /// Create a cache store rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a cache store for a namespace under the default cache root.
    pub fn namespaced(namespace: &str) -> Self {
        Self::new(super::default_cache_root().join(namespace))
    }

    /// Get the cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensure the cache directory exists.
    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Failed to create cache directory {:?}", self.root))
    }

    /// Get the path for storing a request's body.
    ///
    /// Derived deterministically from the request key, so two semantically
    /// identical requests always land on the same file.
    pub fn content_path(&self, request_key: &str) -> PathBuf {
        let hash = Sha256::digest(request_key.as_bytes());
        let hash_str = hex::encode(&hash[..16]);
        self.root.join(hash_str)
    }

    /// Get the metadata file path for a request.
    fn metadata_path(&self, request_key: &str) -> PathBuf {
        self.content_path(request_key).with_extension("meta.json")
    }

    /// Store a response body and return the recorded cache entry.
    pub fn store(
        &self,
        request_key: &str,
        content: &[u8],
        ttl: Option<Duration>,
    ) -> Result<CacheEntry> {
        self.ensure_dir()?;

        let content_path = self.content_path(request_key);
        fs::write(&content_path, content)?;

        let entry =
            CacheEntry::new(request_key, &content_path, ttl).with_size(content.len() as u64);

        self.save_metadata(&entry)?;

        Ok(entry)
    }

    /// Load a cached entry's metadata.
    pub fn load(&self, request_key: &str) -> Result<Option<CacheEntry>> {
        let meta_path = self.metadata_path(request_key);

        if !meta_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&meta_path)?;
        let entry: CacheEntry = serde_json::from_str(&json)?;

        Ok(Some(entry))
    }

    /// Read the cached body.
    pub fn read_content(&self, entry: &CacheEntry) -> Result<Vec<u8>> {
        fs::read(&entry.content_path).with_context(|| {
            format!(
                "Failed to read cached content from {:?}",
                entry.content_path
            )
        })
    }

    /// Save entry metadata.
    fn save_metadata(&self, entry: &CacheEntry) -> Result<()> {
        let meta_path = self.metadata_path(&entry.request_key);
        let json = serde_json::to_string_pretty(entry)?;
        fs::write(&meta_path, json)?;
        Ok(())
    }

    /// Remove a cached entry.
    pub fn remove(&self, request_key: &str) -> Result<bool> {
        let content_path = self.content_path(request_key);
        let meta_path = self.metadata_path(request_key);

        let mut removed = false;

        if content_path.exists() {
            fs::remove_file(&content_path)?;
            removed = true;
        }

        if meta_path.exists() {
            fs::remove_file(&meta_path)?;
            removed = true;
        }

        Ok(removed)
    }

    /// List all cached entries, newest first.
    pub fn list(&self) -> Result<Vec<CacheEntry>> {
        self.ensure_dir()?;

        let mut entries = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().is_some_and(|e| e == "json") {
                if let Ok(json) = fs::read_to_string(&path) {
                    if let Ok(cache_entry) = serde_json::from_str::<CacheEntry>(&json) {
                        entries.push(cache_entry);
                    }
                }
            }
        }

        entries.sort_by(|a, b| b.metadata.stored_at.cmp(&a.metadata.stored_at));
        Ok(entries)
    }

    /// Clear all cached entries.
    pub fn clear(&self) -> Result<usize> {
        let entries = self.list()?;
        let count = entries.len();

        for entry in entries {
            let _ = self.remove(&entry.request_key);
        }

        Ok(count)
    }

    /// Remove only expired entries.
    pub fn clear_expired(&self) -> Result<usize> {
        let mut removed = 0;

        for entry in self.list()? {
            if entry.is_expired() && self.remove(&entry.request_key)? {
                removed += 1;
            }
        }

        Ok(removed)
    }

    /// Get total cache size in bytes.
    pub fn total_size(&self) -> Result<u64> {
        let entries = self.list()?;
        Ok(entries.iter().map(|e| e.metadata.size_bytes).sum())
    }
}
