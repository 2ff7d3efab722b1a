//! Cache entry and metadata types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// A cached HTTP response entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Request key this entry was stored under (method + URL + headers).
    pub request_key: String,
    /// Path to the cached response body.
    pub content_path: PathBuf,
    /// Cache metadata for validation.
    pub metadata: CacheMetadata,
}

/// Metadata for cache validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// When this entry was stored.
    pub stored_at: DateTime<Utc>,
    /// Time-to-live in seconds. `None` means the entry never expires and is
    /// only removed by explicit invalidation.
    pub ttl_seconds: Option<u64>,
    /// Size of the cached body in bytes.
    pub size_bytes: u64,
}

impl CacheEntry {
    /// Create a new cache entry stored now.
    pub fn new(
        request_key: impl Into<String>,
        content_path: impl Into<PathBuf>,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            request_key: request_key.into(),
            content_path: content_path.into(),
            metadata: CacheMetadata {
                stored_at: Utc::now(),
                ttl_seconds: ttl.map(|d| d.as_secs()),
                size_bytes: 0,
            },
        }
    }

    /// Check whether the entry has outlived its TTL.
    ///
    /// An entry is valid iff `now - stored_at < ttl`. Entries without a TTL
    /// are always valid.
    pub fn is_expired(&self) -> bool {
        match self.metadata.ttl_seconds {
            Some(ttl) => {
                let age = Utc::now().signed_duration_since(self.metadata.stored_at);
                age >= chrono::Duration::seconds(ttl as i64)
            }
            None => false,
        }
    }

    /// Get the age of this entry.
    pub fn age(&self) -> chrono::Duration {
        Utc::now().signed_duration_since(self.metadata.stored_at)
    }

    /// Set size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.metadata.size_bytes = size;
        self
    }
}

impl CacheMetadata {
    /// Remaining TTL in seconds; `None` for entries that never expire.
    pub fn remaining_ttl(&self) -> Option<i64> {
        self.ttl_seconds.map(|ttl| {
            let expires_at = self.stored_at + chrono::Duration::seconds(ttl as i64);
            expires_at
                .signed_duration_since(Utc::now())
                .num_seconds()
                .max(0)
        })
    }
}
