//! On-disk HTTP response caching.
//!
//! This module provides disk-based caching for GitHub API responses and
//! template tarballs, with TTL-based invalidation. Consumers pick a
//! namespace so different kinds of responses never collide on keys:
//! API listings use a short TTL, template tarballs never expire (they are
//! versioned by branch/tag, so only explicit invalidation removes them).
//!
//! The cache directory is shared across processes with no file locking.
//! Concurrent invocations racing on the same key interleave and the last
//! writer wins; every value is an idempotent derivation of its request, so
//! nothing requires read-modify-write atomicity.

pub mod entry;
pub mod http;
pub mod single_flight;
pub mod store;

pub use entry::{CacheEntry, CacheMetadata};
pub use http::CachedClient;
pub use single_flight::SingleFlight;
pub use store::CacheStore;

/// Namespace for GitHub API responses (repo metadata, example listings).
pub const GITHUB_API_NAMESPACE: &str = "github-api";

/// Namespace for downloaded template tarballs.
pub const TEMPLATE_NAMESPACE: &str = "template-cache";

/// Environment variable that disables HTTP caching entirely.
///
/// Sampled once at [`CachedClient`] construction, never per-request, so a
/// single invocation behaves consistently for its whole lifetime.
pub const NO_CACHE_ENV: &str = "YURT_NO_CACHE";

/// Get the root cache directory (namespaces live underneath it).
pub fn default_cache_root() -> std::path::PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("yurt")
}
