//! HTTP client with transparent disk caching.
//!
//! Wraps a `reqwest` blocking client so that GET responses are cached under
//! a namespace directory. A hit within its TTL is served from disk without
//! touching the network; a miss or expired entry performs the real request
//! and persists the body before returning it.
//!
//! The client is constructed once per process in the command layer and
//! threaded through call sites; there is no ambient singleton.

use std::time::Duration;

use reqwest::blocking::Client;

use super::single_flight::SingleFlight;
use super::store::CacheStore;
use crate::error::{Result, YurtError};

/// Connect timeout for all outgoing requests. There is deliberately no
/// overall deadline: a tarball download runs as long as the stream does.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A fetch wrapper with an on-disk response cache.
pub struct CachedClient {
    client: Client,
    /// `None` when caching is disabled for this process.
    store: Option<CacheStore>,
    /// TTL applied to stored entries. `None` = entries never expire.
    ttl: Option<Duration>,
    /// Accept header sent with every request (part of the cache key).
    accept: Option<String>,
    flight: SingleFlight,
}

impl CachedClient {
    /// Create a client caching into `namespace` with the given TTL.
    ///
    /// The `YURT_NO_CACHE` escape hatch is sampled here, once, so the
    /// wrapper behaves uniformly for the lifetime of the invocation.
    pub fn new(namespace: &str, ttl: Option<Duration>) -> Self {
        let disabled = std::env::var_os(super::NO_CACHE_ENV).is_some();
        let store = if disabled {
            tracing::debug!(namespace, "HTTP caching disabled via {}", super::NO_CACHE_ENV);
            None
        } else {
            let store = CacheStore::namespaced(namespace);
            tracing::debug!(namespace, dir = %store.root().display(), "HTTP cache directory selected");
            Some(store)
        };

        Self::with_store(store, ttl)
    }

    /// Create a client over an explicit store (`None` = passthrough).
    pub fn with_store(store: Option<CacheStore>, ttl: Option<Duration>) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("yurt/", env!("CARGO_PKG_VERSION")))
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            store,
            ttl,
            accept: None,
            flight: SingleFlight::new(),
        }
    }

    /// Set the Accept header sent with every request.
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Derive the deterministic cache key for a request.
    ///
    /// Two semantically identical requests must map to the same key, so the
    /// key covers everything that varies per request: method, URL, and the
    /// Accept header when one is configured.
    pub fn request_key(&self, url: &str) -> String {
        match &self.accept {
            Some(accept) => format!("GET {url} accept:{accept}"),
            None => format!("GET {url}"),
        }
    }

    /// GET a URL, serving from the cache when possible.
    pub fn get(&self, url: &str) -> Result<Vec<u8>> {
        let Some(store) = &self.store else {
            return self.fetch(url);
        };

        let key = self.request_key(url);
        self.flight.run(&key, || {
            if let Ok(Some(entry)) = store.load(&key) {
                if !entry.is_expired() {
                    if let Ok(body) = store.read_content(&entry) {
                        tracing::debug!(url, "cache hit");
                        return Ok(body);
                    }
                }
                tracing::debug!(url, "cache entry expired");
            }

            tracing::debug!(url, "cache miss, fetching");
            let body = self.fetch(url)?;

            if let Err(e) = store.store(&key, &body, self.ttl) {
                tracing::warn!(url, "failed to persist cache entry: {e:#}");
            }

            Ok(body)
        })
    }

    /// GET a URL and deserialize the response as JSON.
    pub fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get(url)?;
        serde_json::from_slice(&body)
            .map_err(|e| anyhow::anyhow!("Invalid JSON from {url}: {e}").into())
    }

    /// Perform the real network request.
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut request = self.client.get(url);
        if let Some(accept) = &self.accept {
            request = request.header("Accept", accept);
        }

        let response = request
            .send()
            .map_err(|e| anyhow::anyhow!("Request to {url} failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(YurtError::UnexpectedResponse {
                status: status.to_string(),
                url: url.to_string(),
            });
        }

        let body = response
            .bytes()
            .map_err(|e| anyhow::anyhow!("Failed to read body from {url}: {e}"))?;

        Ok(body.to_vec())
    }
}
