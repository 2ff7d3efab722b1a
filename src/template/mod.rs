//! Template reference resolution.
//!
//! This module turns a raw user-supplied template argument into a typed
//! [`TemplateReference`]: a GitHub repo + branch + sub-path, an npm package
//! specifier, a local tarball, or a named example from the examples
//! repository. Resolution validates existence against the GitHub API before
//! any download starts; all failures here are fatal to the invocation.

pub mod examples;
pub mod reference;
pub mod resolver;

pub use examples::ExamplesDirectory;
pub use reference::{classify, TemplateArg, TemplateReference};
pub use resolver::GithubResolver;

use std::time::Duration;

use crate::cache::{CachedClient, GITHUB_API_NAMESPACE};
use crate::error::Result;

/// Default GitHub REST API base.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// TTL for cached API responses. Repo metadata and directory listings
/// change, so entries go stale after an hour.
pub const API_CACHE_TTL: Duration = Duration::from_secs(3600);

/// GitHub REST API access with response caching.
///
/// Constructed once per process and threaded through the resolver and the
/// examples listing; never held in module-level state.
pub struct GithubApi {
    client: CachedClient,
    base: String,
}

impl GithubApi {
    /// Create an API client caching into the `github-api` namespace.
    pub fn new() -> Self {
        let client = CachedClient::new(GITHUB_API_NAMESPACE, Some(API_CACHE_TTL))
            .with_accept("application/vnd.github+json");
        Self::with_client(client, GITHUB_API_BASE)
    }

    /// Create an API client over an explicit transport and base URL.
    pub fn with_client(client: CachedClient, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    /// GET an API path (starting with `/`) and deserialize the JSON body.
    pub fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.client.get_json(&format!("{}{}", self.base, path))
    }
}

impl Default for GithubApi {
    fn default() -> Self {
        Self::new()
    }
}
