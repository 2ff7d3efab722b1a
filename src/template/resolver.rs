//! GitHub template URL resolution.
//!
//! Decomposes a `github.com` URL into owner, repo, branch, and sub-path,
//! consulting the API for the default branch when the URL does not name
//! one, then confirms the template actually exists before any download.

use url::Url;

use super::reference::TemplateReference;
use super::GithubApi;
use crate::error::{Result, YurtError};

/// Repository metadata returned by `GET /repos/{owner}/{repo}`.
#[derive(Debug, serde::Deserialize)]
struct RepoInfo {
    default_branch: String,
}

/// Resolves GitHub URLs into [`TemplateReference::Github`] values.
pub struct GithubResolver<'a> {
    api: &'a GithubApi,
}

impl<'a> GithubResolver<'a> {
    /// Create a resolver over the given API client.
    pub fn new(api: &'a GithubApi) -> Self {
        Self { api }
    }

    /// Resolve a `github.com` URL, with an optional caller-supplied
    /// sub-path, into a validated reference.
    ///
    /// Two URL shapes are accepted:
    ///
    /// - `https://github.com/{owner}/{repo}` — the whole repository is the
    ///   template; the default branch is looked up via the API.
    /// - `https://github.com/{owner}/{repo}/tree/{branch}[/{sub/path}]` —
    ///   branch names may themselves contain slashes, so when a sub-path
    ///   was requested the true branch is reconstructed by subtracting the
    ///   sub-path suffix from the joined trailing segments.
    pub fn resolve_url(&self, url: &Url, template_path: Option<&str>) -> Result<TemplateReference> {
        if url.host_str() != Some("github.com") {
            return Err(YurtError::UnsupportedHost {
                url: url.to_string(),
            });
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let sub_path = template_path
            .map(|p| p.trim_start_matches('/').trim_end_matches('/'))
            .unwrap_or("");

        let (owner, repo, branch, sub_path) = match segments.as_slice() {
            [owner, repo] => {
                let branch = self.default_branch(owner, repo)?;
                (owner.to_string(), repo.to_string(), branch, sub_path.to_string())
            }
            [owner, repo, "tree", rest @ ..] if !rest.is_empty() => {
                let joined = rest.join("/");
                let branch = subtract_sub_path(&joined, sub_path);
                (
                    owner.to_string(),
                    repo.to_string(),
                    branch,
                    sub_path.to_string(),
                )
            }
            _ => {
                return Err(YurtError::RepositoryNotFound {
                    repo: url.path().trim_start_matches('/').to_string(),
                    detail: "URL does not name a repository or tree".into(),
                })
            }
        };

        self.assert_template_exists(&owner, &repo, &branch, &sub_path)?;

        Ok(TemplateReference::Github {
            owner,
            repo,
            branch,
            sub_path,
        })
    }

    /// Look up a repository's default branch.
    ///
    /// Fails closed: network errors and non-2xx responses both surface as
    /// `RepositoryNotFound`.
    fn default_branch(&self, owner: &str, repo: &str) -> Result<String> {
        let info: RepoInfo = self
            .api
            .get_json(&format!("/repos/{owner}/{repo}"))
            .map_err(|e| YurtError::RepositoryNotFound {
                repo: format!("{owner}/{repo}"),
                detail: e.to_string(),
            })?;

        Ok(info.default_branch)
    }

    /// Confirm a `package.json` exists at the sub-path on the branch.
    ///
    /// Same fail-closed policy as the default-branch lookup.
    fn assert_template_exists(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sub_path: &str,
    ) -> Result<()> {
        let file_path = if sub_path.is_empty() {
            "package.json".to_string()
        } else {
            format!("{sub_path}/package.json")
        };

        self.api
            .get_json::<serde_json::Value>(&format!(
                "/repos/{owner}/{repo}/contents/{file_path}?ref={branch}"
            ))
            .map_err(|_| YurtError::RepositoryNotFound {
                repo: format!("{owner}/{repo}"),
                detail: format!("no package.json at '{sub_path}' on branch '{branch}'"),
            })?;

        Ok(())
    }
}

/// Reconstruct the branch from joined tree segments by removing a known
/// sub-path suffix. `joined` of `"feat/next/templates/basic"` with a
/// sub-path of `"templates/basic"` yields `"feat/next"`.
fn subtract_sub_path(joined: &str, sub_path: &str) -> String {
    if sub_path.is_empty() || joined == sub_path {
        return joined.to_string();
    }

    match joined.strip_suffix(sub_path) {
        Some(prefix) if prefix.ends_with('/') => prefix.trim_end_matches('/').to_string(),
        _ => joined.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStore, CachedClient};
    use httpmock::prelude::*;
    use std::time::Duration;
    use tempfile::TempDir;

    fn api_for(server: &MockServer, temp: &TempDir) -> GithubApi {
        let client = CachedClient::with_store(
            Some(CacheStore::new(temp.path())),
            Some(Duration::from_secs(3600)),
        );
        GithubApi::with_client(client, server.base_url())
    }

    fn parse(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn bare_repo_url_uses_default_branch_and_empty_sub_path() {
        let server = MockServer::start();
        let branch_lookup = server.mock(|when, then| {
            when.method(GET).path("/repos/acme/examples");
            then.status(200).body(r#"{"default_branch": "trunk"}"#);
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/examples/contents/package.json")
                .query_param("ref", "trunk");
            then.status(200).body(r#"{"name": "package.json"}"#);
        });

        let temp = TempDir::new().unwrap();
        let api = api_for(&server, &temp);
        let resolver = GithubResolver::new(&api);

        let reference = resolver
            .resolve_url(&parse("https://github.com/acme/examples"), None)
            .unwrap();

        branch_lookup.assert();
        assert_eq!(
            reference,
            TemplateReference::Github {
                owner: "acme".into(),
                repo: "examples".into(),
                branch: "trunk".into(),
                sub_path: String::new(),
            }
        );
    }

    #[test]
    fn tree_url_with_simple_branch() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/widgets/contents/package.json")
                .query_param("ref", "main");
            then.status(200).body("{}");
        });

        let temp = TempDir::new().unwrap();
        let api = api_for(&server, &temp);
        let resolver = GithubResolver::new(&api);

        let reference = resolver
            .resolve_url(&parse("https://github.com/acme/widgets/tree/main"), None)
            .unwrap();

        assert_eq!(
            reference,
            TemplateReference::Github {
                owner: "acme".into(),
                repo: "widgets".into(),
                branch: "main".into(),
                sub_path: String::new(),
            }
        );
    }

    #[test]
    fn tree_url_reconstructs_slash_bearing_branch() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/widgets/contents/templates/basic/package.json")
                .query_param("ref", "feat/next");
            then.status(200).body("{}");
        });

        let temp = TempDir::new().unwrap();
        let api = api_for(&server, &temp);
        let resolver = GithubResolver::new(&api);

        let reference = resolver
            .resolve_url(
                &parse("https://github.com/acme/widgets/tree/feat/next/templates/basic"),
                Some("templates/basic"),
            )
            .unwrap();

        assert_eq!(
            reference,
            TemplateReference::Github {
                owner: "acme".into(),
                repo: "widgets".into(),
                branch: "feat/next".into(),
                sub_path: "templates/basic".into(),
            }
        );
    }

    #[test]
    fn foreign_host_is_unsupported() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let api = api_for(&server, &temp);
        let resolver = GithubResolver::new(&api);

        let err = resolver
            .resolve_url(&parse("https://gitlab.com/acme/widgets"), None)
            .unwrap_err();

        assert!(matches!(err, YurtError::UnsupportedHost { .. }));
    }

    #[test]
    fn network_error_on_branch_lookup_fails_closed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/repos/acme/gone");
            then.status(500);
        });

        let temp = TempDir::new().unwrap();
        let api = api_for(&server, &temp);
        let resolver = GithubResolver::new(&api);

        let err = resolver
            .resolve_url(&parse("https://github.com/acme/gone"), None)
            .unwrap_err();

        assert!(matches!(err, YurtError::RepositoryNotFound { .. }));
    }

    #[test]
    fn missing_package_json_is_repository_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/repos/acme/widgets/contents/package.json");
            then.status(404);
        });

        let temp = TempDir::new().unwrap();
        let api = api_for(&server, &temp);
        let resolver = GithubResolver::new(&api);

        let err = resolver
            .resolve_url(&parse("https://github.com/acme/widgets/tree/main"), None)
            .unwrap_err();

        match err {
            YurtError::RepositoryNotFound { repo, detail } => {
                assert_eq!(repo, "acme/widgets");
                assert!(detail.contains("package.json"));
            }
            other => panic!("Expected RepositoryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn url_without_repo_is_rejected() {
        let server = MockServer::start();
        let temp = TempDir::new().unwrap();
        let api = api_for(&server, &temp);
        let resolver = GithubResolver::new(&api);

        let err = resolver
            .resolve_url(&parse("https://github.com/acme"), None)
            .unwrap_err();

        assert!(matches!(err, YurtError::RepositoryNotFound { .. }));
    }

    #[test]
    fn subtract_sub_path_handles_plain_branch() {
        assert_eq!(subtract_sub_path("main", ""), "main");
    }

    #[test]
    fn subtract_sub_path_removes_suffix() {
        assert_eq!(
            subtract_sub_path("release/v2/apps/demo", "apps/demo"),
            "release/v2"
        );
    }

    #[test]
    fn subtract_sub_path_requires_segment_boundary() {
        // "xapps/demo" must not be treated as containing the sub-path.
        assert_eq!(
            subtract_sub_path("release-xapps/demo", "apps/demo"),
            "release-xapps/demo"
        );
    }

    #[test]
    fn subtract_sub_path_keeps_branch_equal_to_sub_path() {
        assert_eq!(subtract_sub_path("apps/demo", "apps/demo"), "apps/demo");
    }
}
