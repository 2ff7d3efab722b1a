//! Template reference types and raw-argument classification.

use std::path::PathBuf;

use url::Url;

/// A resolved, typed description of where to obtain a project template.
///
/// Constructed once per invocation by the resolver and consumed immediately
/// by tarball acquisition; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateReference {
    /// A GitHub repository, pinned to a branch and optional sub-path.
    Github {
        owner: String,
        repo: String,
        branch: String,
        /// Sub-directory within the repo holding the template; empty for
        /// the repository root.
        sub_path: String,
    },
    /// An npm package specifier (`name`, `name@version`, `@scope/name`).
    NpmPackage { specifier: String },
    /// A local `.tgz`/`.tar.gz` archive.
    LocalFile { path: PathBuf },
    /// A directory in the examples repository.
    NamedExample { name: String },
}

/// Classification of a raw template argument, before any network probe.
///
/// This is the single non-throwing entry point for deciding what shape a
/// raw string has; callers match on the outcome instead of discriminating
/// values by catching parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateArg {
    /// An absolute URL on the supported GitHub host.
    GithubUrl(Url),
    /// An absolute URL on some other host. Always a hard failure at the
    /// call site, never silently coerced.
    UnsupportedUrl(String),
    /// An existing local tarball path.
    LocalArchive(PathBuf),
    /// Anything else: an npm specifier or an example name, depending on
    /// which flag the caller received it through.
    PackageLike(String),
}

/// Classify a raw template argument.
pub fn classify(raw: &str) -> TemplateArg {
    if let Ok(url) = Url::parse(raw) {
        if matches!(url.scheme(), "http" | "https") {
            if url.host_str() == Some("github.com") {
                return TemplateArg::GithubUrl(url);
            }
            return TemplateArg::UnsupportedUrl(raw.to_string());
        }
        // Non-http(s) absolute URLs (ssh:, git:, file:) are unsupported
        // hosts too, but bare specifiers like `pkg@1.0.0` fail Url::parse
        // outright and fall through to PackageLike below.
        if url.host_str().is_some() {
            return TemplateArg::UnsupportedUrl(raw.to_string());
        }
    }

    if raw.ends_with(".tgz") || raw.ends_with(".tar.gz") {
        let path = PathBuf::from(raw);
        if path.exists() {
            return TemplateArg::LocalArchive(path);
        }
    }

    TemplateArg::PackageLike(raw.to_string())
}

impl TemplateReference {
    /// Repository identifier (`owner/repo`) for GitHub references.
    pub fn repo_id(&self) -> Option<String> {
        match self {
            Self::Github { owner, repo, .. } => Some(format!("{owner}/{repo}")),
            _ => None,
        }
    }
}
