//! Tarball source acquisition.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use crate::cache::CachedClient;
use crate::error::Result;
use crate::template::examples::{EXAMPLES_BRANCH, EXAMPLES_OWNER, EXAMPLES_REPO};
use crate::template::TemplateReference;

use super::npm;

/// Default GitHub tarball download host.
pub const CODELOAD_BASE: &str = "https://codeload.github.com";

/// Build the codeload tarball URL for a repo at a branch.
pub fn codeload_url(base: &str, owner: &str, repo: &str, branch: &str) -> String {
    format!("{base}/{owner}/{repo}/tar.gz/{branch}")
}

/// A path substitution applied to archive entry paths during extraction.
///
/// Templates distributed as npm packages may embed their own package name
/// in file or directory names; those occurrences are rewritten to the
/// destination project's sanitized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRename {
    pub from: String,
    pub to: String,
}

/// An opened tarball byte source plus the extraction parameters derived
/// from its reference. Constructed immediately before extraction and
/// consumed by it.
pub struct TarballSource {
    /// The gzip'd tar byte stream.
    pub reader: Box<dyn Read>,
    /// Leading path segments to discard from every entry.
    pub strip_components: usize,
    /// When non-empty, only entries under one of these prefixes are
    /// extracted.
    pub allowed_prefixes: Vec<String>,
    /// Optional template-name substitution applied to entry paths.
    pub rename: Option<PathRename>,
}

impl std::fmt::Debug for TarballSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TarballSource")
            .field("strip_components", &self.strip_components)
            .field("allowed_prefixes", &self.allowed_prefixes)
            .field("rename", &self.rename)
            .finish_non_exhaustive()
    }
}

/// Opens tarball sources for resolved template references.
pub struct TarballFetcher<'a> {
    client: &'a CachedClient,
    codeload_base: String,
}

impl<'a> TarballFetcher<'a> {
    /// Create a fetcher downloading through the given (template-cache)
    /// client.
    pub fn new(client: &'a CachedClient) -> Self {
        Self::with_codeload_base(client, CODELOAD_BASE)
    }

    /// Create a fetcher with an explicit download host (for tests).
    pub fn with_codeload_base(client: &'a CachedClient, base: impl Into<String>) -> Self {
        Self {
            client,
            codeload_base: base.into(),
        }
    }

    /// Open the byte source for a reference, with its strip count and
    /// allow-list.
    ///
    /// `project_name` is the sanitized destination name used for npm
    /// template-name substitution.
    pub fn acquire(
        &self,
        reference: &TemplateReference,
        project_name: &str,
    ) -> Result<TarballSource> {
        match reference {
            TemplateReference::Github {
                owner,
                repo,
                branch,
                sub_path,
            } => self.github(owner, repo, branch, sub_path),
            TemplateReference::NamedExample { name } => self.example(name),
            TemplateReference::NpmPackage { specifier } => self.npm(specifier, project_name),
            TemplateReference::LocalFile { path } => Self::local(path),
        }
    }

    /// GitHub tarballs wrap everything in a synthetic `{repo}-{branch}`
    /// top-level directory, so the strip count is always at least 1; a
    /// sub-path adds one stripped segment per path component and restricts
    /// extraction to that directory.
    fn github(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sub_path: &str,
    ) -> Result<TarballSource> {
        let url = codeload_url(&self.codeload_base, owner, repo, branch);
        tracing::debug!(%url, "downloading repository tarball");
        let bytes = self.client.get(&url)?;

        let (strip_components, allowed_prefixes) = if sub_path.is_empty() {
            (1, Vec::new())
        } else {
            (
                sub_path.split('/').count() + 1,
                vec![format!("{repo}-{branch}/{sub_path}")],
            )
        };

        Ok(TarballSource {
            reader: Box::new(Cursor::new(bytes)),
            strip_components,
            allowed_prefixes,
            rename: None,
        })
    }

    /// Example tarballs strip two segments: the synthetic
    /// `examples-{branch}` wrapper and the example directory itself.
    fn example(&self, name: &str) -> Result<TarballSource> {
        let url = codeload_url(
            &self.codeload_base,
            EXAMPLES_OWNER,
            EXAMPLES_REPO,
            EXAMPLES_BRANCH,
        );
        tracing::debug!(%url, example = name, "downloading examples tarball");
        let bytes = self.client.get(&url)?;

        Ok(TarballSource {
            reader: Box::new(Cursor::new(bytes)),
            strip_components: 2,
            allowed_prefixes: vec![format!("{EXAMPLES_REPO}-{EXAMPLES_BRANCH}/{name}")],
            rename: None,
        })
    }

    /// npm tarballs always wrap contents in a single `package/` directory.
    fn npm(&self, specifier: &str, project_name: &str) -> Result<TarballSource> {
        let pm = npm::PackageManager::from_env();
        let url = npm::resolve_tarball_url(pm, specifier)?;
        tracing::debug!(%url, specifier, "downloading package tarball");
        let bytes = self.client.get(&url)?;

        Ok(TarballSource {
            reader: Box::new(Cursor::new(bytes)),
            strip_components: 1,
            allowed_prefixes: Vec::new(),
            rename: Some(PathRename {
                from: npm::package_name(specifier).to_string(),
                to: project_name.to_string(),
            }),
        })
    }

    /// Local archives follow the npm-pack `package/` convention. No
    /// network, no cache.
    fn local(path: &Path) -> Result<TarballSource> {
        let file = File::open(path)?;

        Ok(TarballSource {
            reader: Box::new(file),
            strip_components: 1,
            allowed_prefixes: Vec::new(),
            rename: None,
        })
    }
}
