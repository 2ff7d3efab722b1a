//! Examples repository listing and filtering.
//!
//! The examples repository (`yurt-dev/examples`) is a monorepo where each
//! top-level directory is a complete example project. The listing comes
//! from the GitHub contents API and is cached for an hour; selection
//! filtering matches case-insensitive substrings or regular expressions
//! against display names, not mere prefixes.

use regex::RegexBuilder;

use super::GithubApi;
use crate::error::{Result, YurtError};

/// Owner of the examples repository.
pub const EXAMPLES_OWNER: &str = "yurt-dev";

/// Name of the examples repository.
pub const EXAMPLES_REPO: &str = "examples";

/// Branch the examples tarball is pulled from.
pub const EXAMPLES_BRANCH: &str = "master";

/// One item from the contents API.
#[derive(Debug, serde::Deserialize)]
struct ContentsItem {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// The list of available example names.
#[derive(Debug, Clone)]
pub struct ExamplesDirectory {
    names: Vec<String>,
}

impl ExamplesDirectory {
    /// Fetch the example listing: top-level directories of the examples
    /// repository, excluding dot-directories.
    pub fn fetch(api: &GithubApi) -> Result<Self> {
        let items: Vec<ContentsItem> =
            api.get_json(&format!("/repos/{EXAMPLES_OWNER}/{EXAMPLES_REPO}/contents"))?;

        let names = items
            .into_iter()
            .filter(|item| item.kind == "dir" && !item.name.starts_with('.'))
            .map(|item| item.name)
            .collect();

        Ok(Self { names })
    }

    /// Build a directory from known names (for tests and offline flows).
    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    /// All example names, in listing order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check whether an example exists.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Validate a requested example name.
    pub fn ensure(&self, name: &str) -> Result<()> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(YurtError::ExampleNotFound {
                name: name.to_string(),
            })
        }
    }

    /// Filter names by a user-supplied pattern.
    ///
    /// A name matches if the pattern occurs as a case-insensitive
    /// substring, or if the pattern is a valid regex that matches the
    /// name. An empty pattern matches everything.
    pub fn filter(&self, pattern: &str) -> Vec<&str> {
        if pattern.is_empty() {
            return self.names.iter().map(String::as_str).collect();
        }

        let needle = pattern.to_lowercase();
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .ok();

        self.names
            .iter()
            .filter(|name| {
                name.to_lowercase().contains(&needle)
                    || regex.as_ref().is_some_and(|re| re.is_match(name))
            })
            .map(String::as_str)
            .collect()
    }
}
