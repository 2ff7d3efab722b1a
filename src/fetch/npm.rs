//! npm tarball URL resolution via the local package manager.

use crate::error::{Result, YurtError};
use crate::shell::run_captured;

/// The package manager whose CLI resolves tarball URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    /// Detect the invoking package manager from `npm_config_user_agent`
    /// (set by npm/yarn/pnpm when they spawn child processes). Defaults to
    /// npm.
    pub fn from_env() -> Self {
        match std::env::var("npm_config_user_agent") {
            Ok(agent) if agent.starts_with("yarn") => Self::Yarn,
            Ok(agent) if agent.starts_with("pnpm") => Self::Pnpm,
            _ => Self::Npm,
        }
    }

    /// Binary name to invoke.
    pub fn binary(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Arguments for the metadata-view subcommand printing the tarball URL.
    fn view_args<'a>(&self, specifier: &'a str) -> Vec<&'a str> {
        match self {
            Self::Npm | Self::Pnpm => vec!["view", specifier, "dist.tarball"],
            Self::Yarn => vec!["info", specifier, "dist.tarball"],
        }
    }
}

/// Resolve a package specifier to its registry tarball URL by shelling out
/// to the package manager's view command.
///
/// Yarn in particular wraps its output in banner lines, so the URL is taken
/// as the last `http(s)://` line of stdout.
pub fn resolve_tarball_url(pm: PackageManager, specifier: &str) -> Result<String> {
    let args = pm.view_args(specifier);
    let command = format!("{} {}", pm.binary(), args.join(" "));

    let result = run_captured(pm.binary(), &args, None).map_err(|e| {
        YurtError::PackageManagerFailure {
            command: command.clone(),
            detail: e.to_string(),
        }
    })?;

    if !result.success {
        return Err(YurtError::PackageManagerFailure {
            command,
            detail: format!(
                "exit code {:?}: {}",
                result.exit_code,
                result.stderr.trim()
            ),
        });
    }

    extract_url(&result.stdout).ok_or_else(|| YurtError::PackageManagerFailure {
        command,
        detail: "no tarball URL in output".into(),
    })
}

/// Pull the last URL-shaped line out of view-command output.
fn extract_url(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("http://") || line.starts_with("https://"))
        .next_back()
        .map(str::to_string)
}

/// The package name of a specifier, with any version suffix removed.
///
/// `starter@2.0.0` yields `starter`; `@acme/starter@^1` yields
/// `@acme/starter`.
pub fn package_name(specifier: &str) -> &str {
    let (scope_offset, rest) = if let Some(stripped) = specifier.strip_prefix('@') {
        (1, stripped)
    } else {
        (0, specifier)
    };

    match rest.find('@') {
        Some(idx) => &specifier[..scope_offset + idx],
        None => specifier,
    }
}
