//! Yurt - Scaffold app projects from remote templates.
//!
//! Yurt turns a template reference (a github.com URL, an npm package
//! specifier, a local tarball, or a named example) into a downloaded,
//! extracted, and normalized project directory.
//!
//! # Modules
//!
//! - [`cache`] - On-disk HTTP response caching
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`extract`] - Archive extraction engine
//! - [`fetch`] - Tarball acquisition
//! - [`project`] - Post-extraction manifest normalization
//! - [`shell`] - External command execution
//! - [`template`] - Template reference resolution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use yurt::project::sanitize_package_name;
//!
//! // Project names are derived from the destination directory, made
//! // npm-legal deterministically.
//! assert_eq!(sanitize_package_name("__My.Weird/Name!!"), "my.weird/name");
//! ```
//!
//! For the full pipeline, see [`cli::commands::new::scaffold`].

pub mod cache;
pub mod cli;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod project;
pub mod shell;
pub mod template;
pub mod ui;

pub use error::{Result, YurtError};
