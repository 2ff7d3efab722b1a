//! Error types for Yurt operations.
//!
//! This module defines [`YurtError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `YurtError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `YurtError::Other`) for unexpected errors
//! - All errors should provide actionable messages for users
//!
//! Every classified error is fatal to the current invocation: `yurt new` is
//! a one-shot scaffolding operation, so nothing here is retried or recovered
//! with degraded functionality. Errors unwind to the command boundary where
//! `main` turns them into a non-zero exit code.

use thiserror::Error;

/// Core error type for Yurt operations.
#[derive(Debug, Error)]
pub enum YurtError {
    /// Template URL points at a host other than github.com.
    #[error("Unsupported template host: {url} (only github.com templates are supported)")]
    UnsupportedHost { url: String },

    /// GitHub repository (or the requested sub-path/branch within it) does
    /// not exist or does not contain a template. Network failures during the
    /// existence probe fail closed into this variant.
    #[error("Could not locate a template at {repo}: {detail}")]
    RepositoryNotFound { repo: String, detail: String },

    /// Named example is not present in the examples repository listing.
    #[error("Unknown example: {name}")]
    ExampleNotFound { name: String },

    /// Non-2xx HTTP status while opening a download stream.
    #[error("Unexpected response ({status}) from {url}")]
    UnexpectedResponse { status: String, url: String },

    /// Stream, gzip, or disk error while unpacking an archive. The
    /// destination directory may be left with a partial extraction.
    #[error("Extraction failed: {message}")]
    ExtractionFailure { message: String },

    /// Package-manager shell-out (tarball URL lookup) failed.
    #[error("Package manager command '{command}' failed: {detail}")]
    PackageManagerFailure { command: String, detail: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Yurt operations.
pub type Result<T> = std::result::Result<T, YurtError>;
