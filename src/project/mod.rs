//! Post-extraction project normalization.
//!
//! After a template lands on disk, the destination still carries the
//! template's own identity: its package name, version, and repository
//! metadata. This module rewrites the manifest so the project belongs to
//! the user (sanitized name, fresh version, private), merges in computed
//! run scripts, and ensures baseline files like `.gitignore` exist.

pub mod manifest;
pub mod name;

pub use manifest::{normalize, NormalizeOutcome};
pub use name::{project_name_for, sanitize_package_name};
