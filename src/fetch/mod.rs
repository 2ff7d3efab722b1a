//! Tarball acquisition.
//!
//! Given a resolved [`TemplateReference`](crate::template::TemplateReference),
//! this module opens a gzip'd tar byte source together with the strip count
//! and prefix allow-list the extraction engine needs. Remote tarballs are
//! fetched through the `template-cache` namespace with no TTL: templates
//! are versioned by branch/tag, so only explicit invalidation removes them.

pub mod npm;
pub mod tarball;

pub use npm::{package_name, resolve_tarball_url, PackageManager};
pub use tarball::{codeload_url, PathRename, TarballFetcher, TarballSource};
