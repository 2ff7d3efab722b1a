//! Archive extraction engine.
//!
//! Consumes a gzip'd tar byte stream and materializes a filtered,
//! path-rewritten subset of its entries under a destination directory.
//! Entries are processed strictly in the order the tar stream delivers
//! them; there are no parallel writes, so sibling files never race.
//!
//! Failure semantics: a broken stream, malformed gzip, or write failure
//! aborts the whole extraction and partial output is NOT rolled back. The
//! caller is responsible for having verified the destination fresh/empty
//! before starting.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};

use crate::error::{Result, YurtError};
use crate::fetch::TarballSource;

/// Writes a tarball source into a destination directory.
pub struct Extractor {
    destination: PathBuf,
}

impl Extractor {
    /// Create an extractor for a destination directory. The directory is
    /// created (recursively) on unpack if absent.
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    /// Get the destination directory.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Consume the source stream and write its entries.
    ///
    /// Per entry:
    /// - skipped unless its (unstripped) path falls under one of the
    ///   allowed prefixes, when any are set;
    /// - the first `strip_components` path segments are removed; entries
    ///   whose own depth does not survive stripping are silently skipped;
    /// - entries that would escape the destination are skipped;
    /// - the template-name substitution, when present, rewrites
    ///   occurrences in the entry path;
    /// - directories get standard permissions, files keep their archive
    ///   mode on Unix.
    ///
    /// Returns the number of files written.
    pub fn unpack(&self, source: TarballSource) -> Result<usize> {
        fs::create_dir_all(&self.destination).map_err(|e| fail("create destination", e))?;

        let decoder = GzDecoder::new(source.reader);
        let mut archive = Archive::new(decoder);

        let mut written = 0usize;

        for entry in archive.entries().map_err(|e| fail("read archive", e))? {
            let mut entry = entry.map_err(|e| fail("read archive entry", e))?;

            let raw = entry
                .path()
                .map_err(|e| fail("read entry path", e))?
                .to_string_lossy()
                .into_owned();

            if !source.allowed_prefixes.is_empty()
                && !source.allowed_prefixes.iter().any(|p| prefix_matches(&raw, p))
            {
                continue;
            }

            let Some(stripped) = strip_components(&raw, source.strip_components) else {
                tracing::debug!(path = %raw, "entry shallower than strip count, skipping");
                continue;
            };

            let relative = match &source.rename {
                Some(rename) => stripped.replace(&rename.from, &rename.to),
                None => stripped,
            };

            if relative.split('/').any(|seg| seg == "..") {
                tracing::debug!(path = %raw, "entry escapes destination, skipping");
                continue;
            }

            let dest_path = self.destination.join(&relative);

            match entry.header().entry_type() {
                EntryType::Directory => {
                    fs::create_dir_all(&dest_path)
                        .map_err(|e| fail("create directory", e))?;
                }
                EntryType::Regular => {
                    if let Some(parent) = dest_path.parent() {
                        fs::create_dir_all(parent).map_err(|e| fail("create directory", e))?;
                    }

                    let mut file =
                        File::create(&dest_path).map_err(|e| fail("create file", e))?;
                    io::copy(&mut entry, &mut file).map_err(|e| fail("write file", e))?;

                    #[cfg(unix)]
                    {
                        use std::os::unix::fs::PermissionsExt;
                        if let Ok(mode) = entry.header().mode() {
                            let _ = fs::set_permissions(
                                &dest_path,
                                fs::Permissions::from_mode(mode),
                            );
                        }
                    }

                    written += 1;
                }
                other => {
                    tracing::debug!(path = %raw, ?other, "skipping unsupported entry type");
                }
            }
        }

        Ok(written)
    }
}

fn fail(context: &str, e: impl std::fmt::Display) -> YurtError {
    YurtError::ExtractionFailure {
        message: format!("{context}: {e}"),
    }
}

/// Segment-boundary prefix check: `root/sub` matches `root/sub/x` and
/// `root/sub` itself, never `root/subextra`.
fn prefix_matches(path: &str, prefix: &str) -> bool {
    let path = path.trim_end_matches('/');
    path == prefix || path.starts_with(&format!("{prefix}/"))
}

/// Remove the first `count` segments from a `/`-separated archive path.
///
/// Returns `None` when the entry is not deep enough to survive stripping;
/// such entries are skipped rather than erroring (they name wrapper
/// directories the strip count exists to discard).
fn strip_components(path: &str, count: usize) -> Option<String> {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|seg| !seg.is_empty() && *seg != ".")
        .collect();

    if segments.len() <= count {
        return None;
    }

    Some(segments[count..].join("/"))
}
