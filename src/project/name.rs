//! npm-legal package name derivation.

use std::path::Path;

/// Sanitize a string into an npm-legal package name.
///
/// Lowercases, removes every character outside `[a-z0-9._\-/@]`, and strips
/// leading `.` and `_`. Idempotent: applying it twice yields the same
/// result as applying it once.
pub fn sanitize_package_name(input: &str) -> String {
    let filtered: String = input
        .to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '.' | '_' | '-' | '/' | '@'))
        .collect();

    filtered.trim_start_matches(['.', '_']).to_string()
}

/// Derive the project name from the destination directory's base name.
///
/// The template's own manifest name is never consulted. A base name that
/// sanitizes to nothing falls back to `"app"`.
pub fn project_name_for(destination: &Path) -> String {
    let base = destination
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let sanitized = sanitize_package_name(&base);
    if sanitized.is_empty() {
        "app".to_string()
    } else {
        sanitized
    }
}
