//! Destination manifest rewriting and baseline files.

use std::fs;
use std::path::Path;

use include_dir::{include_dir, Dir};
use serde_json::{json, Map, Value};

use crate::error::Result;

/// Baseline project files bundled into the binary.
static ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// What the normalization pass actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOutcome {
    /// Whether `package.json` existed, parsed, and was rewritten.
    pub manifest_rewritten: bool,
    /// Whether a default `.gitignore` was put in place.
    pub ignore_file_created: bool,
}

/// Normalize an extracted template in `destination`.
///
/// The manifest rewrite is conditioned on `package.json` already existing
/// and parsing: a missing or malformed manifest downgrades to a logged
/// skip instead of failing the scaffold. The ignore file is always
/// ensured.
pub fn normalize(destination: &Path, project_name: &str) -> Result<NormalizeOutcome> {
    let manifest_rewritten = rewrite_manifest(destination, project_name)?;
    let ignore_file_created = ensure_ignore_file(destination)?;

    Ok(NormalizeOutcome {
        manifest_rewritten,
        ignore_file_created,
    })
}

/// Rewrite the destination `package.json`. Returns whether a rewrite
/// happened.
fn rewrite_manifest(destination: &Path, project_name: &str) -> Result<bool> {
    let manifest_path = destination.join("package.json");

    if !manifest_path.exists() {
        tracing::warn!(
            dir = %destination.display(),
            "template has no package.json, skipping manifest rewrite"
        );
        return Ok(false);
    }

    let raw = fs::read_to_string(&manifest_path)?;
    let mut manifest: Map<String, Value> = match serde_json::from_str(&raw) {
        Ok(Value::Object(map)) => map,
        _ => {
            tracing::warn!(
                path = %manifest_path.display(),
                "template package.json is malformed, skipping manifest rewrite"
            );
            return Ok(false);
        }
    };

    // The project's identity always comes from the destination, never the
    // template's own manifest.
    manifest.insert("name".into(), json!(project_name));
    manifest.insert("version".into(), json!("1.0.0"));
    manifest.insert("private".into(), json!(true));

    // Template-only metadata.
    for field in ["description", "repository", "tags"] {
        manifest.remove(field);
    }

    let mut scripts = match manifest.remove("scripts") {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };

    for (key, value) in computed_scripts(is_native_project(destination)) {
        // Existing template scripts win on collision.
        scripts.entry(key.to_string()).or_insert_with(|| json!(value));
    }
    manifest.insert("scripts".into(), Value::Object(scripts));

    let mut output = serde_json::to_string_pretty(&Value::Object(manifest))
        .map_err(|e| anyhow::anyhow!("Failed to serialize package.json: {e}"))?;
    output.push('\n');
    fs::write(&manifest_path, output)?;

    Ok(true)
}

/// A template that ships native projects gets device-run scripts;
/// everything else gets managed start scripts.
fn is_native_project(destination: &Path) -> bool {
    destination.join("ios").is_dir() || destination.join("android").is_dir()
}

fn computed_scripts(native: bool) -> [(&'static str, &'static str); 4] {
    if native {
        [
            ("start", "yurt start --dev-client"),
            ("android", "yurt run:android"),
            ("ios", "yurt run:ios"),
            ("web", "yurt start --web"),
        ]
    } else {
        [
            ("start", "yurt start"),
            ("android", "yurt start --android"),
            ("ios", "yurt start --ios"),
            ("web", "yurt start --web"),
        ]
    }
}

/// Copy the bundled default ignore file into place when the destination
/// lacks one. Never overwrites an existing file.
fn ensure_ignore_file(destination: &Path) -> Result<bool> {
    let target = destination.join(".gitignore");
    if target.exists() {
        return Ok(false);
    }

    let contents = ASSETS
        .get_file("gitignore")
        .map(|file| file.contents())
        .unwrap_or_default();
    fs::write(&target, contents)?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_manifest(dir: &Path, contents: &str) {
        fs::write(dir.join("package.json"), contents).unwrap();
    }

    fn read_manifest(dir: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(dir.join("package.json")).unwrap()).unwrap()
    }

    #[test]
    fn rewrites_identity_fields() {
        let temp = TempDir::new().unwrap();
        write_manifest(
            temp.path(),
            r#"{
                "name": "starter-template",
                "version": "3.2.1",
                "description": "A starter",
                "repository": "https://github.com/acme/starter",
                "tags": ["starter"],
                "dependencies": {"left-pad": "^1.0.0"}
            }"#,
        );

        let outcome = normalize(temp.path(), "my-app").unwrap();
        assert!(outcome.manifest_rewritten);

        let manifest = read_manifest(temp.path());
        assert_eq!(manifest["name"], "my-app");
        assert_eq!(manifest["version"], "1.0.0");
        assert_eq!(manifest["private"], true);
        assert!(manifest.get("description").is_none());
        assert!(manifest.get("repository").is_none());
        assert!(manifest.get("tags").is_none());
        // Unrelated fields survive.
        assert_eq!(manifest["dependencies"]["left-pad"], "^1.0.0");
    }

    #[test]
    fn template_scripts_win_on_collision() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), r#"{"scripts": {"start": "custom"}}"#);

        normalize(temp.path(), "my-app").unwrap();

        let manifest = read_manifest(temp.path());
        assert_eq!(manifest["scripts"]["start"], "custom");
        // Non-colliding computed defaults are still added.
        assert_eq!(manifest["scripts"]["web"], "yurt start --web");
    }

    #[test]
    fn managed_project_gets_start_scripts() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "{}");

        normalize(temp.path(), "my-app").unwrap();

        let manifest = read_manifest(temp.path());
        assert_eq!(manifest["scripts"]["start"], "yurt start");
        assert_eq!(manifest["scripts"]["ios"], "yurt start --ios");
    }

    #[test]
    fn native_project_gets_run_scripts() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "{}");
        fs::create_dir(temp.path().join("ios")).unwrap();

        normalize(temp.path(), "my-app").unwrap();

        let manifest = read_manifest(temp.path());
        assert_eq!(manifest["scripts"]["start"], "yurt start --dev-client");
        assert_eq!(manifest["scripts"]["ios"], "yurt run:ios");
        assert_eq!(manifest["scripts"]["android"], "yurt run:android");
    }

    #[test]
    fn missing_manifest_skips_rewrite_but_ensures_ignore_file() {
        let temp = TempDir::new().unwrap();

        let outcome = normalize(temp.path(), "my-app").unwrap();

        assert!(!outcome.manifest_rewritten);
        assert!(outcome.ignore_file_created);
        assert!(!temp.path().join("package.json").exists());
        assert!(temp.path().join(".gitignore").exists());
    }

    #[test]
    fn malformed_manifest_is_left_untouched() {
        let temp = TempDir::new().unwrap();
        write_manifest(temp.path(), "{not json");

        let outcome = normalize(temp.path(), "my-app").unwrap();

        assert!(!outcome.manifest_rewritten);
        assert_eq!(
            fs::read_to_string(temp.path().join("package.json")).unwrap(),
            "{not json"
        );
    }

    #[test]
    fn existing_ignore_file_is_never_overwritten() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".gitignore"), "custom\n").unwrap();

        let outcome = normalize(temp.path(), "my-app").unwrap();

        assert!(!outcome.ignore_file_created);
        assert_eq!(
            fs::read_to_string(temp.path().join(".gitignore")).unwrap(),
            "custom\n"
        );
    }

    #[test]
    fn default_ignore_file_mentions_node_modules() {
        let temp = TempDir::new().unwrap();
        normalize(temp.path(), "my-app").unwrap();

        let contents = fs::read_to_string(temp.path().join(".gitignore")).unwrap();
        assert!(contents.contains("node_modules"));
    }
}
