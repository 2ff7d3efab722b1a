//! End-to-end pipeline tests over the public API.
//!
//! These exercise resolve → acquire → extract → normalize against a mock
//! GitHub API and tarball host, without touching the real network.

use std::fs;
use std::time::Duration;

use flate2::write::GzEncoder;
use flate2::Compression;
use httpmock::prelude::*;
use tempfile::TempDir;
use url::Url;

use yurt::cache::{CacheStore, CachedClient};
use yurt::extract::Extractor;
use yurt::fetch::TarballFetcher;
use yurt::project;
use yurt::template::{GithubApi, GithubResolver, TemplateReference};

fn tarball(entries: &[(&str, &str)]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for (path, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, *path, contents.as_bytes())
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap()
}

fn api_client(temp: &TempDir, server: &MockServer) -> GithubApi {
    let client = CachedClient::with_store(
        Some(CacheStore::new(temp.path().join("api"))),
        Some(Duration::from_secs(3600)),
    );
    GithubApi::with_client(client, server.base_url())
}

#[test]
fn monorepo_sub_path_template_round_trip() {
    let server = MockServer::start();

    // Resolution: default branch + existence probe.
    server.mock(|when, then| {
        when.method(GET).path("/repos/acme/starters");
        then.status(200).body(r#"{"default_branch": "main"}"#);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/starters/contents/apps/demo/package.json")
            .query_param("ref", "main");
        then.status(200).body("{}");
    });

    // Download: monorepo tarball with sibling apps.
    let bytes = tarball(&[
        (
            "starters-main/apps/demo/package.json",
            r#"{"name": "demo-starter", "scripts": {"start": "custom"}, "repository": "x"}"#,
        ),
        ("starters-main/apps/demo/src/index.js", "run();\n"),
        ("starters-main/apps/other/package.json", "{}"),
        ("starters-main/README.md", "# starters"),
    ]);
    server.mock(|when, then| {
        when.method(GET).path("/acme/starters/tar.gz/main");
        then.status(200).body(bytes);
    });

    let temp = TempDir::new().unwrap();
    let api = api_client(&temp, &server);
    let resolver = GithubResolver::new(&api);

    let url = Url::parse("https://github.com/acme/starters").unwrap();
    let reference = resolver.resolve_url(&url, Some("apps/demo")).unwrap();

    assert_eq!(
        reference,
        TemplateReference::Github {
            owner: "acme".into(),
            repo: "starters".into(),
            branch: "main".into(),
            sub_path: "apps/demo".into(),
        }
    );

    let template_client = CachedClient::with_store(
        Some(CacheStore::new(temp.path().join("templates"))),
        None,
    );
    let fetcher = TarballFetcher::with_codeload_base(&template_client, server.base_url());
    let source = fetcher.acquire(&reference, "fresh-app").unwrap();

    let destination = temp.path().join("fresh-app");
    let written = Extractor::new(&destination).unpack(source).unwrap();
    assert_eq!(written, 2);

    // Only the requested sub-directory, fully re-rooted.
    assert!(destination.join("src/index.js").exists());
    assert!(!destination.join("apps").exists());
    assert!(!destination.join("README.md").exists());

    let project_name = project::project_name_for(&destination);
    project::normalize(&destination, &project_name).unwrap();

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(destination.join("package.json")).unwrap())
            .unwrap();

    assert_eq!(manifest["name"], "fresh-app");
    assert_eq!(manifest["version"], "1.0.0");
    assert_eq!(manifest["private"], true);
    assert!(manifest.get("repository").is_none());
    // Template-provided script wins; computed defaults fill the gaps.
    assert_eq!(manifest["scripts"]["start"], "custom");
    assert_eq!(manifest["scripts"]["web"], "yurt start --web");
}

#[test]
fn whole_repository_template_uses_default_branch() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/repos/acme/blank-app");
        then.status(200).body(r#"{"default_branch": "trunk"}"#);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/repos/acme/blank-app/contents/package.json")
            .query_param("ref", "trunk");
        then.status(200).body("{}");
    });

    let bytes = tarball(&[
        ("blank-app-trunk/package.json", "{}"),
        ("blank-app-trunk/App.js", "export default 0;\n"),
    ]);
    server.mock(|when, then| {
        when.method(GET).path("/acme/blank-app/tar.gz/trunk");
        then.status(200).body(bytes);
    });

    let temp = TempDir::new().unwrap();
    let api = api_client(&temp, &server);
    let resolver = GithubResolver::new(&api);

    let url = Url::parse("https://github.com/acme/blank-app").unwrap();
    let reference = resolver.resolve_url(&url, None).unwrap();

    match &reference {
        TemplateReference::Github {
            branch, sub_path, ..
        } => {
            assert_eq!(branch, "trunk");
            assert_eq!(sub_path, "");
        }
        other => panic!("Expected Github reference, got {other:?}"),
    }

    let template_client = CachedClient::with_store(None, None);
    let fetcher = TarballFetcher::with_codeload_base(&template_client, server.base_url());
    let source = fetcher.acquire(&reference, "app").unwrap();

    let destination = temp.path().join("app");
    Extractor::new(&destination).unpack(source).unwrap();

    assert!(destination.join("App.js").exists());
    assert!(destination.join("package.json").exists());
    assert!(!destination.join("blank-app-trunk").exists());
}
