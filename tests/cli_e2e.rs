//! End-to-end CLI tests for the krawl binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

const VALID_MANIFEST: &str = "\
name: Desk Lamp
repo: https://github.com/lampworks/desk-lamp
version: 1.0.0
license: CERN-OHL-S-2.0
function: Lights a desk
";

/// Binary isolated from the user's config and working directory.
fn krawl(temp: &Path) -> Command {
    let mut cmd = Command::cargo_bin("krawl").unwrap();
    cmd.env("XDG_CONFIG_HOME", temp.join("config"))
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--workdir")
        .arg(temp.join("work"));
    cmd
}

// ==================== General Tests ====================

#[test]
fn test_binary_help_displays_usage() {
    let temp = TempDir::new().unwrap();
    krawl(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Crawl open hardware projects"));
}

#[test]
fn test_binary_version_displays_version() {
    let temp = TempDir::new().unwrap();
    krawl(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("krawl"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let temp = TempDir::new().unwrap();
    krawl(temp.path())
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_invalid_config_exits_with_failure_code() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("bad.toml");
    fs::write(&config, "concurrency = 0\n").unwrap();

    krawl(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["list", "fetchers"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("concurrency"));
}

// ==================== List Tests ====================

#[test]
fn test_list_fetchers_without_tokens() {
    let temp = TempDir::new().unwrap();
    krawl(temp.path())
        .args(["list", "fetchers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("appropedia.org"))
        .stdout(predicate::str::is_match(r"url\s+available").unwrap())
        .stdout(predicate::str::is_match(r"github\.com\s+unavailable").unwrap());
}

#[test]
fn test_list_fetchers_with_token_from_config() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("config").join("krawl");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[fetchers.oshwa]\naccess_token = \"abc\"\n",
    )
    .unwrap();

    krawl(temp.path())
        .args(["list", "fetchers"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"oshwa\.org\s+available").unwrap());
}

// ==================== Validate Tests ====================

#[test]
fn test_validate_manifest_exit_codes() {
    let temp = TempDir::new().unwrap();
    let valid = temp.path().join("okh.yml");
    let invalid = temp.path().join("broken.yml");
    fs::write(&valid, VALID_MANIFEST).unwrap();
    fs::write(&invalid, "name: No Repo\n").unwrap();

    krawl(temp.path())
        .args(["validate", "manifest"])
        .arg(&valid)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));

    krawl(temp.path())
        .args(["validate", "manifest"])
        .arg(&invalid)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("invalid"))
        .stdout(predicate::str::contains("repo"));
}

#[test]
fn test_validate_missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    krawl(temp.path())
        .args(["validate", "manifest"])
        .arg(temp.path().join("absent.toml"))
        .assert()
        .code(2);
}

// ==================== Convert Tests ====================

#[test]
fn test_convert_yaml_to_turtle_and_refuse_overwrite() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("okh.yml");
    let output = temp.path().join("okh.ttl");
    fs::write(&input, VALID_MANIFEST).unwrap();

    krawl(temp.path())
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();
    let turtle = fs::read_to_string(&output).unwrap();
    assert!(turtle.contains("@prefix"));
    assert!(turtle.contains("Desk Lamp"));

    krawl(temp.path())
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    krawl(temp.path())
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn test_convert_rejects_rdf_input() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("okh.ttl");
    fs::write(&input, "<a> <b> <c> .\n").unwrap();

    krawl(temp.path())
        .arg("convert")
        .arg(&input)
        .arg(temp.path().join("okh.toml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("RDF input is not supported"));
}

// ==================== Export Tests ====================

#[test]
fn test_export_empty_store() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("out");

    krawl(temp.path())
        .arg("export")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 0 projects"));
    assert!(temp.path().join("work").join("state.db").exists());
}

// ==================== Fetch Tests ====================

#[tokio::test]
async fn test_fetch_url_then_export() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/lamp/okh.yml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(VALID_MANIFEST))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();
    let report = temp.path().join("report.json");

    krawl(temp.path())
        .args(["fetch", "url"])
        .arg(format!("{}/lamp/okh.yml", server.uri()))
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 succeeded"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["succeeded"], 1);

    let out = temp.path().join("out");
    krawl(temp.path())
        .arg("export")
        .arg(&out)
        .arg("--platform")
        .arg("url")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 projects"));
}

#[tokio::test]
async fn test_fetch_url_failure_exits_with_failure_code() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/gone/okh.yml"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let temp = TempDir::new().unwrap();

    krawl(temp.path())
        .args(["fetch", "url", "-r", "0"])
        .arg(format!("{}/gone/okh.yml", server.uri()))
        .assert()
        .code(2)
        .stdout(predicate::str::contains("1 failed"));
}

#[test]
fn test_fetch_unavailable_platform_is_an_error() {
    let temp = TempDir::new().unwrap();
    krawl(temp.path())
        .args(["fetch", "github"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("github"));
}
