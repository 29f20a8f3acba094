//! Cross-cutting CLI tests (help, version, error handling)

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help() {
    cargo_bin_cmd!("markout")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Markout converts Markdown to HTML"));
}

#[test]
fn test_version() {
    cargo_bin_cmd!("markout")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_subcommand() {
    cargo_bin_cmd!("markout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    cargo_bin_cmd!("markout")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_render_help() {
    cargo_bin_cmd!("markout")
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Render Markdown documents"));
}

#[test]
fn test_tokens_help() {
    cargo_bin_cmd!("markout")
        .args(["tokens", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("block tokens"));
}

#[test]
fn test_invalid_config_fails() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    std::fs::write(&config_file, "gfm = \"yes\"").unwrap();

    cargo_bin_cmd!("markout")
        .args(["render", "--config", config_file.to_str().unwrap()])
        .write_stdin("text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}
