//! Tokens subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_tokens_stdin() {
    let output = cargo_bin_cmd!("markout")
        .arg("tokens")
        .write_stdin("# Title\n\n[ref]: /target\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["tokens"][0]["type"], "heading");
    assert_eq!(report["tokens"][0]["depth"], 1);
    assert_eq!(report["tokens"][0]["line"], 1);
    assert_eq!(report["links"]["ref"]["href"], "/target");
    assert_eq!(report["result"], "<h1 id=\"title\">Title</h1>\n");
}

#[test]
fn test_tokens_respects_no_gfm() {
    cargo_bin_cmd!("markout")
        .args(["tokens", "--no-gfm"])
        .write_stdin("```\ncode\n```\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"type\": \"code\"").not());
}
