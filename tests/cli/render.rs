//! Render subcommand tests

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_render_stdin() {
    cargo_bin_cmd!("markout")
        .arg("render")
        .write_stdin("# Heading\n\nParagraph.")
        .assert()
        .success()
        .stdout("<h1 id=\"heading\">Heading</h1>\n<p>Paragraph.</p>\n");
}

#[test]
fn test_render_file_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("doc.md");
    fs::write(&test_file, "Some *emphasis*.").unwrap();

    cargo_bin_cmd!("markout")
        .args(["render", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("<p>Some <em>emphasis</em>.</p>\n");
}

#[test]
fn test_render_multiple_files_keeps_order() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("a.md");
    let second = temp_dir.path().join("b.md");
    fs::write(&first, "first").unwrap();
    fs::write(&second, "second").unwrap();

    cargo_bin_cmd!("markout")
        .args([
            "render",
            first.to_str().unwrap(),
            second.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("<p>first</p>\n<p>second</p>\n");
}

#[test]
fn test_render_to_output_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("notes.v2.md");
    let out_dir = temp_dir.path().join("site");
    fs::write(&input, "- a\n- b\n").unwrap();

    cargo_bin_cmd!("markout")
        .args([
            "render",
            "--output",
            out_dir.to_str().unwrap(),
            input.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rendered"));

    let html = fs::read_to_string(out_dir.join("notes.v2.html")).unwrap();
    assert_eq!(html, "\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n");
}

#[test]
fn test_render_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.md");

    cargo_bin_cmd!("markout")
        .args(["render", missing.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_render_flags_override_config() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("doc.md");
    fs::write(&test_file, "a <b>c</b>\n\n---\n").unwrap();

    cargo_bin_cmd!("markout")
        .args([
            "render",
            "--sanitize",
            "--xhtml",
            test_file.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("<p>a &lt;b&gt;c&lt;/b&gt;</p>\n<hr/>\n");
}

#[test]
fn test_render_uses_config_from_parent_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("docs");
    fs::create_dir_all(&nested).unwrap();
    fs::write(temp_dir.path().join(".markout.toml"), "header-prefix = \"doc-\"\n").unwrap();
    let test_file = nested.join("doc.md");
    fs::write(&test_file, "# Intro\n").unwrap();

    cargo_bin_cmd!("markout")
        .args(["render", test_file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("<h1 id=\"doc-intro\">Intro</h1>\n");
}
