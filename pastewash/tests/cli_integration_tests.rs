// pastewash/tests/cli_integration_tests.rs
use assert_cmd::Command;
use predicates::prelude::*;
use test_log::test;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn pastewash() -> Command {
    Command::cargo_bin("pastewash").expect("binary builds")
}

#[test]
fn sanitize_cleans_stdin_to_stdout() {
    pastewash()
        .args(["--quiet", "sanitize"])
        .write_stdin("<div><b>x</b></div><!--junk-->")
        .assert()
        .success()
        .stdout("<p><strong>x</strong></p>");
}

#[test]
fn sanitize_plain_text_escapes_markup() {
    pastewash()
        .args(["--quiet", "sanitize", "--plain-text"])
        .write_stdin("2 < 3")
        .assert()
        .success()
        .stdout("2 &#60; 3");
}

#[test]
fn sanitize_allow_only_flag_reduces_tags() {
    pastewash()
        .args(["--quiet", "sanitize", "--allow-only", "strong,em"])
        .write_stdin("<div>hello <span>world</span></div>")
        .assert()
        .success()
        .stdout("hello world");
}

#[test]
fn sanitize_reads_and_writes_files() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("raw.html");
    let output_path = dir.path().join("clean.html");
    std::fs::write(&input_path, "<p><br>text<br><br></p>").unwrap();

    pastewash()
        .args(["--quiet", "sanitize"])
        .arg("-i")
        .arg(&input_path)
        .arg("-o")
        .arg(&output_path)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(written, "<p>text</p>\n");
}

#[test]
fn sanitize_allow_all_attrs_keeps_attributes() {
    pastewash()
        .args(["--quiet", "sanitize", "--allow-all-attrs"])
        .write_stdin(r#"<p class="x">a</p>"#)
        .assert()
        .success()
        .stdout(r#"<p class="x">a</p>"#);
}

#[test]
fn sanitize_allow_all_tags_keeps_denied_elements() {
    pastewash()
        .args(["--quiet", "sanitize", "--allow-all-tags"])
        .write_stdin("<p>a</p><script>s()</script>")
        .assert()
        .success()
        .stdout("<p>a</p><script>s()</script>");
}

#[test]
fn sanitize_honors_config_file() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "clean_empty_tags: true\nclean_edge_brs: false").unwrap();

    pastewash()
        .args(["--quiet", "sanitize", "--config"])
        .arg(config.path())
        .write_stdin("<p></p><p>x</p>")
        .assert()
        .success()
        .stdout("<p>x</p>");
}

#[test]
fn sanitize_rejects_broken_config() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "clean_tags:\n  - ':::'").unwrap();

    pastewash()
        .args(["--quiet", "sanitize", "--config"])
        .arg(config.path())
        .write_stdin("<p>x</p>")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config validation failed"));
}

#[test]
fn missing_input_file_fails_with_context() {
    pastewash()
        .args(["--quiet", "sanitize", "-i", "/no/such/file.html"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn no_arguments_prints_help() {
    pastewash()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
