//! CLI tests for the `pl` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with an empty config so the embedded library is used
fn pl(dir: &TempDir) -> Command {
    let config = dir.path().join("promptlib.yml");
    std::fs::write(&config, "export-title: Test Library\n").expect("write config");
    let mut cmd = Command::cargo_bin("pl").expect("pl binary");
    cmd.arg("--config").arg(config);
    cmd
}

#[test]
fn test_list_all() {
    let dir = TempDir::new().unwrap();
    pl(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("sms-reminder-24h"))
        .stdout(predicate::str::contains("owner-weekly-report"));
}

#[test]
fn test_list_search_unique_title() {
    let dir = TempDir::new().unwrap();
    pl(&dir)
        .args(["list", "--search", "Gap Filler", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sms-waitlist-fill"))
        .stdout(predicate::str::contains("sms-reminder-24h").not());
}

#[test]
fn test_list_no_match() {
    let dir = TempDir::new().unwrap();
    pl(&dir)
        .args(["list", "--search", "zzzz-nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No prompts match"));
}

#[test]
fn test_show_fills_variables() {
    let dir = TempDir::new().unwrap();
    pl(&dir)
        .args(["show", "sms-no-show-rebook", "--var", "Client Name=Dana", "--opt-out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hi Dana, we missed you today"))
        .stdout(predicate::str::contains("Reply STOP to opt out."));
}

#[test]
fn test_show_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    pl(&dir)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Prompt not found"));
}

#[test]
fn test_export_markdown_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("library.md");
    pl(&dir)
        .args(["export", "--format", "markdown", "--output"])
        .arg(&out)
        .assert()
        .success();

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("# Test Library"));
    assert!(content.contains("```text"));
}

#[test]
fn test_export_html_to_stdout() {
    let dir = TempDir::new().unwrap();
    pl(&dir)
        .args(["export", "--format", "html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<title>Test Library</title>"));
}
