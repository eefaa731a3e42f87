//! Tests for error messages, suggestions and exit codes.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gign(home: &TempDir, project: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gign").unwrap();
    cmd.current_dir(project.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env("GIGN__TEMPLATES__OFFLINE", "true")
        .env("GIGN__TEMPLATES__CUSTOM_DIR", home.path().join("templates"))
        .env("GIGN__CACHE__DIR", home.path().join("cache"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn dirs() -> (TempDir, TempDir) {
    (TempDir::new().unwrap(), TempDir::new().unwrap())
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let (home, project) = dirs();
    gign(&home, &project).arg("frobnicate").assert().code(2);
}

#[test]
fn invalid_technology_id() {
    let (home, project) = dirs();
    gign(&home, &project)
        .args(["generate", "--tech", "c sharp"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("c sharp"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn nothing_to_generate_in_empty_project() {
    let (home, project) = dirs();
    gign(&home, &project)
        .arg("generate")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Error:"));
    assert!(!project.path().join(".gitignore").exists());
}

#[test]
fn non_utf8_gitignore_is_left_alone() {
    let (home, project) = dirs();
    let target = project.path().join(".gitignore");
    fs::write(&target, [0xff, 0xfe, b'\n']).unwrap();

    gign(&home, &project)
        .args(["generate", "-t", "rust"])
        .assert()
        .code(2);
    assert_eq!(fs::read(&target).unwrap(), vec![0xff, 0xfe, b'\n']);
}

#[test]
fn unknown_template_only_warns() {
    let (home, project) = dirs();
    gign(&home, &project)
        .args(["generate", "-t", "rust,cobol"])
        .assert()
        .success()
        .stderr(predicate::str::contains("cobol"));
    assert!(project.path().join(".gitignore").exists());
}

#[test]
fn missing_root_is_not_found() {
    let (home, project) = dirs();
    gign(&home, &project)
        .args(["scan", "--path", "does-not-exist"])
        .assert()
        .code(3);
}

#[test]
fn show_unknown_template() {
    let (home, project) = dirs();
    gign(&home, &project)
        .args(["template", "show", "cobol"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("gign template list"));
}

#[test]
fn add_empty_template_is_rejected() {
    let (home, project) = dirs();
    let file = project.path().join("empty.gitignore");
    fs::write(&file, "# only a comment\n").unwrap();

    gign(&home, &project)
        .args(["template", "add", "empty"])
        .arg(&file)
        .assert()
        .code(2);
    assert!(!home.path().join("templates").join("empty.gitignore").exists());
}

#[test]
fn add_reserved_name_is_rejected() {
    let (home, project) = dirs();
    let file = project.path().join("x.gitignore");
    fs::write(&file, "x/\n").unwrap();

    gign(&home, &project)
        .args(["template", "add", "custom"])
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("reserved"));
}

#[test]
fn add_existing_needs_force() {
    let (home, project) = dirs();
    let file = project.path().join("t.gitignore");
    fs::write(&file, "x/\n").unwrap();

    gign(&home, &project)
        .args(["template", "add", "team"])
        .arg(&file)
        .assert()
        .success();
    gign(&home, &project)
        .args(["template", "add", "team"])
        .arg(&file)
        .assert()
        .code(2);
    gign(&home, &project)
        .args(["template", "add", "team", "--force"])
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn add_from_missing_file() {
    let (home, project) = dirs();
    gign(&home, &project)
        .args(["template", "add", "team", "nope.gitignore"])
        .assert()
        .code(3);
}

#[test]
fn validate_reports_errors() {
    let (home, project) = dirs();
    let file = project.path().join("bad.gitignore");
    fs::write(&file, "ok/\n!\n").unwrap();

    gign(&home, &project)
        .args(["template", "validate"])
        .arg(&file)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("line 2"));
}

#[test]
fn remove_missing_template() {
    let (home, project) = dirs();
    gign(&home, &project)
        .args(["template", "remove", "ghost", "--yes"])
        .assert()
        .code(3);
}

#[test]
fn unknown_config_key() {
    let (home, project) = dirs();
    gign(&home, &project)
        .args(["config", "get", "no.such.key"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn missing_explicit_config_file() {
    let (home, project) = dirs();
    gign(&home, &project)
        .args(["-c", "absent.toml", "scan"])
        .assert()
        .code(4);
}

#[test]
fn malformed_config_value() {
    let (home, project) = dirs();
    gign(&home, &project)
        .env("GIGN__DETECTION__MAX_DEPTH", "deep")
        .arg("scan")
        .assert()
        .code(4);
}
