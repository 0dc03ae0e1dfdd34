//! CLI integration tests for pyss.
//!
//! These tests verify the command-line interface behavior using assert_cmd.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use crate::integration::fixtures::{
    create_empty_project, create_project, create_project_with_file, simple_scripts,
    standard_scripts,
};

/// Get a Command for the pyss binary.
fn pyss() -> Command {
    cargo_bin_cmd!("pyss")
}

// ==================== Help and Version ====================

#[test]
fn test_help_output() {
    pyss()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Options:"))
        .stdout(predicate::str::contains("--list"))
        .stdout(predicate::str::contains("--silent"))
        .stdout(predicate::str::contains("--quiet"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_version_output() {
    pyss()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pyss"))
        .stdout(predicate::str::is_match(r"\d+\.\d+\.\d+").unwrap());
}

#[test]
fn test_version_short_is_lowercase_v() {
    pyss()
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"\d+\.\d+\.\d+").unwrap());
}

#[test]
fn test_completions() {
    pyss()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pyss"));
}

// ==================== Missing Input ====================

#[test]
fn test_no_script_name() {
    let project = create_project(&standard_scripts());

    pyss()
        .current_dir(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No script name provided."))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_no_config_file() {
    let project = create_empty_project();

    pyss()
        .arg("--list")
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No PySS YAML (pyss.yaml) file found"));
}

#[test]
fn test_missing_file_option() {
    let project = create_empty_project();

    pyss()
        .args(["--list", "--file", "nope.yaml"])
        .current_dir(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load config"));
}

// ==================== List Mode ====================

#[test]
fn test_list_basic() {
    let project = create_project(&standard_scripts());

    pyss()
        .arg("--list")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Run script with: pyss <script_name>"))
        .stdout(predicate::str::contains("Available Scripts found in pyss.yaml:"))
        .stdout(predicate::str::contains("- build : Build the project"))
        .stdout(predicate::str::contains("- test  : Run the tests"));
}

#[test]
fn test_list_hides_internal_scripts() {
    let project = create_project(&standard_scripts());

    pyss()
        .arg("-l")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("setup").not());
}

#[test]
fn test_list_reports_file_name() {
    let project = create_project_with_file(
        "pyss.yml",
        &simple_scripts(&[("hello", "Say hello", "echo hello")]),
    );

    pyss()
        .arg("--list")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Scripts found in pyss.yml:"));
}

#[test]
fn test_list_with_explicit_file() {
    let project = create_project_with_file(
        "tasks.yaml",
        &simple_scripts(&[("deploy", "Ship it", "echo deploy")]),
    );

    pyss()
        .args(["--list", "--file", "tasks.yaml"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("tasks.yaml"));
}

#[test]
fn test_list_empty_table() {
    let project = create_project("scripts: []\n");

    pyss()
        .arg("--list")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Available Scripts"));
}

// ==================== Errors ====================

#[test]
fn test_unknown_script() {
    let project = create_project(&standard_scripts());

    pyss()
        .arg("nope")
        .current_dir(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Script 'nope' not found."));
}

#[test]
fn test_unknown_script_suggestions() {
    let project = create_project(&standard_scripts());

    pyss()
        .arg("biuld")
        .current_dir(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Did you mean: 'build'?"));
}

#[test]
fn test_internal_script_rejected() {
    let project = create_project(&standard_scripts());

    pyss()
        .arg("setup")
        .current_dir(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is internal"))
        .stdout(predicate::str::contains("echo setup").not());
}

#[test]
fn test_invalid_config() {
    let project = create_project("scripts:\n  - name: a\n    command: ls\n");

    pyss()
        .arg("--list")
        .current_dir(project.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("'description' is a required property"));
}

#[test]
fn test_invalid_version_format() {
    let project = create_project("pyss:\n  min_version: asdf\nscripts: []\n");

    pyss()
        .arg("--list")
        .current_dir(project.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "'asdf' is not a valid version format. Expected format: Major.Minor.Patch (e.g., 1.0.0)",
        ));
}

#[test]
fn test_min_version_not_met() {
    let project = create_project("pyss:\n  min_version: 99.0.0\nscripts: []\n");

    pyss()
        .arg("--list")
        .current_dir(project.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "This PySS project requires at least version 99.0.0 of PySS.",
        ))
        .stderr(predicate::str::contains("Current version:"));
}

#[test]
fn test_max_version_exceeded() {
    let project = create_project("pyss:\n  max_version: 0.0.1\nscripts: []\n");

    pyss()
        .arg("--list")
        .current_dir(project.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("is not supported by this PySS project"));
}
