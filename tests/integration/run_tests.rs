//! Script execution tests for pyss.
//!
//! These run real child processes through the default POSIX shell.
#![cfg(unix)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use crate::integration::fixtures::{create_project, create_subdir, standard_scripts};

/// Get a Command for the pyss binary.
fn pyss() -> Command {
    cargo_bin_cmd!("pyss")
}

fn stdout_of(project: &tempfile::TempDir, args: &[&str]) -> String {
    let output = pyss()
        .args(args)
        .current_dir(project.path())
        .output()
        .expect("Failed to run pyss");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ==================== Basic Execution ====================

#[test]
fn test_run_single_command() {
    let project = create_project(&standard_scripts());

    pyss()
        .arg("build")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[pyss] [run script] 'build'"))
        .stdout(predicate::str::contains("[pyss] [default shell] 'echo build'"))
        .stdout(predicate::str::contains("build\n"));
}

#[test]
fn test_exit_code_is_propagated() {
    let project = create_project(
        r#"
scripts:
  - name: fail
    description: Fails
    command: exit 3
"#,
    );

    pyss()
        .arg("fail")
        .current_dir(project.path())
        .assert()
        .code(3);
}

#[test]
fn test_dependencies_run_in_order() {
    let project = create_project(&standard_scripts());

    let stdout = stdout_of(&project, &["-q", "test"]);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["setup", "build", "test"]);
}

#[test]
fn test_commands_run_in_order() {
    let project = create_project(&standard_scripts());

    let stdout = stdout_of(&project, &["-q", "lint"]);
    assert_eq!(stdout, "lint-one\nlint-two\n");
}

#[test]
fn test_failed_command_skips_after() {
    let project = create_project(
        r#"
scripts:
  - name: deploy
    description: Deploy
    command: exit 1
    after: echo should-not-run
"#,
    );

    pyss()
        .arg("deploy")
        .current_dir(project.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("should-not-run").not());
}

#[test]
fn test_failed_before_skips_main() {
    let project = create_project(
        r#"
scripts:
  - name: main
    description: Main
    before:
      - echo first
      - exit 4
      - echo second
    command: echo main
"#,
    );

    let output = pyss()
        .args(["-q", "main"])
        .current_dir(project.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "first\n");
}

// ==================== Output Control ====================

#[test]
fn test_quiet_hides_progress_lines() {
    let project = create_project(&standard_scripts());

    pyss()
        .args(["--quiet", "build"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[pyss]").not())
        .stdout(predicate::str::contains("build"));
}

#[test]
fn test_silent_hides_everything() {
    let project = create_project(&standard_scripts());

    pyss()
        .args(["--silent", "test"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_silent_dependency() {
    let project = create_project(
        r#"
scripts:
  - name: main
    description: Main
    before:
      - { command: echo hidden, silent: true }
      - echo shown
    command: echo main
"#,
    );

    let stdout = stdout_of(&project, &["-q", "main"]);
    assert_eq!(stdout, "shown\nmain\n");
}

// ==================== Environment ====================

#[test]
fn test_env_is_interpolated() {
    let project = create_project(
        r#"
env:
  GREETING: hello
scripts:
  - name: greet
    description: Greet
    env:
      NAME: world
    command: echo ${GREETING} ${NAME}
"#,
    );

    let stdout = stdout_of(&project, &["-q", "greet"]);
    assert_eq!(stdout, "hello world\n");
}

#[test]
fn test_env_reaches_child_process() {
    let project = create_project(
        r#"
scripts:
  - name: show
    description: Show
    env:
      PYSS_TEST_VALUE: 42
    command: echo "$PYSS_TEST_VALUE"
"#,
    );

    let stdout = stdout_of(&project, &["-q", "show"]);
    assert_eq!(stdout, "42\n");
}

#[test]
fn test_dependency_env_is_scoped() {
    let project = create_project(
        r#"
scripts:
  - name: show
    internal: true
    command: echo "[${MSG}]"
  - name: main
    description: Main
    before:
      - { script: show, env: { MSG: scoped } }
      - echo "[${MSG:-unset}]"
    command: "true"
"#,
    );

    let stdout = stdout_of(&project, &["-q", "main"]);
    assert_eq!(stdout, "[scoped]\n[unset]\n");
}

#[test]
fn test_undefined_variable() {
    let project = create_project(
        r#"
scripts:
  - name: broken
    description: Broken
    command: echo ${PYSS_SURELY_UNDEFINED}
"#,
    );

    pyss()
        .arg("broken")
        .current_dir(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Environment variable 'PYSS_SURELY_UNDEFINED' not set.",
        ));
}

// ==================== Working Directory and Shells ====================

#[test]
fn test_runs_in_config_directory() {
    let project = create_project(
        r#"
scripts:
  - name: check
    description: Check
    command: test -f pyss.yaml
"#,
    );
    let nested = create_subdir(&project, "a/b");

    pyss()
        .arg("check")
        .current_dir(&nested)
        .assert()
        .success();
}

#[test]
fn test_platform_command_with_fallback() {
    let project = create_project(
        r#"
scripts:
  - name: which
    description: Which
    command:
      win32: echo windows
      cmd: echo fallback
"#,
    );

    let stdout = stdout_of(&project, &["-q", "which"]);
    assert_eq!(stdout, "fallback\n");
}

#[test]
fn test_os_family_keys() {
    let project = create_project(
        r#"
pyss:
  shell: { nt: cmd, posix: /bin/sh }
scripts:
  - name: which
    description: Which
    command:
      nt: echo windows
      posix: echo posix
"#,
    );

    pyss()
        .arg("which")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[pyss] [/bin/sh] 'echo posix'"))
        .stdout(predicate::str::contains("posix\n"));
}

#[test]
fn test_custom_shell() {
    let project = create_project(
        r#"
pyss:
  shell: /bin/sh
scripts:
  - name: sh
    description: Shell
    command: echo via-sh
"#,
    );

    pyss()
        .arg("sh")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[pyss] [/bin/sh] 'echo via-sh'"))
        .stdout(predicate::str::contains("via-sh\n"));
}

#[test]
fn test_cyclic_dependency() {
    let project = create_project(
        r#"
scripts:
  - name: a
    description: A
    before: b
    command: echo a
  - name: b
    description: B
    before: a
    command: echo b
"#,
    );

    pyss()
        .arg("a")
        .current_dir(project.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cyclic dependency detected: a -> b -> a"));
}

#[test]
fn test_timeout() {
    let project = create_project(
        r#"
pyss:
  timeout: 1
scripts:
  - name: slow
    description: Slow
    command: exec sleep 10
"#,
    );

    pyss()
        .arg("slow")
        .current_dir(project.path())
        .timeout(std::time::Duration::from_secs(8))
        .assert()
        .code(124)
        .stderr(predicate::str::contains("timed out"));
}

#[test]
fn test_dry_run_spawns_nothing() {
    let project = create_project(
        r#"
scripts:
  - name: touch
    description: Touch
    command: touch created.txt
"#,
    );

    pyss()
        .args(["--dry-run", "touch"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Would run: /bin/sh -c 'touch created.txt'"));

    assert!(!project.path().join("created.txt").exists());
}
