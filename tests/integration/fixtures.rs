//! Test fixtures for creating temporary projects.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Create a temporary project whose `pyss.yaml` holds `yaml`.
pub fn create_project(yaml: &str) -> TempDir {
    create_project_with_file("pyss.yaml", yaml)
}

/// Create a temporary project with the scripts file under a custom name.
pub fn create_project_with_file(file_name: &str, yaml: &str) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    fs::write(temp.path().join(file_name), yaml).expect("Failed to write scripts file");
    temp
}

/// Create a temporary directory without any scripts file.
pub fn create_empty_project() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Create a nested directory inside `project` and return its path.
pub fn create_subdir(project: &TempDir, name: &str) -> PathBuf {
    let path = project.path().join(name);
    fs::create_dir_all(&path).expect("Failed to create subdirectory");
    path
}

/// Build a `scripts:` document from `(name, description, command)` triples.
pub fn simple_scripts(scripts: &[(&str, &str, &str)]) -> String {
    let mut yaml = String::from("scripts:\n");
    for (name, description, command) in scripts {
        yaml.push_str(&format!(
            "  - name: {name}\n    description: {description}\n    command: {}\n",
            quote(command)
        ));
    }
    yaml
}

/// A small project: build, test (depending on build) and an internal setup.
pub fn standard_scripts() -> String {
    r#"
scripts:
  - name: setup
    internal: true
    command: echo setup
  - name: build
    description: Build the project
    before: setup
    command: echo build
  - name: test
    description: Run the tests
    before: build
    command: echo test
  - name: lint
    description: Check style
    commands:
      - echo lint-one
      - echo lint-two
"#
    .to_string()
}

fn quote(command: &str) -> String {
    format!("'{}'", command.replace('\'', "''"))
}
