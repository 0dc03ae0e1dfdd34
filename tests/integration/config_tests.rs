//! Integration tests for config discovery and loading.

use pyss::config::load_config;
use pyss::error::PyssError;
use pyss::scripts::list_scripts;

use crate::integration::fixtures::{
    create_empty_project, create_project, create_project_with_file, create_subdir,
    simple_scripts, standard_scripts,
};

// ==================== Discovery ====================

#[test]
fn test_load_from_project_root() {
    let project = create_project(&standard_scripts());

    let table = load_config(None, project.path()).unwrap();
    assert_eq!(table.len(), 4);
    assert_eq!(table.document().file_name(), "pyss.yaml");
}

#[test]
fn test_load_from_nested_directory() {
    let project = create_project(&standard_scripts());
    let nested = create_subdir(&project, "src/deep/er");

    let table = load_config(None, &nested).unwrap();
    assert_eq!(
        table.document().working_dir(),
        project.path().canonicalize().unwrap()
    );
}

#[test]
fn test_yml_extension() {
    let project = create_project_with_file(
        "pyss.yml",
        &simple_scripts(&[("hello", "Say hello", "echo hello")]),
    );

    let table = load_config(None, project.path()).unwrap();
    assert!(table.contains("hello"));
}

#[test]
fn test_explicit_path_skips_discovery() {
    let project = create_project_with_file(
        "custom.yaml",
        &simple_scripts(&[("only", "Only script", "true")]),
    );

    let path = project.path().join("custom.yaml");
    let table = load_config(Some(&path), project.path()).unwrap();
    assert!(table.contains("only"));
    assert_eq!(table.document().working_dir(), project.path());
}

#[test]
fn test_missing_config_is_no_config_error() {
    let project = create_empty_project();

    let err = load_config(None, project.path()).unwrap_err();
    let pyss_err = err.downcast_ref::<PyssError>().unwrap();
    assert!(matches!(pyss_err, PyssError::NoConfigFile { .. }));
    assert_eq!(pyss_err.exit_code(), 2);
}

// ==================== Listing ====================

#[test]
fn test_list_scripts_in_file_order() {
    let project = create_project(&standard_scripts());
    let table = load_config(None, project.path()).unwrap();

    assert_eq!(
        list_scripts(&table),
        vec![
            ("build", "Build the project"),
            ("test", "Run the tests"),
            ("lint", "Check style"),
        ]
    );
}

// ==================== Validation Errors ====================

#[test]
fn test_duplicate_names_rejected() {
    let project = create_project(&simple_scripts(&[
        ("a", "first", "true"),
        ("a", "second", "false"),
    ]));

    let err = load_config(None, project.path()).unwrap_err();
    let pyss_err = err.downcast_ref::<PyssError>().unwrap();
    assert!(matches!(pyss_err, PyssError::InvalidConfig { .. }));
    assert!(pyss_err.to_string().contains("duplicate script name 'a'"));
}

#[test]
fn test_scripts_must_be_a_list() {
    let project = create_project("scripts: not a list\n");

    let err = load_config(None, project.path()).unwrap_err();
    let pyss_err = err.downcast_ref::<PyssError>().unwrap();
    assert_eq!(pyss_err.exit_code(), 3);
}
