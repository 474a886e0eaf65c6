//! Integration tests for Settings config loading.
//!
//! These tests run without a global config (temp directories only),
//! so they effectively test local config merging with defaults.

use std::fs;

use tempfile::TempDir;

use navtree::config::{local_config_path, Settings};

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "strict_deferred = true\nindent = 4\nmax_depth = 2\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(dir.path())).unwrap();

    // Assert
    assert!(settings.strict_deferred);
    assert_eq!(settings.indent, 4);
    assert_eq!(settings.max_depth, Some(2));
    assert_eq!(settings.tree_variable, "NAVTREE");
    assert!(settings.resolve_deferred);
}

#[test]
fn given_directory_without_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "indent = [not toml").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().starts_with("config error: parse"), "{}", err);
}

#[test]
fn given_empty_variable_name_in_config_when_load_then_rejected() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "index_variable = \"\"\n").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert!(err.to_string().contains("index_variable"), "{}", err);
}
