//! Command dispatch over the generated DeWAFF scripts

use std::path::Path;

use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use navtree::application::export::to_json_pretty;
use navtree::application::ApplicationError;
use navtree::cli::commands::{effective_settings, execute_command, index_chunk, load};
use navtree::cli::{Cli, CliError};
use navtree::domain::DomainError;
use navtree::exitcode;
use navtree::util::testing::init_test_setup;

const FIXTURE: &str = "tests/resources/dewaff/navtreedata.js";

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("navtree").chain(args.iter().copied())).unwrap()
}

#[rstest]
#[case(&["tree", FIXTURE])]
#[case(&["flat", FIXTURE, "--max-depth", "1"])]
#[case(&["find", FIXTURE, "annotated.html"])]
#[case(&["index", FIXTURE])]
#[case(&["index", FIXTURE, "--page", "annotated.html"])]
#[case(&["html", FIXTURE])]
#[case(&["export", FIXTURE])]
#[case(&["--no-resolve", "tree", FIXTURE])]
fn given_fixture_when_executing_command_then_succeeds(#[case] args: &[&str]) {
    init_test_setup();

    let result = execute_command(&cli(args));

    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn given_unknown_target_when_find_then_not_found_with_dataerr() {
    // Act
    let err = execute_command(&cli(&["find", FIXTURE, "nowhere.html"])).unwrap_err();

    // Assert
    assert!(matches!(err, CliError::NotFound(ref target) if target == "nowhere.html"));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_page_before_first_entry_when_index_then_no_chunk_with_dataerr() {
    let err = execute_command(&cli(&["index", FIXTURE, "--page", "A.html"])).unwrap_err();

    assert!(matches!(err, CliError::NoChunk(ref page) if page == "A.html"));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_page_after_first_entry_when_index_chunk_then_names_chunk_script() {
    // Arrange
    let settings = effective_settings(&cli(&["index", FIXTURE]), None).unwrap();
    let document = load(Path::new(FIXTURE), &settings).unwrap();

    // Act
    let (chunk, script) = index_chunk(&document.index, "annotated.html").unwrap();

    // Assert
    assert_eq!(chunk, 0);
    assert_eq!(script, "navtreeindex0.js");
}

#[test]
fn given_no_resolve_and_strict_flags_when_effective_settings_then_flags_override() {
    let settings = effective_settings(&cli(&["--no-resolve", "--strict", "tree", FIXTURE]), None)
        .unwrap();

    assert!(!settings.resolve_deferred);
    assert!(settings.strict_deferred);
}

#[test]
fn given_strict_flag_when_child_script_missing_then_dataerr() {
    let err = execute_command(&cli(&["--strict", "tree", FIXTURE])).unwrap_err();

    assert!(matches!(
        err,
        CliError::Application(ApplicationError::Domain(DomainError::MissingScript(_)))
    ));
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_strict_flag_without_resolution_when_tree_then_succeeds() {
    let result = execute_command(&cli(&["--no-resolve", "--strict", "tree", FIXTURE]));

    assert!(result.is_ok(), "{:?}", result);
}

#[test]
fn given_missing_input_when_tree_then_noinput() {
    let err = execute_command(&cli(&["tree", "tests/resources/none/navtreedata.js"])).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_exported_document_when_reloaded_then_tree_and_index_match() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let exported = temp.path().join("navtree.json");
    let settings = effective_settings(&cli(&["export", FIXTURE]), None).unwrap();
    let document = load(Path::new(FIXTURE), &settings).unwrap();
    std::fs::write(&exported, to_json_pretty(&document)).unwrap();
    let exported_arg = exported.to_string_lossy().to_string();

    // Act
    let result = execute_command(&cli(&["tree", &exported_arg]));
    let reloaded = load(&exported, &settings).unwrap();

    // Assert
    assert!(result.is_ok(), "{:?}", result);
    assert_eq!(reloaded.tree, document.tree);
    assert_eq!(reloaded.index, document.index);
}
