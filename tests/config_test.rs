// tests/config_test.rs
use git_verinfo::config::{load_config, Config, CONFIG_FILE_NAME};
use git_verinfo::git::Traversal;
use git_verinfo::VerinfoError;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.version_tag_format, "v0.0.0");
    assert_eq!(config.repository_directory, PathBuf::from("."));
    assert_eq!(config.template_file, None);
    assert_eq!(config.output_file, None);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
template_file = "version.h.in"
output_file = "version.h"
version_tag_format = "V0.0.0.0"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.template_file, Some(PathBuf::from("version.h.in")));
    assert_eq!(config.output_file, Some(PathBuf::from("version.h")));
    assert_eq!(config.version_tag_format, "V0.0.0.0");
    assert_eq!(config.traversal.traversal(), Traversal::FullAncestry);
}

#[test]
#[serial]
fn test_traversal_config_from_fixture() {
    let config = load_config(Some("tests/fixtures/config_first_parent.toml"))
        .expect("Failed to load test config");
    assert_eq!(config.repository_directory, PathBuf::from("../app"));
    assert_eq!(config.version_tag_format, "release-0.0");
    assert!(config.traversal.first_parent);
    assert_eq!(config.traversal.traversal(), Traversal::FirstParent);
}

#[test]
#[serial]
fn test_empty_format_in_file_is_rejected() {
    let err = load_config(Some("tests/fixtures/config_empty_format.toml")).unwrap_err();
    assert!(matches!(err, VerinfoError::Config(_)));
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"version_tag_format = [").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(matches!(err, VerinfoError::Config(_)));
}

#[test]
fn test_missing_explicit_file_is_config_error() {
    let err = load_config(Some("tests/fixtures/does-not-exist.toml")).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
#[serial]
fn test_config_file_in_current_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "version_tag_format = \"build-0\"\n",
    )
    .unwrap();

    let original_dir = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).expect("Could not change to temp dir");
    let config = load_config(None);
    env::set_current_dir(original_dir).unwrap();

    assert_eq!(config.unwrap().version_tag_format, "build-0");
}
