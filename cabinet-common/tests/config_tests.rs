//! Integration tests for configuration loading and folder resolution
//!
//! Tests cover:
//! - Config file priority: CLI argument > CABINET_CONFIG > platform file > defaults
//! - Data folder priority: CLI argument > CABINET_DATA_FOLDER > TOML > OS default
//! - Sheet location selection and the missing-source error
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate CABINET_CONFIG or CABINET_DATA_FOLDER are marked
//! with #[serial] so they run sequentially.

use cabinet_common::config::{
    get_default_data_folder, CabinetConfig, CONFIG_ENV_VAR, DATA_FOLDER_ENV_VAR,
};
use cabinet_common::source::CsvSource;
use cabinet_common::Error;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_config(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_load_from_cli_path() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "cli.toml", "course_id = \"from_cli\"\n");

    let config = CabinetConfig::load(Some(&path)).unwrap();
    assert_eq!(config.course_id, "from_cli");
}

#[test]
#[serial]
fn test_cli_path_takes_precedence_over_env() {
    let dir = TempDir::new().unwrap();
    let cli = write_config(&dir, "cli.toml", "course_id = \"from_cli\"\n");
    let from_env = write_config(&dir, "env.toml", "course_id = \"from_env\"\n");
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = CabinetConfig::load(Some(&cli)).unwrap();
    assert_eq!(config.course_id, "from_cli");

    // Cleanup
    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_load_from_env_var() {
    let dir = TempDir::new().unwrap();
    let from_env = write_config(
        &dir,
        "env.toml",
        "course_id = \"from_env\"\nuse_sample_data = false\nsheet_csv_url = \"https://x.example/s.csv\"\n",
    );
    env::set_var(CONFIG_ENV_VAR, &from_env);

    let config = CabinetConfig::load(None).unwrap();
    assert_eq!(config.course_id, "from_env");
    assert!(!config.use_sample_data);

    // Cleanup
    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_explicit_missing_file_is_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let result = CabinetConfig::load(Some(Path::new("/nonexistent/cabinet/config.toml")));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_data_folder_env_over_toml() {
    env::set_var(DATA_FOLDER_ENV_VAR, "/tmp/cabinet-env-folder");
    let config = CabinetConfig {
        data_folder: Some(PathBuf::from("/tmp/cabinet-toml-folder")),
        ..Default::default()
    };

    assert_eq!(
        config.resolve_data_folder(None),
        PathBuf::from("/tmp/cabinet-env-folder")
    );

    // Cleanup
    env::remove_var(DATA_FOLDER_ENV_VAR);
}

#[test]
#[serial]
fn test_data_folder_toml_then_default() {
    env::remove_var(DATA_FOLDER_ENV_VAR);

    let config = CabinetConfig {
        data_folder: Some(PathBuf::from("/tmp/cabinet-toml-folder")),
        ..Default::default()
    };
    assert_eq!(
        config.resolve_data_folder(None),
        PathBuf::from("/tmp/cabinet-toml-folder")
    );

    let config = CabinetConfig::default();
    assert_eq!(config.resolve_data_folder(None), get_default_data_folder());
}

#[test]
fn test_sample_mode_selects_local_file() {
    let config = CabinetConfig::from_toml_str(
        "use_sample_data = true\nsample_csv_path = \"demo/sheet.csv\"\n",
    )
    .unwrap();
    assert_eq!(
        config.csv_source().unwrap(),
        CsvSource::File(PathBuf::from("demo/sheet.csv"))
    );
}

#[test]
fn test_sheet_mode_without_url_is_source_unavailable() {
    let config = CabinetConfig::from_toml_str("use_sample_data = false\n").unwrap();
    assert!(matches!(config.csv_source(), Err(Error::SourceUnavailable)));
}
