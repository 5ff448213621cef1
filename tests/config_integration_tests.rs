//! Integration tests for ConfigManager and the build manifest
//!
//! These tests verify:
//! - Defaults when the manifest is absent
//! - Save/load roundtrips
//! - Partial manifests falling back per field
//! - Error reporting on malformed YAML

use camino::Utf8PathBuf;
use distbuild::{BuildConfig, ConfigManager};
use std::fs;
use tempfile::TempDir;

fn manager_in(temp: &TempDir) -> ConfigManager {
    let dir = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap();
    ConfigManager::new(dir)
}

#[test]
fn test_defaults_match_conventional_layout() {
    let temp = TempDir::new().unwrap();
    let manager = manager_in(&temp);

    let config = manager.load().unwrap();
    let settings = &config.build_settings;

    assert_eq!(settings.compiler, "tsc");
    assert_eq!(settings.css_source, "./src/css");
    assert_eq!(settings.readme, "./README.md");
    assert_eq!(settings.output_dir, "./build");
    assert_eq!(settings.compile_timeout, 300);
    assert!(settings.clear_screen);
    assert!(!settings.debug_mode);
    assert!(settings.extra_assets.is_empty());
}

#[test]
fn test_manifest_roundtrip() {
    let temp = TempDir::new().unwrap();
    let manager = manager_in(&temp);

    let mut config = BuildConfig::default();
    config.build_settings.project_name = "motion-router".to_string();
    config.build_settings.compiler = "npx tsc".to_string();
    config.build_settings.clear_screen = false;
    config
        .build_settings
        .extra_assets
        .insert("./LICENSE".to_string(), "./build/LICENSE".to_string());

    manager.save(&config).unwrap();
    assert!(manager.manifest_path().exists());

    let loaded = manager.load().unwrap();
    assert_eq!(loaded.build_settings.project_name, "motion-router");
    assert_eq!(loaded.build_settings.compiler, "npx tsc");
    assert!(!loaded.build_settings.clear_screen);
    assert_eq!(
        loaded.build_settings.extra_assets.get("./LICENSE"),
        Some(&"./build/LICENSE".to_string())
    );
}

#[test]
fn test_partial_manifest_fills_defaults() {
    let temp = TempDir::new().unwrap();
    let manager = manager_in(&temp);

    fs::write(
        manager.manifest_path(),
        "Build_Settings:\n  Project Name: widgets\n  Compile Timeout: 30\n",
    )
    .unwrap();

    let config = manager.load().unwrap();
    assert_eq!(config.build_settings.project_name, "widgets");
    assert_eq!(config.build_settings.compile_timeout, 30);
    // Everything unspecified falls back
    assert_eq!(config.build_settings.compiler, "tsc");
    assert_eq!(config.build_settings.output_dir, "./build");
}

#[test]
fn test_empty_manifest_uses_all_defaults() {
    let temp = TempDir::new().unwrap();
    let manager = manager_in(&temp);

    fs::write(manager.manifest_path(), "Build_Settings: {}\n").unwrap();

    let config = manager.load().unwrap();
    assert_eq!(config.build_settings.compiler, "tsc");
}

#[test]
fn test_malformed_manifest_is_an_error() {
    let temp = TempDir::new().unwrap();
    let manager = manager_in(&temp);

    fs::write(manager.manifest_path(), "Build_Settings: [this, is, wrong]").unwrap();

    let err = manager.load().unwrap_err();
    assert!(err.to_string().contains("Failed to parse manifest"));
}

#[test]
fn test_css_destination_derived_from_output_dir() {
    let config = BuildConfig::default();
    assert_eq!(config.css_destination(), "./build/css");
}
