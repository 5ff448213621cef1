//! Integration tests for the build services
//!
//! These tests verify:
//! - Compiler subprocess execution and exit-code tagging
//! - Diagnostics counting from compiler output
//! - Clean-slate deletion semantics
//! - Copy failure modes (missing source, pre-existing destination)

use camino::Utf8PathBuf;
use distbuild::services::{AssetError, AssetService, CompileService, CompileStatus};
use distbuild::BuildSettings;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn utf8_root(temp: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).unwrap()
}

#[tokio::test]
async fn test_compile_success_is_tagged() {
    let service = CompileService::new();

    let outcome = service
        .run("echo building", Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(outcome.status, CompileStatus::Succeeded);
    assert_eq!(outcome.exit_code, Some(0));
    assert!(!outcome.diagnostics.has_diagnostics());
}

#[tokio::test]
async fn test_compile_failure_is_tagged() {
    let service = CompileService::new();

    let outcome = service.run("exit 1", Duration::from_secs(10)).await.unwrap();

    assert_eq!(outcome.status, CompileStatus::Failed);
    assert_eq!(outcome.exit_code, Some(1));
}

#[tokio::test]
async fn test_compile_missing_binary_surfaces_as_failure() {
    let service = CompileService::new();

    // The shell resolves the command; a missing binary becomes a non-zero
    // exit code instead of a swallowed error
    let outcome = service
        .run("no-such-compiler-on-this-host", Duration::from_secs(10))
        .await
        .unwrap();

    assert_eq!(outcome.status, CompileStatus::Failed);
}

#[tokio::test]
async fn test_compile_diagnostics_from_output() {
    let service = CompileService::new();

    let outcome = service
        .run(
            "echo 'src/a.ts(1,1): error TS2304: Cannot find name.'; exit 2",
            Duration::from_secs(10),
        )
        .await
        .unwrap();

    assert_eq!(outcome.status, CompileStatus::Failed);
    assert_eq!(outcome.diagnostics.errors, 1);
}

#[test]
fn test_compile_command_rejects_blank_configuration() {
    let service = CompileService::new();
    let mut settings = BuildSettings::default();
    settings.compiler = String::new();

    assert!(service.compile_command(&settings).is_err());
}

#[test]
fn test_clean_stale_then_copy_is_rerunnable() {
    let temp = TempDir::new().unwrap();
    let root = utf8_root(&temp);
    fs::create_dir_all(root.join("src/css")).unwrap();
    fs::write(root.join("src/css/a.css"), ".a {}").unwrap();

    let service = AssetService::new();
    let out = root.join("build");

    // First copy into a fresh tree
    service.clean_stale(&out, "README.md").unwrap();
    service.copy_tree(&root.join("src/css"), &out.join("css")).unwrap();

    // Second round only works because clean_stale removed the first copy
    service.clean_stale(&out, "README.md").unwrap();
    let copied = service
        .copy_tree(&root.join("src/css"), &out.join("css"))
        .unwrap();

    assert_eq!(copied, 1);
}

#[test]
fn test_copy_tree_without_clean_slate_fails_loudly() {
    let temp = TempDir::new().unwrap();
    let root = utf8_root(&temp);
    fs::create_dir_all(root.join("src/css")).unwrap();
    fs::create_dir_all(root.join("build/css")).unwrap();

    let service = AssetService::new();
    let err = service
        .copy_tree(&root.join("src/css"), &root.join("build/css"))
        .unwrap_err();

    assert!(matches!(err, AssetError::DestinationExists(_)));
}

#[test]
fn test_missing_css_source_fails_loudly() {
    let temp = TempDir::new().unwrap();
    let root = utf8_root(&temp);
    fs::write(root.join("README.md"), "# readme").unwrap();

    let mut settings = BuildSettings::default();
    settings.css_source = root.join("src/css").to_string();
    settings.readme = root.join("README.md").to_string();
    settings.output_dir = root.join("build").to_string();

    let service = AssetService::new();
    let err = service.stage(&settings).unwrap_err();

    assert!(err.to_string().contains("Failed to copy css tree"));
}

#[test]
fn test_staged_files_are_byte_identical() {
    let temp = TempDir::new().unwrap();
    let root = utf8_root(&temp);
    fs::create_dir_all(root.join("src/css")).unwrap();
    fs::write(root.join("src/css/a.css"), "a::before { content: '\u{2728}'; }").unwrap();
    fs::write(root.join("README.md"), "# Motion Router\n\nDocs.\n").unwrap();

    let mut settings = BuildSettings::default();
    settings.css_source = root.join("src/css").to_string();
    settings.readme = root.join("README.md").to_string();
    settings.output_dir = root.join("build").to_string();

    let service = AssetService::new();
    service.stage(&settings).unwrap();

    assert_eq!(
        fs::read(root.join("src/css/a.css")).unwrap(),
        fs::read(root.join("build/css/a.css")).unwrap()
    );
    assert_eq!(
        fs::read(root.join("README.md")).unwrap(),
        fs::read(root.join("build/README.md")).unwrap()
    );
}
