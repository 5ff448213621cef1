use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::models::BuildSettings;

/// Result of staging assets into the output directory
#[derive(Debug, Clone, Default)]
pub struct CopyReport {
    pub files_copied: usize,
    pub duration: Duration,
}

impl CopyReport {
    /// Get a summary string of what was staged
    pub fn summary(&self) -> String {
        format!(
            "{} files in {:.2}s",
            self.files_copied,
            self.duration.as_secs_f32()
        )
    }
}

/// Errors that can occur while staging assets
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset source not found: {0}")]
    SourceMissing(Utf8PathBuf),

    #[error("Destination already exists: {0}")]
    DestinationExists(Utf8PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Service for staging distribution assets
///
/// Stages the CSS source tree, the project readme, and any configured extra
/// assets into the build output directory. Stale outputs from a previous
/// run are deleted first so reruns never trip over an existing destination.
///
/// Deletion of stale outputs tolerates "not found" (a first run has nothing
/// to delete); any other deletion error, such as permission denied, is
/// surfaced and fails the step.
pub struct AssetService;

impl AssetService {
    pub fn new() -> Self {
        Self
    }

    /// Delete stale outputs from a previous run
    ///
    /// Removes `<output>/<readme name>` and `<output>/css` if present.
    ///
    /// # Arguments
    /// * `output_dir` - The build output directory
    /// * `readme_name` - File name of the staged readme (e.g. "README.md")
    pub fn clean_stale(&self, output_dir: &Utf8Path, readme_name: &str) -> Result<()> {
        let stale_readme = output_dir.join(readme_name);
        ignore_not_found(fs::remove_file(&stale_readme))
            .with_context(|| format!("Failed to remove stale readme: {}", stale_readme))?;

        let stale_css = output_dir.join("css");
        ignore_not_found(fs::remove_dir_all(&stale_css))
            .with_context(|| format!("Failed to remove stale css tree: {}", stale_css))?;

        tracing::debug!("Cleaned stale outputs under {}", output_dir);
        Ok(())
    }

    /// Recursively copy a directory tree
    ///
    /// The source must exist and the destination must not: the clean-slate
    /// deletion in [`clean_stale`](Self::clean_stale) is what makes reruns
    /// work. Intermediate directories of the destination are created.
    ///
    /// # Returns
    /// The number of files copied
    pub fn copy_tree(&self, source: &Utf8Path, dest: &Utf8Path) -> Result<usize, AssetError> {
        if !source.is_dir() {
            return Err(AssetError::SourceMissing(source.to_path_buf()));
        }
        if dest.exists() {
            return Err(AssetError::DestinationExists(dest.to_path_buf()));
        }

        let copied = copy_dir_recursive(source, dest)?;
        tracing::debug!("Copied {} files from {} to {}", copied, source, dest);
        Ok(copied)
    }

    /// Copy a single file into the output directory, keeping its file name
    pub fn copy_file_into(
        &self,
        source: &Utf8Path,
        output_dir: &Utf8Path,
    ) -> Result<Utf8PathBuf, AssetError> {
        if !source.is_file() {
            return Err(AssetError::SourceMissing(source.to_path_buf()));
        }

        let file_name = source
            .file_name()
            .ok_or_else(|| AssetError::SourceMissing(source.to_path_buf()))?;
        let dest = output_dir.join(file_name);

        fs::create_dir_all(output_dir)?;
        fs::copy(source, &dest)?;
        Ok(dest)
    }

    /// Stage all distribution assets into the output directory
    ///
    /// Clean-slate deletes stale outputs, then copies the CSS tree, the
    /// readme, and any configured extra assets (in manifest order).
    pub fn stage(&self, settings: &BuildSettings) -> Result<CopyReport> {
        let start = Instant::now();

        let output_dir = Utf8Path::new(&settings.output_dir);
        let css_source = Utf8Path::new(&settings.css_source);
        let readme = Utf8Path::new(&settings.readme);
        let readme_name = readme.file_name().unwrap_or("README.md");

        self.clean_stale(output_dir, readme_name)?;

        let mut files_copied = 0;

        let css_dest = output_dir.join("css");
        files_copied += self
            .copy_tree(css_source, &css_dest)
            .with_context(|| format!("Failed to copy css tree: {}", css_source))?;

        self.copy_file_into(readme, output_dir)
            .with_context(|| format!("Failed to copy readme: {}", readme))?;
        files_copied += 1;

        for (extra_source, extra_dest) in &settings.extra_assets {
            files_copied += self
                .copy_extra(Utf8Path::new(extra_source), Utf8Path::new(extra_dest))
                .with_context(|| format!("Failed to copy extra asset: {}", extra_source))?;
        }

        let report = CopyReport {
            files_copied,
            duration: start.elapsed(),
        };

        tracing::info!("Staged assets: {}", report.summary());
        Ok(report)
    }

    /// Copy one extra asset, file or directory tree
    fn copy_extra(&self, source: &Utf8Path, dest: &Utf8Path) -> Result<usize, AssetError> {
        if source.is_dir() {
            // Extra trees are cleaned in place so reruns stay idempotent
            ignore_not_found(fs::remove_dir_all(dest))?;
            self.copy_tree(source, dest)
        } else if source.is_file() {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(source, dest)?;
            Ok(1)
        } else {
            Err(AssetError::SourceMissing(source.to_path_buf()))
        }
    }
}

impl Default for AssetService {
    fn default() -> Self {
        Self::new()
    }
}

/// Treat NotFound as success, pass everything else through
fn ignore_not_found(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

fn copy_dir_recursive(source: &Utf8Path, dest: &Utf8Path) -> io::Result<usize> {
    fs::create_dir_all(dest)?;

    let mut copied = 0;
    for entry in source.read_dir_utf8()? {
        let entry = entry?;
        let target = dest.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copied += copy_dir_recursive(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}
