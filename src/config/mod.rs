use crate::models::BuildConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the build manifest
pub const MANIFEST_NAME: &str = "distbuild.yaml";

/// Configuration manager for loading and saving the build manifest.
///
/// The manifest (`distbuild.yaml`) lives in the project directory and is
/// entirely optional: a missing manifest yields the full defaults, which
/// reproduce the conventional layout (`./src/css`, `./README.md`,
/// `./build`, `tsc`).
#[derive(Debug, Clone)]
pub struct ConfigManager {
    project_dir: Utf8PathBuf,
    manifest_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for the given project directory.
    ///
    /// # Arguments
    /// * `project_dir` - Directory containing the project (usually ".")
    pub fn new<P: AsRef<Utf8Path>>(project_dir: P) -> Self {
        let project_dir = project_dir.as_ref().to_path_buf();
        Self {
            manifest_path: project_dir.join(MANIFEST_NAME),
            project_dir,
        }
    }

    /// The project directory this manager resolves paths against
    pub fn project_dir(&self) -> &Utf8Path {
        &self.project_dir
    }

    /// Path of the build manifest, whether or not it exists
    pub fn manifest_path(&self) -> &Utf8Path {
        &self.manifest_path
    }

    /// Load the build manifest.
    ///
    /// # Returns
    /// The loaded BuildConfig, or the defaults if the file doesn't exist
    pub fn load(&self) -> Result<BuildConfig> {
        if !self.manifest_path.exists() {
            tracing::debug!(
                "Manifest not found at {}, using defaults",
                self.manifest_path
            );
            return Ok(BuildConfig::default());
        }

        let file_contents = fs::read_to_string(&self.manifest_path)
            .with_context(|| format!("Failed to read manifest: {}", self.manifest_path))?;

        let config: BuildConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse manifest: {}", self.manifest_path))?;

        tracing::info!("Loaded manifest from {}", self.manifest_path);
        Ok(config)
    }

    /// Save the build manifest.
    ///
    /// # Arguments
    /// * `config` - The BuildConfig to save
    pub fn save(&self, config: &BuildConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize manifest to YAML")?;

        fs::write(&self.manifest_path, yaml_string)
            .with_context(|| format!("Failed to write manifest: {}", self.manifest_path))?;

        tracing::info!("Saved manifest to {}", self.manifest_path);
        Ok(())
    }
}
