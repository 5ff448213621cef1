use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Build manifest loaded from distbuild.yaml
///
/// Contains the build settings: compiler command, asset paths, and the
/// output directory. Every field has a default, so a missing manifest
/// behaves exactly like a fully-defaulted one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(rename = "Build_Settings", default)]
    pub build_settings: BuildSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSettings {
    /// Display name used in the compile banner
    #[serde(rename = "Project Name", default = "default_project_name")]
    pub project_name: String,

    /// Compiler command, run through the platform shell with no extra
    /// arguments. The compiler discovers its own project configuration.
    #[serde(rename = "Compiler", default = "default_compiler")]
    pub compiler: String,

    #[serde(rename = "Compile Timeout", default = "default_compile_timeout")]
    pub compile_timeout: u32,

    #[serde(rename = "Css Source", default = "default_css_source")]
    pub css_source: String,

    #[serde(rename = "Readme", default = "default_readme")]
    pub readme: String,

    #[serde(rename = "Output Dir", default = "default_output_dir")]
    pub output_dir: String,

    #[serde(rename = "Clear Screen", default = "default_clear_screen")]
    pub clear_screen: bool,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,

    /// Additional source -> destination copies staged after the CSS tree
    /// and readme. Insertion order is preserved.
    #[serde(rename = "Extra Assets", default)]
    pub extra_assets: IndexMap<String, String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            project_name: default_project_name(),
            compiler: default_compiler(),
            compile_timeout: default_compile_timeout(),
            css_source: default_css_source(),
            readme: default_readme(),
            output_dir: default_output_dir(),
            clear_screen: default_clear_screen(),
            debug_mode: false,
            extra_assets: IndexMap::new(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            build_settings: BuildSettings::default(),
        }
    }
}

fn default_project_name() -> String {
    "library".to_string()
}

fn default_compiler() -> String {
    "tsc".to_string()
}

fn default_compile_timeout() -> u32 {
    300
}

fn default_css_source() -> String {
    "./src/css".to_string()
}

fn default_readme() -> String {
    "./README.md".to_string()
}

fn default_output_dir() -> String {
    "./build".to_string()
}

fn default_clear_screen() -> bool {
    true
}

impl BuildConfig {
    /// Destination of the copied CSS tree inside the output directory
    pub fn css_destination(&self) -> String {
        format!("{}/css", self.build_settings.output_dir.trim_end_matches('/'))
    }
}
