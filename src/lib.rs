// distbuild - Distribution build orchestrator for web library packages
//
// This is the library crate containing the build services and data structures.
// The binary crate (main.rs) provides the CLI entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{BuildConfig, BuildSettings, BuildState};
pub use pipeline::{BuildPipeline, BuildReport, StepStatus};
pub use state::{StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
