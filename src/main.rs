//! distbuild - Distribution build orchestrator for web library packages
//!
//! Main entry point for the CLI.
//!
//! # Overview
//!
//! This binary drives the fixed build sequence for a web library
//! distribution. It initializes:
//! - Logging infrastructure (file rotation + console output)
//! - Tokio async runtime (subprocess execution, spinner task)
//! - State management ([`StateManager`])
//! - The build manifest ([`ConfigManager`] - `distbuild.yaml`, optional)
//! - The build pipeline ([`BuildPipeline`])
//!
//! # Execution Flow
//!
//! 1. Load `distbuild.yaml` (defaults if absent)
//! 2. Initialize logging -> logs/distbuild.<date>.log
//! 3. Create tokio runtime
//! 4. Run the pipeline: Clear -> Compile -> Clear -> Copy Assets -> Clear -> Done
//! 5. Log the metrics summary and shut the runtime down
//! 6. Exit 0 only if every step succeeded
//!
//! # CLI surface
//!
//! None. No arguments, flags, or environment variables are read; all
//! behavior comes from the manifest and its defaults.

use anyhow::Result;
use camino::Utf8PathBuf;
use distbuild::metrics::Metrics;
use distbuild::{APP_NAME, BuildPipeline, ConfigManager, StateManager, VERSION};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    // Load the manifest first: its debug flag decides the log level.
    // Tracing emitted before the subscriber is installed is dropped.
    let config_manager = ConfigManager::new(Utf8PathBuf::from("."));
    let config = config_manager.load()?;

    let log_guard = distbuild::logging::setup_logging(
        "logs",
        "distbuild",
        config.build_settings.debug_mode,
        true,
    )?;

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);
    tracing::info!("Manifest: {}", config_manager.manifest_path());

    // Create tokio runtime for subprocess execution and the spinner task
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(2)
        .thread_name("distbuild-worker")
        .build()?;

    // State and metrics shared between the pipeline and the summary
    let state_manager = Arc::new(StateManager::new());
    state_manager.load_from_config(&config);

    let metrics = Arc::new(Metrics::new());

    let pipeline = BuildPipeline::new(
        config.build_settings.clone(),
        state_manager.clone(),
        metrics.clone(),
    );

    let report = runtime.block_on(pipeline.run())?;

    metrics.log_summary();
    runtime.shutdown_timeout(Duration::from_secs(5));

    if !report.is_success() {
        for failure in report.failures() {
            eprintln!("error: step {} failed: {}", failure.step, failure.message);
        }
        // Flush the file appender before the early exit skips destructors
        drop(log_guard);
        std::process::exit(report.exit_code());
    }

    Ok(())
}
