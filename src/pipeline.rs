// Build pipeline
//
// The fixed build sequence, with screen clears between steps for UI
// cleanliness only:
//
//     Clear -> Compile -> Clear -> Copy Assets -> Clear -> "Done!"
//
// Neither functional step depends on the other's output, and a failed
// compile does not short-circuit asset staging. Each fallible step returns
// a tagged outcome that the pipeline records and the caller turns into the
// process exit code.

use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::metrics::Metrics;
use crate::models::{BuildSettings, StepKind};
use crate::services::{AssetService, CompileService};
use crate::state::{StateChange, StateManager};
use crate::ui::{Spinner, clear_screen};

/// Status of a single build step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    Failed,
}

/// Tagged outcome of a single build step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub step: StepKind,
    pub status: StepStatus,
    pub message: String,
    pub duration: Duration,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        self.status == StepStatus::Succeeded
    }
}

/// Complete result of a build run
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub compile: StepOutcome,
    pub assets: StepOutcome,
    pub duration: Duration,
}

impl BuildReport {
    /// True only when every step succeeded
    pub fn is_success(&self) -> bool {
        self.compile.is_success() && self.assets.is_success()
    }

    /// Process exit code for this report
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    /// Outcomes of the failed steps, if any
    pub fn failures(&self) -> Vec<&StepOutcome> {
        [&self.compile, &self.assets]
            .into_iter()
            .filter(|o| !o.is_success())
            .collect()
    }
}

/// The build orchestrator
///
/// Owns the services and drives the step sequence, keeping the
/// [`StateManager`] informed so the spinner and final summary stay
/// accurate. Construct once per run.
pub struct BuildPipeline {
    settings: BuildSettings,
    state: Arc<StateManager>,
    metrics: Arc<Metrics>,
    compiler: CompileService,
    assets: AssetService,
}

impl BuildPipeline {
    pub fn new(
        settings: BuildSettings,
        state: Arc<StateManager>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            settings,
            state,
            metrics,
            compiler: CompileService::new(),
            assets: AssetService::new(),
        }
    }

    /// Run the full build sequence
    ///
    /// # Returns
    /// A [`BuildReport`] with a tagged outcome per step. Failures are
    /// reported through the outcomes, not as `Err`; `Err` is reserved for
    /// the pipeline itself being unable to run at all.
    pub async fn run(&self) -> Result<BuildReport> {
        tracing::info!("Starting build of {}", self.settings.project_name);

        let start = Instant::now();
        let changes = self.state.start_build(2);
        self.note_state(changes);

        self.clear();
        println!(
            "Creating an optimised build of {}\n",
            self.settings.project_name
        );
        let compile = self.run_compile_step().await;

        self.clear();
        println!("Copying CSS files\n");
        let assets = self.run_assets_step().await;

        self.clear();
        println!("Done!");

        let changes = self.state.finish_build();
        self.note_state(changes);

        let report = BuildReport {
            compile,
            assets,
            duration: start.elapsed(),
        };

        if report.is_success() {
            tracing::info!(
                "Build finished successfully in {:.2}s",
                report.duration.as_secs_f32()
            );
        } else {
            for failure in report.failures() {
                tracing::error!("Step {} failed: {}", failure.step, failure.message);
            }
        }

        Ok(report)
    }

    /// Invoke the external compiler with the spinner running
    async fn run_compile_step(&self) -> StepOutcome {
        let step = StepKind::Compile;
        let changes = self.state.begin_step(step, "Compiling");
        self.note_state(changes);

        let start = Instant::now();
        let spinner = Spinner::spawn(step.spinner_label());

        let result = match self.compiler.compile_command(&self.settings) {
            Ok(command) => {
                let timeout = Duration::from_secs(self.settings.compile_timeout as u64);
                self.compiler.run(&command, timeout).await
            }
            Err(e) => Err(e.into()),
        };

        spinner.stop().await;

        let outcome = match result {
            Ok(compile) => {
                let changes = self.state.update(|s| {
                    s.compile_errors = compile.diagnostics.errors;
                    s.compile_warnings = compile.diagnostics.warnings;
                    s.compile_exit_code = compile.exit_code;
                    s.compile_duration = compile.duration;
                });
                self.note_state(changes);

                let status = if compile.is_success() {
                    StepStatus::Succeeded
                } else {
                    StepStatus::Failed
                };
                StepOutcome {
                    step,
                    status,
                    message: format!(
                        "Compiler exited with code {} ({})",
                        compile.exit_code.unwrap_or(-1),
                        compile.diagnostics.summary()
                    ),
                    duration: compile.duration,
                }
            }
            Err(e) => StepOutcome {
                step,
                status: StepStatus::Failed,
                message: format!("{:#}", e),
                duration: start.elapsed(),
            },
        };

        self.finish_step(&outcome);
        outcome
    }

    /// Stage distribution assets with the spinner running
    async fn run_assets_step(&self) -> StepOutcome {
        let step = StepKind::CopyAssets;
        let changes = self.state.begin_step(step, "Copying assets");
        self.note_state(changes);

        let start = Instant::now();
        let spinner = Spinner::spawn(step.spinner_label());

        let result = self.assets.stage(&self.settings);

        spinner.stop().await;

        let outcome = match result {
            Ok(report) => {
                let changes = self.state.update(|s| {
                    s.files_copied = report.files_copied;
                    s.copy_duration = report.duration;
                });
                self.note_state(changes);

                StepOutcome {
                    step,
                    status: StepStatus::Succeeded,
                    message: format!("Staged {}", report.summary()),
                    duration: report.duration,
                }
            }
            Err(e) => StepOutcome {
                step,
                status: StepStatus::Failed,
                message: format!("{:#}", e),
                duration: start.elapsed(),
            },
        };

        self.finish_step(&outcome);
        outcome
    }

    /// Record a finished step in state and metrics
    fn finish_step(&self, outcome: &StepOutcome) {
        let changes = self.state.record_step_result(
            outcome.step,
            outcome.is_success(),
            outcome.message.clone(),
        );
        self.note_state(changes);

        self.metrics.record_step_time(outcome.duration);
        if outcome.is_success() {
            self.metrics.record_step_completed();
        } else {
            self.metrics.record_step_failed();
        }
    }

    /// Clear the terminal between steps, if enabled
    fn clear(&self) {
        if self.settings.clear_screen {
            clear_screen();
        }
    }

    fn note_state(&self, changes: Vec<StateChange>) {
        self.metrics.record_state_update();
        for _ in &changes {
            self.metrics.record_state_broadcast();
        }
    }
}
