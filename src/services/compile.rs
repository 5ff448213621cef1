use anyhow::{Context, Result};
use regex::Regex;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;

use crate::models::BuildSettings;

/// Result of a compiler invocation
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    pub status: CompileStatus,
    pub exit_code: Option<i32>,
    pub duration: Duration,
    pub diagnostics: CompileDiagnostics,
}

impl CompileOutcome {
    pub fn is_success(&self) -> bool {
        self.status == CompileStatus::Succeeded
    }
}

/// Status of a compiler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileStatus {
    Succeeded,
    Failed,
}

/// Diagnostics counted from compiler output
#[derive(Debug, Clone, Default)]
pub struct CompileDiagnostics {
    pub errors: usize,
    pub warnings: usize,
}

impl CompileDiagnostics {
    /// Check if the compiler reported anything at all
    pub fn has_diagnostics(&self) -> bool {
        self.errors > 0 || self.warnings > 0
    }

    /// Get a summary string of the reported diagnostics
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.errors > 0 {
            parts.push(format!("{} errors", self.errors));
        }
        if self.warnings > 0 {
            parts.push(format!("{} warnings", self.warnings));
        }

        if parts.is_empty() {
            "No diagnostics".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// Errors that can occur while invoking the compiler
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("No compiler command configured")]
    CompilerNotConfigured,

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Process error: {0}")]
    ProcessError(#[from] std::io::Error),
}

/// Service for invoking the external compiler
///
/// Handles command resolution, subprocess execution with a bounded timeout,
/// and diagnostics counting from the captured compiler output.
///
/// The compiler is run through the platform shell with no arguments beyond
/// the configured command string: it is expected to discover its own
/// project-local configuration from the working directory (the way `tsc`
/// picks up `tsconfig.json`).
pub struct CompileService {
    /// Regex for error lines in compiler output (e.g. "error TS2322: ...")
    error_pattern: Regex,

    /// Regex for warning lines in compiler output
    warning_pattern: Regex,
}

impl CompileService {
    /// Create a new CompileService with compiled regex patterns
    pub fn new() -> Self {
        Self {
            error_pattern: Regex::new(r"\berror(\s+TS\d+)?\s*:").expect("Invalid error regex"),
            warning_pattern: Regex::new(r"\bwarning(\s+TS\d+)?\s*:")
                .expect("Invalid warning regex"),
        }
    }

    /// Resolve the compiler command from the build settings
    ///
    /// # Errors
    /// Returns [`CompileError::CompilerNotConfigured`] if the command is
    /// empty or whitespace.
    pub fn compile_command(&self, settings: &BuildSettings) -> Result<String, CompileError> {
        let command = settings.compiler.trim();
        if command.is_empty() {
            return Err(CompileError::CompilerNotConfigured);
        }
        Ok(command.to_string())
    }

    /// Count errors and warnings in captured compiler output
    pub fn parse_diagnostics(&self, output: &str) -> CompileDiagnostics {
        let mut diagnostics = CompileDiagnostics::default();

        for line in output.lines() {
            if self.error_pattern.is_match(line) {
                diagnostics.errors += 1;
            } else if self.warning_pattern.is_match(line) {
                diagnostics.warnings += 1;
            }
        }

        tracing::debug!(
            "Parsed compiler output - errors: {}, warnings: {}",
            diagnostics.errors,
            diagnostics.warnings
        );

        diagnostics
    }

    /// Execute the compiler command
    ///
    /// # Arguments
    /// * `command` - The command to execute through the platform shell
    /// * `timeout_duration` - Maximum time to wait for the process
    ///
    /// # Returns
    /// A [`CompileOutcome`] with the exit code, duration, and diagnostics.
    /// A missing compiler binary is reported through the shell's exit code
    /// and becomes a failed outcome rather than an error.
    pub async fn run(
        &self,
        command: &str,
        timeout_duration: Duration,
    ) -> Result<CompileOutcome> {
        tracing::info!("Executing compiler: {}", command);

        let start = Instant::now();

        let mut cmd = if cfg!(target_os = "windows") {
            let mut c = Command::new("cmd");
            c.args(["/C", command]);
            c
        } else {
            let mut c = Command::new("sh");
            c.args(["-c", command]);
            c
        };

        cmd.stdout(std::process::Stdio::piped());
        cmd.stderr(std::process::Stdio::piped());
        cmd.kill_on_drop(true);

        // Spawn the process
        let child = cmd.spawn().context("Failed to spawn compiler process")?;

        // Execute with timeout
        let output = timeout(timeout_duration, child.wait_with_output())
            .await
            .map_err(|_| {
                tracing::warn!("Compiler timed out after {:?}", timeout_duration);
                CompileError::Timeout(timeout_duration)
            })?
            .context("Failed to wait for compiler process")?;

        let duration = start.elapsed();
        let exit_code = output.status.code();

        // Diagnostics can land on either stream depending on the compiler
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        let diagnostics = self.parse_diagnostics(&combined);

        let status = if output.status.success() {
            CompileStatus::Succeeded
        } else {
            CompileStatus::Failed
        };

        tracing::info!(
            "Compiler finished in {:.2}s with exit code {} ({})",
            duration.as_secs_f32(),
            exit_code.unwrap_or(-1),
            diagnostics.summary()
        );

        Ok(CompileOutcome {
            status,
            exit_code,
            duration,
            diagnostics,
        })
    }
}

impl Default for CompileService {
    fn default() -> Self {
        Self::new()
    }
}
