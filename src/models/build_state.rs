use std::fmt;
use std::time::Duration;

/// The two fallible steps of the build sequence.
///
/// Screen clearing is deliberately not a step: it is cosmetic, its failure
/// is ignored, and it never appears in the build report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    Compile,
    CopyAssets,
}

impl StepKind {
    /// Label shown next to the spinner while the step runs
    pub fn spinner_label(&self) -> &'static str {
        match self {
            StepKind::Compile => "Compiling ",
            StepKind::CopyAssets => "Copying assets ",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Compile => write!(f, "compile"),
            StepKind::CopyAssets => write!(f, "copy-assets"),
        }
    }
}

/// Single source of truth for the runtime build state.
///
/// # Thread Safety
///
/// `BuildState` is wrapped in `Arc<RwLock<BuildState>>` by
/// [`crate::state::StateManager`] for thread-safe access. Never mutate it
/// directly - go through [`StateManager`](crate::state::StateManager):
/// - [`read()`](crate::state::StateManager::read) for read-only access
/// - [`update()`](crate::state::StateManager::update) for mutations with
///   automatic change events
#[derive(Clone, Debug)]
pub struct BuildState {
    // Runtime state
    pub is_building: bool,
    pub current_step: Option<StepKind>,
    pub current_operation: String,

    // Progress state
    pub steps_total: usize,

    // Results
    pub completed_steps: Vec<StepKind>,
    pub failed_steps: Vec<StepKind>,

    // Compile diagnostics (parsed from compiler output)
    pub compile_errors: usize,
    pub compile_warnings: usize,
    pub compile_exit_code: Option<i32>,
    pub compile_duration: Duration,

    // Asset staging results
    pub files_copied: usize,
    pub copy_duration: Duration,

    // Settings
    pub compile_timeout: Duration,
    pub clear_screen_enabled: bool,
    pub debug_mode: bool,
}

impl Default for BuildState {
    fn default() -> Self {
        Self {
            is_building: false,
            current_step: None,
            current_operation: String::new(),

            steps_total: 0,

            completed_steps: Vec::new(),
            failed_steps: Vec::new(),

            compile_errors: 0,
            compile_warnings: 0,
            compile_exit_code: None,
            compile_duration: Duration::ZERO,

            files_copied: 0,
            copy_duration: Duration::ZERO,

            compile_timeout: Duration::from_secs(300),
            clear_screen_enabled: true,
            debug_mode: false,
        }
    }
}

impl BuildState {
    /// Counts of (completed, failed, total) steps
    pub fn step_stats(&self) -> (usize, usize, usize) {
        (
            self.completed_steps.len(),
            self.failed_steps.len(),
            self.steps_total,
        )
    }

    /// True once any step has been recorded as failed
    pub fn has_failures(&self) -> bool {
        !self.failed_steps.is_empty()
    }

    /// Record the outcome of a finished step
    pub fn record_step(&mut self, step: StepKind, success: bool) {
        if success {
            self.completed_steps.push(step);
        } else {
            self.failed_steps.push(step);
        }
    }

    /// Reset all build-related state to initial values
    pub fn reset_build_state(&mut self) {
        self.is_building = false;
        self.current_step = None;
        self.current_operation.clear();
        self.steps_total = 0;
        self.completed_steps.clear();
        self.failed_steps.clear();
        self.compile_errors = 0;
        self.compile_warnings = 0;
        self.compile_exit_code = None;
        self.compile_duration = Duration::ZERO;
        self.files_copied = 0;
        self.copy_duration = Duration::ZERO;
    }
}
