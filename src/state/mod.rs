// State management module
//
// This module provides the StateManager which wraps BuildState with
// thread-safe access using Arc<RwLock<T>> and emits change events for the
// spinner and final summary.

use crate::models::{BuildConfig, BuildState, StepKind};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::broadcast;

/// Change events emitted when state is modified
///
/// These events are emitted to notify interested parties (the spinner, the
/// final summary) about state changes without requiring them to poll.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// Build sequence has started
    BuildStarted {
        total_steps: usize,
    },

    /// Build sequence has finished
    BuildFinished {
        completed: usize,
        failed: usize,
    },

    /// A step has begun executing
    StepStarted {
        step: StepKind,
    },

    /// A step has finished executing
    StepFinished {
        step: StepKind,
        success: bool,
        message: String,
    },

    /// Current operation label has changed
    OperationChanged {
        operation: String,
    },

    /// Settings have been updated
    SettingsChanged,

    /// State has been reset
    StateReset,
}

/// Thread-safe state manager with event emission
///
/// This is the central state management component that:
/// - Provides thread-safe access to [`BuildState`] via `Arc<RwLock<T>>`
/// - Detects state changes and emits [`StateChange`] events
/// - Supports subscribing to state changes via tokio broadcast channels
///
/// # Usage
///
/// Always use `StateManager` instead of accessing [`BuildState`] directly:
/// - [`read()`](Self::read) for reading state without holding locks
/// - [`update()`](Self::update) for mutations with automatic event emission
/// - [`subscribe()`](Self::subscribe) for listening to state changes
pub struct StateManager {
    /// The build state protected by RwLock for thread-safe access
    state: Arc<RwLock<BuildState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default state
    pub fn new() -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(BuildState::default())),
            state_tx,
        }
    }

    /// Get a read-only snapshot of the current state
    ///
    /// This clones the entire state, so it's safe to use without holding
    /// locks. For checking individual fields, prefer `read()` with a closure.
    pub fn snapshot(&self) -> BuildState {
        self.state.read().unwrap().clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let failed = state_manager.read(|state| state.has_failures());
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&BuildState) -> R,
    {
        let state = self.state.read().unwrap();
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// This is the primary way to modify state. It:
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Emits appropriate events
    ///
    /// # Returns
    /// A vector of StateChange events that were emitted
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut BuildState),
    {
        let mut state = self.state.write().unwrap();
        let old_state = state.clone();

        // Apply the update
        update_fn(&mut state);

        // Detect changes and emit events
        let changes = self.detect_changes(&old_state, &state);

        for change in &changes {
            // Ignore send errors - it's OK if no one is listening
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    ///
    /// Returns a receiver that will get notified of all future state
    /// changes. Multiple subscribers can listen simultaneously.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    /// Detect what changed between two states and generate events
    fn detect_changes(&self, old: &BuildState, new: &BuildState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        // Build lifecycle changes
        if old.is_building != new.is_building {
            if new.is_building {
                changes.push(StateChange::BuildStarted {
                    total_steps: new.steps_total,
                });
            } else {
                changes.push(StateChange::BuildFinished {
                    completed: new.completed_steps.len(),
                    failed: new.failed_steps.len(),
                });
            }
        }

        // Step changes
        if old.current_step != new.current_step {
            if let Some(step) = new.current_step {
                changes.push(StateChange::StepStarted { step });
            }
        }

        // Operation changes
        if old.current_operation != new.current_operation {
            changes.push(StateChange::OperationChanged {
                operation: new.current_operation.clone(),
            });
        }

        // Settings changes
        if old.compile_timeout != new.compile_timeout
            || old.clear_screen_enabled != new.clear_screen_enabled
            || old.debug_mode != new.debug_mode
        {
            changes.push(StateChange::SettingsChanged);
        }

        changes
    }

    // Convenience methods for the build lifecycle

    /// Start the build sequence
    pub fn start_build(&self, total_steps: usize) -> Vec<StateChange> {
        self.update(|state| {
            state.is_building = true;
            state.steps_total = total_steps;
            state.current_step = None;
            state.current_operation = "Starting build...".to_string();
            state.completed_steps.clear();
            state.failed_steps.clear();
        })
    }

    /// Finish the build sequence
    pub fn finish_build(&self) -> Vec<StateChange> {
        self.update(|state| {
            state.is_building = false;
            state.current_step = None;
            state.current_operation.clear();
        })
    }

    /// Mark a step as currently executing
    pub fn begin_step(&self, step: StepKind, operation: &str) -> Vec<StateChange> {
        self.update(|state| {
            state.current_step = Some(step);
            state.current_operation = operation.to_string();
        })
    }

    /// Record the result of a finished step
    ///
    /// # Arguments
    /// * `step` - The step that finished
    /// * `success` - Whether the step succeeded
    /// * `message` - Human-readable message about the result
    pub fn record_step_result(
        &self,
        step: StepKind,
        success: bool,
        message: String,
    ) -> Vec<StateChange> {
        let mut changes = self.update(|state| {
            state.record_step(step, success);
            state.current_step = None;
        });

        // Emit a step finished event
        let step_event = StateChange::StepFinished {
            step,
            success,
            message,
        };

        let _ = self.state_tx.send(step_event.clone());
        changes.push(step_event);

        changes
    }

    /// Reset all build-related state
    pub fn reset_build_state(&self) -> Vec<StateChange> {
        let mut changes = self.update(|state| {
            state.reset_build_state();
        });

        // Emit a reset event
        let reset_event = StateChange::StateReset;
        let _ = self.state_tx.send(reset_event.clone());
        changes.push(reset_event);

        changes
    }

    /// Load settings from the build manifest
    ///
    /// This populates BuildState fields from the loaded configuration.
    pub fn load_from_config(&self, config: &BuildConfig) -> Vec<StateChange> {
        self.update(|state| {
            let settings = &config.build_settings;

            state.compile_timeout = Duration::from_secs(settings.compile_timeout as u64);
            state.clear_screen_enabled = settings.clear_screen;
            state.debug_mode = settings.debug_mode;

            tracing::info!(
                "Loaded build settings: compiler={}, timeout={}s, clear_screen={}, debug={}",
                settings.compiler,
                settings.compile_timeout,
                settings.clear_screen,
                settings.debug_mode
            );
        })
    }

    /// Get an Arc reference to the state for use in worker tasks
    pub fn state_arc(&self) -> Arc<RwLock<BuildState>> {
        Arc::clone(&self.state)
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}
