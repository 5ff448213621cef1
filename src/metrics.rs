// Performance metrics module
//
// Lightweight counters for the build run, logged once at shutdown.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Build run metrics
///
/// Uses atomic operations for thread-safe tracking without locks. The
/// pipeline records step outcomes and timings; `log_summary()` is called
/// once the run finishes.
#[derive(Debug)]
pub struct Metrics {
    /// Steps that finished successfully
    pub steps_completed: AtomicUsize,

    /// Steps that failed
    pub steps_failed: AtomicUsize,

    /// Total time spent in fallible steps, in milliseconds
    pub total_step_time_ms: AtomicU64,

    /// Number of state updates performed
    pub state_updates: AtomicU64,

    /// Number of state broadcasts sent
    pub state_broadcasts: AtomicU64,

    /// Process start time
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            steps_completed: AtomicUsize::new(0),
            steps_failed: AtomicUsize::new(0),
            total_step_time_ms: AtomicU64::new(0),
            state_updates: AtomicU64::new(0),
            state_broadcasts: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a successful step
    pub fn record_step_completed(&self) {
        self.steps_completed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed step
    pub fn record_step_failed(&self) {
        self.steps_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record time spent in a step
    pub fn record_step_time(&self, duration: Duration) {
        self.total_step_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record a state update
    pub fn record_state_update(&self) {
        self.state_updates.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a state broadcast
    pub fn record_state_broadcast(&self) {
        self.state_broadcasts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!(
            "Build metrics: {} steps completed, {} failed, {:.2}s in steps, uptime {:.2}s",
            self.steps_completed.load(Ordering::Relaxed),
            self.steps_failed.load(Ordering::Relaxed),
            self.total_step_time_ms.load(Ordering::Relaxed) as f64 / 1000.0,
            self.uptime().as_secs_f64()
        );
        tracing::info!(
            "State: {} updates, {} broadcasts",
            self.state_updates.load(Ordering::Relaxed),
            self.state_broadcasts.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
