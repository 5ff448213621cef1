// Busy-spinner
//
// A cooperative spinner task shown while a blocking step (compile, asset
// staging) runs. The orchestrator signals cancellation through a watch
// channel immediately after the step completes; the task is joined with a
// bounded timeout only after the signal is sent. The spinner never loops
// unguarded and never outlives the step it decorates.

use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout};

/// Classic four-frame spinner animation
const FRAMES: [char; 4] = ['-', '\\', '|', '/'];

/// Animation tick interval
const TICK: Duration = Duration::from_millis(100);

/// Join budget applied after the cancellation signal is sent
const STOP_BUDGET: Duration = Duration::from_secs(1);

/// A textual busy-spinner with a caller-supplied label
pub struct Spinner;

impl Spinner {
    /// Spawn the spinner on a background task
    ///
    /// The returned handle must be stopped with
    /// [`SpinnerHandle::stop`] once the decorated step completes.
    pub fn spawn(label: &str) -> SpinnerHandle {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let label = label.to_string();

        let task = tokio::spawn(async move {
            let mut ticker = interval(TICK);
            let mut frame = 0usize;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        print!("\r{}{}", label, FRAMES[frame % FRAMES.len()]);
                        let _ = io::stdout().flush();
                        frame += 1;
                    }
                    _ = cancel_rx.changed() => break,
                }
            }

            // Erase the spinner line before handing the terminal back
            print!("\r{}\r", " ".repeat(label.len() + 1));
            let _ = io::stdout().flush();
        });

        SpinnerHandle { cancel_tx, task }
    }
}

/// Handle for stopping a running spinner
pub struct SpinnerHandle {
    cancel_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SpinnerHandle {
    /// Signal cancellation, then join with a bounded timeout
    ///
    /// The spinner is cosmetic, so a task that fails to stop in time is
    /// logged and abandoned rather than failing the build.
    pub async fn stop(self) {
        let _ = self.cancel_tx.send(true);

        if timeout(STOP_BUDGET, self.task).await.is_err() {
            tracing::warn!("Spinner did not stop within {:?}", STOP_BUDGET);
        }
    }
}
