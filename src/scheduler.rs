//! Periodic auto-publish loop.
//!
//! Two states, Idle and Running. The worker runs the caller's tick closure,
//! then waits one interval on a cancellation channel, so `stop` takes effect
//! immediately instead of after a flag-poll latency of up to one interval.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::error::Result;

/// Default interval between auto-publish iterations.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

struct Worker {
    stop_tx: mpsc::Sender<()>,
    handle: thread::JoinHandle<()>,
}

/// Runs a publish action on a fixed interval until stopped.
///
/// The tick closure decides what each iteration publishes; composing it over
/// a fresh [`MetricSnapshot`](crate::MetricSnapshot) read means value edits
/// take effect on the next iteration, never retroactively.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use sparkplug_edge::{AutoPublisher, BrokerConfig, EdgeIdentity, EdgePublisher, MetricSnapshot};
///
/// # fn main() -> Result<(), sparkplug_edge::Error> {
/// let publisher = Arc::new(EdgePublisher::connect(
///     EdgeIdentity::new("Plant1", "NodeA", "Dev1"),
///     &BrokerConfig::new("localhost", 1883),
/// )?);
///
/// let mut auto = AutoPublisher::new();
/// let worker = Arc::clone(&publisher);
/// auto.start(move || worker.publish_device_birth(&MetricSnapshot::new(10, 50, 100)));
/// // ...
/// auto.stop();
/// # Ok(())
/// # }
/// ```
pub struct AutoPublisher {
    interval: Duration,
    worker: Option<Worker>,
}

impl AutoPublisher {
    /// Creates an idle scheduler with the default 5-second interval.
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_INTERVAL)
    }

    /// Creates an idle scheduler with a custom interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            worker: None,
        }
    }

    /// The interval between iterations.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the loop is currently running.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Starts the loop. A no-op if it is already running; only one worker
    /// ever exists.
    ///
    /// Each iteration runs `tick` and then waits one interval. A failed
    /// iteration is logged and the loop continues; it never kills the
    /// worker.
    pub fn start<F>(&mut self, mut tick: F)
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        if self.worker.is_some() {
            debug!("auto publish already running");
            return;
        }

        let (stop_tx, stop_rx) = mpsc::channel();
        let interval = self.interval;
        let handle = thread::spawn(move || {
            debug!("auto publish loop started ({interval:?} interval)");
            loop {
                if let Err(err) = tick() {
                    warn!("auto publish iteration failed: {err}");
                }
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    // Stop requested, or the scheduler was dropped.
                    _ => break,
                }
            }
            debug!("auto publish loop stopped");
        });

        self.worker = Some(Worker { stop_tx, handle });
    }

    /// Stops the loop and waits for the worker to exit. A no-op when idle.
    ///
    /// An iteration already in flight completes; the worker observes the
    /// stop signal during its inter-tick wait, so there is no extra latency
    /// once that iteration returns.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.stop_tx.send(());
            let _ = worker.handle.join();
        }
    }
}

impl Default for AutoPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AutoPublisher {
    fn drop(&mut self) {
        self.stop();
    }
}
