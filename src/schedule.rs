//! Worker threads, priorities and periodic pacing.
//!
//! Each worker runs on its own named OS thread and asks for a fixed real-time
//! priority. Correctness never depends on getting it: when the platform
//! refuses (no privilege, no real-time scheduler), the worker logs a warning
//! and carries on at the default priority.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use crate::error::StopwatchError;

// ============================================================================
// Priorities
// ============================================================================

/// Relative worker priority, highest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkerPriority {
    /// Periodic display
    Display,
    /// Timer ticker
    Ticker,
    /// Button monitors
    Button,
}

impl WorkerPriority {
    /// `SCHED_FIFO` priority requested for this class.
    pub const fn level(self) -> i32 {
        match self {
            WorkerPriority::Button => 30,
            WorkerPriority::Ticker => 20,
            WorkerPriority::Display => 10,
        }
    }
}

/// Apply `priority` to the calling thread.
///
/// Returns `false` (after logging a warning) when the platform refuses.
#[cfg(unix)]
pub fn apply_priority(priority: WorkerPriority) -> bool {
    // SAFETY: sched_param is plain data; zeroing covers platform padding fields.
    let mut param: libc::sched_param = unsafe { std::mem::zeroed() };
    param.sched_priority = priority.level();

    // SAFETY: pthread_self() is always a valid handle for the calling thread.
    let rc = unsafe { libc::pthread_setschedparam(libc::pthread_self(), libc::SCHED_FIFO, &param) };
    if rc != 0 {
        warn!(
            ?priority,
            error = %std::io::Error::from_raw_os_error(rc),
            "real-time priority unavailable, running at default priority"
        );
        return false;
    }
    true
}

/// Apply `priority` to the calling thread (unsupported: always `false`).
#[cfg(not(unix))]
pub fn apply_priority(priority: WorkerPriority) -> bool {
    warn!(?priority, "priority control unsupported on this platform");
    false
}

// ============================================================================
// Spawning
// ============================================================================

/// A worker that stopped on an error.
#[derive(Debug)]
pub struct WorkerFailure {
    /// Worker name
    pub worker: &'static str,
    /// Error it stopped with
    pub error: StopwatchError,
}

impl From<WorkerFailure> for StopwatchError {
    fn from(failure: WorkerFailure) -> Self {
        StopwatchError::Worker {
            worker: failure.worker,
            source: Box::new(failure.error),
        }
    }
}

/// Spawn a named worker thread at `priority`.
///
/// `body` is expected to run forever; if it returns an error or panics, the
/// failure is logged and sent on `failures`. A panic never ends a worker
/// silently: a poisoned state lock must reach the launcher.
pub fn spawn_worker<F>(
    name: &'static str,
    priority: WorkerPriority,
    failures: Sender<WorkerFailure>,
    body: F,
) -> Result<JoinHandle<()>, StopwatchError>
where
    F: FnOnce() -> Result<(), StopwatchError> + Send + 'static,
{
    thread::Builder::new()
        .name(format!("stopwatch-{}", name))
        .spawn(move || {
            apply_priority(priority);
            info!(worker = name, ?priority, "worker started");

            let outcome = panic::catch_unwind(AssertUnwindSafe(body)).unwrap_or_else(|payload| {
                Err(StopwatchError::Panicked {
                    message: panic_message(payload.as_ref()),
                })
            });

            match outcome {
                Ok(()) => info!(worker = name, "worker exiting"),
                Err(error) => {
                    error!(worker = name, %error, "worker failed");
                    // Launcher gone means the process is already going down.
                    let _ = failures.send(WorkerFailure {
                        worker: name,
                        error,
                    });
                }
            }
        })
        .map_err(|source| StopwatchError::Spawn {
            worker: name,
            source,
        })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// ============================================================================
// Pacing
// ============================================================================

/// Fixed-period deadline pacer.
///
/// Deadlines advance by exactly one period, so sleep overshoot does not
/// accumulate. A caller that falls more than a full period behind is
/// resynchronised to now rather than allowed to burst through missed periods.
#[derive(Debug, Clone)]
pub struct Pacer {
    period: Duration,
    deadline: Instant,
}

impl Pacer {
    /// First deadline one period from now.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: Instant::now() + period,
        }
    }

    /// Period between deadlines.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Next deadline.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Sleep until the current deadline, then arm the next one.
    pub fn wait(&mut self) {
        // Early wakeups just go back to sleep for the remainder.
        loop {
            let now = Instant::now();
            if now >= self.deadline {
                break;
            }
            thread::sleep(self.deadline - now);
        }

        self.deadline += self.period;
        let now = Instant::now();
        if now > self.deadline {
            self.deadline = now + self.period;
        }
    }
}
