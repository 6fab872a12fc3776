//! Shared run/stop flag and elapsed-time counter.
//!
//! Each cell has its own lock. Every operation locks exactly one cell for the
//! duration of a plain read or write and releases it before returning, so no
//! caller can end up holding both, or re-entering one it already holds.

use std::sync::{Mutex, MutexGuard};

/// Whether the stopwatch is counting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RunState {
    /// Counter frozen, red light on
    #[default]
    Stopped,
    /// Counter advancing, green light on
    Running,
}

impl RunState {
    /// The state a start/stop press moves to.
    pub const fn toggled(self) -> Self {
        match self {
            RunState::Stopped => RunState::Running,
            RunState::Running => RunState::Stopped,
        }
    }
}

/// Advance an elapsed reading by one quantum.
///
/// Rolls over to zero when the result would reach `bound`.
pub fn advance(elapsed: f64, quantum: f64, bound: f64) -> f64 {
    // Compare before adding: near f64::MAX the sum itself would overflow.
    if elapsed >= bound - quantum {
        0.0
    } else {
        elapsed + quantum
    }
}

/// State shared by all workers.
#[derive(Debug, Default)]
pub struct SharedState {
    run_state: Mutex<RunState>,
    elapsed: Mutex<f64>,
}

/// Lock a state cell.
///
/// A poisoned lock means a worker panicked mid-update; the state machine can
/// no longer be trusted, so this panics. Workers catch it and hand it to the
/// launcher, which stops the process.
fn lock<'a, T>(cell: &'a Mutex<T>, name: &str) -> MutexGuard<'a, T> {
    match cell.lock() {
        Ok(guard) => guard,
        Err(_) => panic!("{} lock poisoned", name),
    }
}

impl SharedState {
    /// Stopped, zero elapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current run state.
    pub fn run_state(&self) -> RunState {
        *lock(&self.run_state, "run-state")
    }

    /// Overwrite the run state.
    pub fn set_run_state(&self, state: RunState) {
        *lock(&self.run_state, "run-state") = state;
    }

    /// Current elapsed milliseconds.
    pub fn elapsed(&self) -> f64 {
        *lock(&self.elapsed, "elapsed-time")
    }

    /// Atomically replace elapsed with `f(elapsed)`, returning the new value.
    ///
    /// `f` runs under the elapsed-time lock and must not touch `self`.
    pub fn mutate_elapsed(&self, f: impl FnOnce(f64) -> f64) -> f64 {
        let mut elapsed = lock(&self.elapsed, "elapsed-time");
        *elapsed = f(*elapsed);
        *elapsed
    }

    /// Zero the elapsed counter.
    pub fn reset_elapsed(&self) {
        self.mutate_elapsed(|_| 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_initial_state() {
        let state = SharedState::new();
        assert_eq!(state.run_state(), RunState::Stopped);
        assert_eq!(state.elapsed(), 0.0);
    }

    #[test]
    fn test_toggled() {
        assert_eq!(RunState::Stopped.toggled(), RunState::Running);
        assert_eq!(RunState::Running.toggled(), RunState::Stopped);
    }

    #[test]
    fn test_advance() {
        assert_eq!(advance(0.0, 10.0, 1000.0), 10.0);
        assert_eq!(advance(980.0, 10.0, 1000.0), 990.0);
        // Reaching the bound rolls over instead of yielding it
        assert_eq!(advance(990.0, 10.0, 1000.0), 0.0);
    }

    #[test]
    fn test_advance_near_max_does_not_overflow() {
        let result = advance(f64::MAX, 10.0, f64::MAX);
        assert_eq!(result, 0.0);
        assert!(result.is_finite());
    }

    #[test]
    fn test_mutate_elapsed_returns_new_value() {
        let state = SharedState::new();
        assert_eq!(state.mutate_elapsed(|t| t + 10.0), 10.0);
        assert_eq!(state.mutate_elapsed(|t| t * 3.0), 30.0);
        assert_eq!(state.elapsed(), 30.0);

        state.reset_elapsed();
        assert_eq!(state.elapsed(), 0.0);
    }

    #[test]
    fn test_concurrent_mutations_are_not_lost() {
        let state = Arc::new(SharedState::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    for _ in 0..250 {
                        state.mutate_elapsed(|t| t + 10.0);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(state.elapsed(), 10_000.0);
    }
}
