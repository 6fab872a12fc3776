//! Configuration traits and implementations for stopwatch timing.
//!
//! The `StopwatchConfig` trait fixes the quantum, rollover bound and worker
//! cadences at compile time, without runtime overhead.

use std::time::Duration;

/// Stopwatch configuration trait defining the counter policy and worker cadences.
///
/// All values are const (zero runtime cost).
pub trait StopwatchConfig: Send + Sync + 'static {
    /// Milliseconds added to the elapsed counter per tick (default: 10)
    const QUANTUM_MS: f64;

    /// Exclusive upper bound of the elapsed counter; reaching it rolls over to zero
    const ROLLOVER_MS: f64;

    /// Timer ticker cadence (default: 10ms)
    const TICK_PERIOD: Duration;

    /// Button polling cadence (default: 10ms)
    const POLL_PERIOD: Duration;

    /// Periodic display cadence (default: 100ms)
    const DISPLAY_PERIOD: Duration;
}

/// Default configuration for the board.
///
/// - QUANTUM_MS: 10
/// - ROLLOVER_MS: `f64::MAX`
/// - TICK_PERIOD / POLL_PERIOD: 10ms
/// - DISPLAY_PERIOD: 100ms
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DefaultConfig;

impl StopwatchConfig for DefaultConfig {
    const QUANTUM_MS: f64 = 10.0;
    const ROLLOVER_MS: f64 = f64::MAX;
    const TICK_PERIOD: Duration = Duration::from_millis(10);
    const POLL_PERIOD: Duration = Duration::from_millis(10);
    const DISPLAY_PERIOD: Duration = Duration::from_millis(100);
}

/// Scaled-down configuration that rolls over after one second.
///
/// Same cadences as [`DefaultConfig`], with ROLLOVER_MS: 1000. Makes rollover
/// observable in tests and bench runs.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ScaledConfig;

impl StopwatchConfig for ScaledConfig {
    const QUANTUM_MS: f64 = 10.0;
    const ROLLOVER_MS: f64 = 1000.0;
    const TICK_PERIOD: Duration = Duration::from_millis(10);
    const POLL_PERIOD: Duration = Duration::from_millis(10);
    const DISPLAY_PERIOD: Duration = Duration::from_millis(100);
}
