//! # gpio-stopwatch
//!
//! Two-button, two-light stopwatch controller for embedded Linux boards.
//!
//! **Key pieces:**
//! - **Shared state** - run/stop flag and elapsed counter, each behind its own lock
//! - **Button monitors** - one per button, debounced to one action per press
//! - **Timer ticker** - adds a 10ms quantum every 10ms while running, with rollover
//! - **Display reporter** - prints the elapsed seconds every 100ms while running
//! - **Injected GPIO** - `Gpio` trait with sysfs and dry-run implementations
//!
//! The four workers run on their own threads at fixed real-time priorities
//! (buttons > ticker > display) and never terminate; [`launch`] returns only
//! when one of them fails.
//!
//! ## Optional Features
//!
//! - `dry-run` - the binary logs GPIO traffic instead of using `/sys/class/gpio`

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// ============================================================================
// Module Declarations
// ============================================================================

// Foundation
pub mod config;
pub mod error;
pub mod gpio;
pub mod io;
pub mod report;
pub mod trace;

// Shared state and transitions
pub mod state;
pub mod stopwatch;

// Workers
pub mod button;
pub mod display;
pub mod ticker;

// Scheduling and startup
pub mod launch;
pub mod schedule;

// ============================================================================
// Re-exports - Public API
// ============================================================================

// Configuration
pub use config::{DefaultConfig, ScaledConfig, StopwatchConfig};

// Error types
pub use error::{GpioError, StopwatchError};

// Hardware and output
pub use gpio::{Direction, DryRunGpio, Gpio, Level, PinId, PinMap, SysfsGpio};
pub use io::{ReportSink, StdoutSink};
pub use report::Report;

// State machine
pub use state::{RunState, SharedState};
pub use stopwatch::Stopwatch;

// Workers and startup
pub use button::{ButtonAction, ButtonChannel, ButtonMonitor, DebounceState};
pub use display::DisplayReporter;
pub use launch::{launch, start};
pub use schedule::{Pacer, WorkerFailure, WorkerPriority};
pub use ticker::TimerTicker;

// ============================================================================
// Library Metadata
// ============================================================================

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
