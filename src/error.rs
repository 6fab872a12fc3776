//! Error types for stopwatch operations.
//!
//! `GpioError` covers the pin transport, `StopwatchError` everything a worker
//! or the launcher can fail with. Neither is ever recovered from: a worker
//! that hits one stops and hands it to the launcher.

use std::io;

use thiserror::Error;

use crate::gpio::PinId;

/// GPIO transport failure.
///
/// A read that cannot be interpreted is an error, never a `Low` reading:
/// treating garbage as "released" (or "pressed") would fire spurious actions.
#[derive(Debug, Error)]
pub enum GpioError {
    /// Reading or writing the pin's backing file failed
    #[error("{op} failed on {pin}")]
    Io {
        /// Pin being accessed
        pin: PinId,
        /// Operation that failed ("read", "write", "set direction")
        op: &'static str,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Pin value was neither `0` nor `1`
    #[error("unparsable value {value:?} read from {pin}")]
    InvalidValue {
        /// Pin being read
        pin: PinId,
        /// Raw (trimmed) content that was read
        value: String,
    },
}

/// Stopwatch error type.
#[derive(Debug, Error)]
pub enum StopwatchError {
    /// GPIO transport failure
    #[error(transparent)]
    Gpio(#[from] GpioError),

    /// Writing a report to the output channel failed
    #[error("failed to write report")]
    Output(#[source] io::Error),

    /// Rendered report does not fit the report buffer
    #[error("report exceeds {cap} bytes", cap = crate::report::REPORT_CAPACITY)]
    ReportOverflow,

    /// Worker thread could not be spawned
    #[error("failed to spawn {worker} worker")]
    Spawn {
        /// Worker name
        worker: &'static str,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// A worker stopped because of an error
    #[error("{worker} worker failed")]
    Worker {
        /// Worker name
        worker: &'static str,
        /// Error the worker stopped with
        #[source]
        source: Box<StopwatchError>,
    },

    /// A worker panicked (e.g. on a poisoned state lock)
    #[error("panicked: {message}")]
    Panicked {
        /// Panic payload, when it was a string
        message: String,
    },

    /// Every worker exited without reporting a failure
    #[error("all workers exited")]
    WorkersExited,
}
