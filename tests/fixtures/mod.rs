//! Test fixtures for gpio-stopwatch testing.
//!
//! Provides:
//! - `MockGpio`: In-memory implementation of the Gpio trait
//! - `MockSink`: Report sink capturing output
//! - `MockStopwatch`: Stopwatch type over the mocks

#![allow(dead_code)]

use gpio_stopwatch::{Direction, Gpio, GpioError, Level, PinId, ReportSink, Stopwatch};
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Mutex;

/// Stopwatch over the mock hardware.
pub type MockStopwatch = Stopwatch<MockGpio, MockSink>;

// ============================================================================
// MockGpio - Test GPIO Implementation
// ============================================================================

/// Mock GPIO for testing.
///
/// Pins hold a level (unset pins read `Low`). Writes and direction changes
/// are recorded. Individual pins can be made to fail reads, or to return an
/// unparsable value.
#[derive(Debug, Default)]
pub struct MockGpio {
    levels: Mutex<HashMap<PinId, Level>>,
    directions: Mutex<Vec<(PinId, Direction)>>,
    writes: Mutex<Vec<(PinId, Level)>>,
    failing: Mutex<HashSet<PinId>>,
    garbage: Mutex<HashSet<PinId>>,
}

impl MockGpio {
    /// Create MockGpio with every pin low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level a pin reads as (simulates pressing/releasing a button).
    pub fn set_level(&self, pin: PinId, level: Level) {
        self.levels.lock().unwrap().insert(pin, level);
    }

    /// Current level of a pin (last written or set).
    pub fn level(&self, pin: PinId) -> Level {
        self.levels
            .lock()
            .unwrap()
            .get(&pin)
            .copied()
            .unwrap_or(Level::Low)
    }

    /// Make reads and writes of `pin` fail with an I/O error.
    pub fn fail_pin(&self, pin: PinId) {
        self.failing.lock().unwrap().insert(pin);
    }

    /// Make reads of `pin` return an unparsable value.
    pub fn garble_pin(&self, pin: PinId) {
        self.garbage.lock().unwrap().insert(pin);
    }

    /// Recorded direction changes, in order.
    pub fn directions(&self) -> Vec<(PinId, Direction)> {
        self.directions.lock().unwrap().clone()
    }

    /// Recorded writes, in order.
    pub fn writes(&self) -> Vec<(PinId, Level)> {
        self.writes.lock().unwrap().clone()
    }

    /// Clear recorded writes.
    pub fn clear_writes(&self) {
        self.writes.lock().unwrap().clear();
    }

    fn check(&self, pin: PinId, op: &'static str) -> Result<(), GpioError> {
        if self.failing.lock().unwrap().contains(&pin) {
            return Err(GpioError::Io {
                pin,
                op,
                source: io::Error::other("mock failure"),
            });
        }
        Ok(())
    }
}

impl Gpio for MockGpio {
    fn set_direction(&self, pin: PinId, direction: Direction) -> Result<(), GpioError> {
        self.check(pin, "set direction")?;
        self.directions.lock().unwrap().push((pin, direction));
        Ok(())
    }

    fn read_pin(&self, pin: PinId) -> Result<Level, GpioError> {
        self.check(pin, "read")?;
        if self.garbage.lock().unwrap().contains(&pin) {
            return Err(GpioError::InvalidValue {
                pin,
                value: "?".to_string(),
            });
        }
        Ok(self.level(pin))
    }

    fn write_pin(&self, pin: PinId, level: Level) -> Result<(), GpioError> {
        self.check(pin, "write")?;
        self.writes.lock().unwrap().push((pin, level));
        self.levels.lock().unwrap().insert(pin, level);
        Ok(())
    }
}

// ============================================================================
// MockSink - Test Report Sink
// ============================================================================

/// Mock report sink capturing everything written.
#[derive(Debug, Default)]
pub struct MockSink {
    output: Mutex<String>,
    closed: Mutex<bool>,
}

impl MockSink {
    /// Create an empty, open sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured output.
    pub fn output(&self) -> String {
        self.output.lock().unwrap().clone()
    }

    /// Clear captured output.
    pub fn clear_output(&self) {
        self.output.lock().unwrap().clear();
    }

    /// Make every subsequent write fail (simulates a closed terminal).
    pub fn close(&self) {
        *self.closed.lock().unwrap() = true;
    }
}

impl ReportSink for MockSink {
    fn write_str(&self, s: &str) -> io::Result<()> {
        if *self.closed.lock().unwrap() {
            return Err(io::Error::from(io::ErrorKind::BrokenPipe));
        }
        self.output.lock().unwrap().push_str(s);
        Ok(())
    }
}
