//! Stopwatch transitions: start, stop, reset and pin setup.
//!
//! `Stopwatch` owns the shared state together with the GPIO and report sink,
//! and is shared by all workers behind an `Arc`.
//!
//! Locking rule: a transition updates state through [`SharedState`]
//! (which releases its lock before returning) and only then drives lights or
//! writes reports. No pin or output I/O ever happens under a state lock.

use tracing::{debug, info};

use crate::error::StopwatchError;
use crate::gpio::{Direction, Gpio, Level, PinMap};
use crate::io::ReportSink;
use crate::report::Report;
use crate::state::{RunState, SharedState};

/// Stopwatch controller.
#[derive(Debug)]
pub struct Stopwatch<G: Gpio, S: ReportSink> {
    state: SharedState,
    gpio: G,
    sink: S,
    pins: PinMap,
}

impl<G: Gpio, S: ReportSink> Stopwatch<G, S> {
    /// Create a stopwatch wired to `pins`. No pin is touched until
    /// [`configure_pins`](Self::configure_pins) / [`initialize`](Self::initialize).
    pub fn new(gpio: G, sink: S, pins: PinMap) -> Self {
        Self {
            state: SharedState::new(),
            gpio,
            sink,
            pins,
        }
    }

    /// Shared run/elapsed state.
    pub fn state(&self) -> &SharedState {
        &self.state
    }

    /// GPIO the stopwatch drives.
    pub fn gpio(&self) -> &G {
        &self.gpio
    }

    /// Report output channel.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Pin wiring.
    pub fn pins(&self) -> &PinMap {
        &self.pins
    }

    // ========================================================================
    // Startup
    // ========================================================================

    /// Set lights as outputs and buttons as inputs.
    pub fn configure_pins(&self) -> Result<(), StopwatchError> {
        for pin in self.pins.lights() {
            self.gpio.set_direction(pin, Direction::Out)?;
        }
        for pin in self.pins.buttons() {
            self.gpio.set_direction(pin, Direction::In)?;
        }
        info!(pins = ?self.pins, "pins configured");
        Ok(())
    }

    /// Initial state: stopped, zero elapsed, green off, red on.
    pub fn initialize(&self) -> Result<(), StopwatchError> {
        self.state.set_run_state(RunState::Stopped);
        self.state.reset_elapsed();
        self.drive_lights(RunState::Stopped)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Start counting: green on, red off.
    pub fn start_watch(&self) -> Result<(), StopwatchError> {
        self.state.set_run_state(RunState::Running);
        debug!("watch started");
        self.drive_lights(RunState::Running)
    }

    /// Stop counting: green off, red on, then emit the lap result.
    pub fn stop_watch(&self) -> Result<(), StopwatchError> {
        self.state.set_run_state(RunState::Stopped);
        debug!("watch stopped");
        self.drive_lights(RunState::Stopped)?;

        let elapsed = self.state.elapsed();
        self.emit(Report::Final(elapsed))
    }

    /// Zero the counter, whatever the run state.
    pub fn reset_timer(&self) {
        self.state.reset_elapsed();
        debug!("timer reset");
    }

    /// Start/stop action: stop if running, start if stopped.
    ///
    /// Returns the state the watch was moved to.
    pub fn toggle(&self) -> Result<RunState, StopwatchError> {
        // Read and release before start/stop takes the run-state lock again.
        let current = self.state.run_state();
        match current {
            RunState::Running => self.stop_watch()?,
            RunState::Stopped => self.start_watch()?,
        }
        Ok(current.toggled())
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Render and write a report.
    pub fn emit(&self, report: Report) -> Result<(), StopwatchError> {
        let rendered = report.render()?;
        self.sink
            .write_str(&rendered)
            .map_err(StopwatchError::Output)
    }

    fn drive_lights(&self, state: RunState) -> Result<(), StopwatchError> {
        let (green, red) = match state {
            RunState::Running => (Level::High, Level::Low),
            RunState::Stopped => (Level::Low, Level::High),
        };
        self.gpio.write_pin(self.pins.green, green)?;
        self.gpio.write_pin(self.pins.red, red)?;
        Ok(())
    }
}
