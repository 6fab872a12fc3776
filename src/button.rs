//! Button debouncing and monitoring.
//!
//! A physical press shows up as a run of `High` readings, possibly bouncing
//! at the edges. [`ButtonChannel`] collapses each run into a single action:
//!
//! ```text
//!           High / fire action
//!   Idle ────────────────────────▶ Held ──┐
//!    ▲                              │     │ High / nothing
//!    └──────────── Low ─────────────┘ ◀───┘
//! ```
//!
//! [`ButtonMonitor`] polls one pin, feeds the channel and performs the action
//! on the stopwatch.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use crate::config::StopwatchConfig;
use crate::error::StopwatchError;
use crate::gpio::{Gpio, Level, PinId};
use crate::io::ReportSink;
use crate::schedule::Pacer;
use crate::stopwatch::Stopwatch;

// ============================================================================
// Debounce State Machine
// ============================================================================

/// Debounce state of a button channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DebounceState {
    /// Released, armed for the next press
    Idle,
    /// Pressed, action already fired
    Held,
}

/// Per-button debounce state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ButtonChannel {
    /// Latched on an asserted reading, cleared only by a released one
    held: bool,
    /// Action already fired for the current press
    action_fired: bool,
}

impl ButtonChannel {
    /// Idle, armed channel.
    pub const fn new() -> Self {
        Self {
            held: false,
            action_fired: false,
        }
    }

    /// Feed one reading. Returns `true` exactly when an action should fire.
    pub fn update(&mut self, level: Level) -> bool {
        match level {
            Level::High => {
                if self.held {
                    return false;
                }
                self.held = true;
                if self.action_fired {
                    return false;
                }
                self.action_fired = true;
                true
            }
            Level::Low => {
                if self.held {
                    self.held = false;
                    self.action_fired = false;
                }
                false
            }
        }
    }

    /// Current debounce state.
    pub fn state(&self) -> DebounceState {
        if self.held {
            DebounceState::Held
        } else {
            DebounceState::Idle
        }
    }
}

// ============================================================================
// Button Actions
// ============================================================================

/// Logical action bound to a button.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    /// Stop if running, start if stopped
    StartStop,
    /// Zero the elapsed counter
    Reset,
}

impl ButtonAction {
    /// Worker name for the monitor bound to this action.
    pub const fn name(self) -> &'static str {
        match self {
            ButtonAction::StartStop => "start-stop",
            ButtonAction::Reset => "reset",
        }
    }
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Monitor
// ============================================================================

/// Polls one button pin and performs its action once per press.
#[derive(Debug)]
pub struct ButtonMonitor<G: Gpio, S: ReportSink, C: StopwatchConfig> {
    pin: PinId,
    action: ButtonAction,
    channel: ButtonChannel,
    stopwatch: Arc<Stopwatch<G, S>>,
    _config: PhantomData<C>,
}

impl<G: Gpio, S: ReportSink, C: StopwatchConfig> ButtonMonitor<G, S, C> {
    /// Monitor `pin`, performing `action` on `stopwatch`.
    pub fn new(pin: PinId, action: ButtonAction, stopwatch: Arc<Stopwatch<G, S>>) -> Self {
        Self {
            pin,
            action,
            channel: ButtonChannel::new(),
            stopwatch,
            _config: PhantomData,
        }
    }

    /// Monitor for the start/stop button of the stopwatch's pin map.
    pub fn start_stop(stopwatch: Arc<Stopwatch<G, S>>) -> Self {
        let pin = stopwatch.pins().start_stop;
        Self::new(pin, ButtonAction::StartStop, stopwatch)
    }

    /// Monitor for the reset button of the stopwatch's pin map.
    pub fn reset(stopwatch: Arc<Stopwatch<G, S>>) -> Self {
        let pin = stopwatch.pins().reset;
        Self::new(pin, ButtonAction::Reset, stopwatch)
    }

    /// Action this monitor performs.
    pub fn action(&self) -> ButtonAction {
        self.action
    }

    /// Debounce state after the last poll.
    pub fn channel(&self) -> &ButtonChannel {
        &self.channel
    }

    /// One poll. Returns `true` if the action fired.
    ///
    /// A failed or unparsable read is an error; it never counts as released.
    pub fn poll(&mut self) -> Result<bool, StopwatchError> {
        let level = self.stopwatch.gpio().read_pin(self.pin)?;
        if !self.channel.update(level) {
            return Ok(false);
        }

        debug!(button = %self.action, pin = %self.pin, "press");
        match self.action {
            ButtonAction::StartStop => {
                self.stopwatch.toggle()?;
            }
            ButtonAction::Reset => self.stopwatch.reset_timer(),
        }
        Ok(true)
    }

    /// Poll forever on `C::POLL_PERIOD`, until a read or action fails.
    pub fn run(mut self) -> Result<(), StopwatchError> {
        let mut pacer = Pacer::new(C::POLL_PERIOD);
        loop {
            self.poll()?;
            pacer.wait();
        }
    }
}
