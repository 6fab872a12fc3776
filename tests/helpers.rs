//! Shared test helpers to reduce duplication across integration tests.

#![allow(dead_code)]

#[allow(clippy::duplicate_mod)]
#[path = "fixtures/mod.rs"]
mod fixtures;

pub use fixtures::{MockGpio, MockSink, MockStopwatch};

use gpio_stopwatch::{
    ButtonMonitor, DefaultConfig, DisplayReporter, Level, PinId, PinMap, ScaledConfig,
    StopwatchConfig, TimerTicker,
};
use std::sync::Arc;

pub const GREEN: PinId = PinMap::BOARD.green;
pub const RED: PinId = PinMap::BOARD.red;
pub const START_STOP: PinId = PinMap::BOARD.start_stop;
pub const RESET: PinId = PinMap::BOARD.reset;

// ============================================================================
// Rig Creation Helpers
// ============================================================================

/// All four workers over one mocked stopwatch, driven step by step.
pub struct Rig<C: StopwatchConfig> {
    pub stopwatch: Arc<MockStopwatch>,
    pub start_stop: ButtonMonitor<MockGpio, MockSink, C>,
    pub reset: ButtonMonitor<MockGpio, MockSink, C>,
    pub ticker: TimerTicker<MockGpio, MockSink, C>,
    pub display: DisplayReporter<MockGpio, MockSink, C>,
}

/// Create an initialized rig with the board config.
pub fn create_rig() -> Rig<DefaultConfig> {
    create_rig_with::<DefaultConfig>()
}

/// Create an initialized rig that rolls over at 1000ms.
pub fn create_scaled_rig() -> Rig<ScaledConfig> {
    create_rig_with::<ScaledConfig>()
}

fn create_rig_with<C: StopwatchConfig>() -> Rig<C> {
    let stopwatch = Arc::new(MockStopwatch::new(
        MockGpio::new(),
        MockSink::new(),
        PinMap::BOARD,
    ));
    stopwatch.configure_pins().unwrap();
    stopwatch.initialize().unwrap();
    stopwatch.gpio().clear_writes();

    Rig {
        start_stop: ButtonMonitor::start_stop(Arc::clone(&stopwatch)),
        reset: ButtonMonitor::reset(Arc::clone(&stopwatch)),
        ticker: TimerTicker::new(Arc::clone(&stopwatch)),
        display: DisplayReporter::new(Arc::clone(&stopwatch)),
        stopwatch,
    }
}

// ============================================================================
// Interaction Helpers
// ============================================================================

impl<C: StopwatchConfig> Rig<C> {
    /// Full press of the start/stop button: one asserted poll, one released poll.
    pub fn press_start_stop(&mut self) {
        self.stopwatch.gpio().set_level(START_STOP, Level::High);
        assert!(self.start_stop.poll().unwrap(), "press should fire");
        self.stopwatch.gpio().set_level(START_STOP, Level::Low);
        assert!(!self.start_stop.poll().unwrap(), "release should not fire");
    }

    /// Full press of the reset button.
    pub fn press_reset(&mut self) {
        self.stopwatch.gpio().set_level(RESET, Level::High);
        assert!(self.reset.poll().unwrap(), "press should fire");
        self.stopwatch.gpio().set_level(RESET, Level::Low);
        assert!(!self.reset.poll().unwrap(), "release should not fire");
    }

    /// Run `n` ticker steps.
    pub fn tick(&self, n: usize) {
        for _ in 0..n {
            self.ticker.tick();
        }
    }

    /// Current elapsed milliseconds.
    pub fn elapsed(&self) -> f64 {
        self.stopwatch.state().elapsed()
    }

    /// (green, red) levels.
    pub fn lights(&self) -> (Level, Level) {
        let gpio = self.stopwatch.gpio();
        (gpio.level(GREEN), gpio.level(RED))
    }

    /// Captured report output.
    pub fn output(&self) -> String {
        self.stopwatch.sink().output()
    }
}
