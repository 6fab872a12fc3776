//! Timer ticker worker.

use std::marker::PhantomData;
use std::sync::Arc;

use tracing::trace;

use crate::config::StopwatchConfig;
use crate::error::StopwatchError;
use crate::gpio::Gpio;
use crate::io::ReportSink;
use crate::schedule::Pacer;
use crate::state::{RunState, advance};
use crate::stopwatch::Stopwatch;

/// Advances the elapsed counter by one quantum per tick period while running.
#[derive(Debug)]
pub struct TimerTicker<G: Gpio, S: ReportSink, C: StopwatchConfig> {
    stopwatch: Arc<Stopwatch<G, S>>,
    _config: PhantomData<C>,
}

impl<G: Gpio, S: ReportSink, C: StopwatchConfig> TimerTicker<G, S, C> {
    /// Ticker over `stopwatch`'s state.
    pub fn new(stopwatch: Arc<Stopwatch<G, S>>) -> Self {
        Self {
            stopwatch,
            _config: PhantomData,
        }
    }

    /// One tick. Returns the new elapsed value, or `None` while stopped.
    ///
    /// The run state is checked and released before elapsed is updated, so a
    /// tick racing a stop can still add one quantum after the final report
    /// was rendered. The stored value may then exceed the lap result by one
    /// quantum; the next reset clears it.
    pub fn tick(&self) -> Option<f64> {
        let shared = self.stopwatch.state();
        // Run-state lock is released before the elapsed lock is taken.
        if shared.run_state() != RunState::Running {
            return None;
        }

        let elapsed = shared.mutate_elapsed(|t| advance(t, C::QUANTUM_MS, C::ROLLOVER_MS));
        if elapsed == 0.0 {
            trace!("elapsed counter rolled over");
        }
        Some(elapsed)
    }

    /// Tick forever on `C::TICK_PERIOD`.
    pub fn run(self) -> Result<(), StopwatchError> {
        let mut pacer = Pacer::new(C::TICK_PERIOD);
        loop {
            self.tick();
            pacer.wait();
        }
    }
}
