//! Display reporter worker.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::config::StopwatchConfig;
use crate::error::StopwatchError;
use crate::gpio::Gpio;
use crate::io::ReportSink;
use crate::report::Report;
use crate::schedule::Pacer;
use crate::state::RunState;
use crate::stopwatch::Stopwatch;

/// Emits a periodic elapsed reading every display period while running.
///
/// Output failures end the worker; they are never skipped over.
#[derive(Debug)]
pub struct DisplayReporter<G: Gpio, S: ReportSink, C: StopwatchConfig> {
    stopwatch: Arc<Stopwatch<G, S>>,
    _config: PhantomData<C>,
}

impl<G: Gpio, S: ReportSink, C: StopwatchConfig> DisplayReporter<G, S, C> {
    /// Reporter over `stopwatch`'s state and sink.
    pub fn new(stopwatch: Arc<Stopwatch<G, S>>) -> Self {
        Self {
            stopwatch,
            _config: PhantomData,
        }
    }

    /// One display step. Returns the emitted report, or `None` while stopped.
    ///
    /// A step racing a stop may print its periodic reading after the final
    /// report, leaving it on the fresh line until the next start overwrites it.
    pub fn report(&self) -> Result<Option<Report>, StopwatchError> {
        let state = self.stopwatch.state();
        if state.run_state() != RunState::Running {
            return Ok(None);
        }

        let report = Report::Periodic(state.elapsed());
        self.stopwatch.emit(report)?;
        Ok(Some(report))
    }

    /// Report forever on `C::DISPLAY_PERIOD`, until output fails.
    pub fn run(self) -> Result<(), StopwatchError> {
        let mut pacer = Pacer::new(C::DISPLAY_PERIOD);
        loop {
            self.report()?;
            pacer.wait();
        }
    }
}
