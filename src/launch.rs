//! Startup and worker wiring.

use std::convert::Infallible;
use std::sync::Arc;
use std::sync::mpsc;

use tracing::info;

use crate::button::ButtonMonitor;
use crate::config::StopwatchConfig;
use crate::display::DisplayReporter;
use crate::error::StopwatchError;
use crate::gpio::{Gpio, PinMap};
use crate::io::ReportSink;
use crate::schedule::{WorkerFailure, WorkerPriority, spawn_worker};
use crate::stopwatch::Stopwatch;
use crate::ticker::TimerTicker;

/// Configure pins, set the initial state and start all four workers.
///
/// Returns the stopwatch and a receiver that yields the first worker failure.
/// Workers never terminate on their own, so nothing arrives on the receiver
/// unless something broke.
pub fn start<G, S, C>(
    gpio: G,
    sink: S,
    pins: PinMap,
) -> Result<(Arc<Stopwatch<G, S>>, mpsc::Receiver<WorkerFailure>), StopwatchError>
where
    G: Gpio + 'static,
    S: ReportSink + 'static,
    C: StopwatchConfig,
{
    let stopwatch = Arc::new(Stopwatch::new(gpio, sink, pins));
    stopwatch.configure_pins()?;
    stopwatch.initialize()?;

    let (failure_tx, failure_rx) = mpsc::channel();

    let monitor = ButtonMonitor::<G, S, C>::start_stop(Arc::clone(&stopwatch));
    spawn_worker(
        monitor.action().name(),
        WorkerPriority::Button,
        failure_tx.clone(),
        move || monitor.run(),
    )?;

    let monitor = ButtonMonitor::<G, S, C>::reset(Arc::clone(&stopwatch));
    spawn_worker(
        monitor.action().name(),
        WorkerPriority::Button,
        failure_tx.clone(),
        move || monitor.run(),
    )?;

    let ticker = TimerTicker::<G, S, C>::new(Arc::clone(&stopwatch));
    spawn_worker("ticker", WorkerPriority::Ticker, failure_tx.clone(), move || {
        ticker.run()
    })?;

    let display = DisplayReporter::<G, S, C>::new(Arc::clone(&stopwatch));
    spawn_worker("display", WorkerPriority::Display, failure_tx, move || {
        display.run()
    })?;

    info!("stopwatch running");
    Ok((stopwatch, failure_rx))
}

/// Run the stopwatch until a worker fails.
///
/// Never returns `Ok`: on success the workers run until the process is killed.
pub fn launch<G, S, C>(gpio: G, sink: S) -> Result<Infallible, StopwatchError>
where
    G: Gpio + 'static,
    S: ReportSink + 'static,
    C: StopwatchConfig,
{
    let (_stopwatch, failures) = start::<G, S, C>(gpio, sink, PinMap::BOARD)?;
    match failures.recv() {
        Ok(failure) => Err(failure.into()),
        Err(_) => Err(StopwatchError::WorkersExited),
    }
}
