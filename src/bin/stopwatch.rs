//! Stopwatch binary.
//!
//! Drives the board pins through sysfs, or logs pin traffic instead when
//! built with `--features dry-run`. Runs until killed; exits with a failure
//! status if any worker stops on an error.

use std::error::Error;
use std::process::ExitCode;

use gpio_stopwatch::trace::init_tracing;
use gpio_stopwatch::{DefaultConfig, StdoutSink, launch};
use tracing::{error, info};

fn main() -> ExitCode {
    init_tracing();
    info!(
        version = gpio_stopwatch::VERSION,
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "starting"
    );

    #[cfg(feature = "dry-run")]
    let gpio = {
        info!("dry-run mode, pins are not touched");
        gpio_stopwatch::DryRunGpio
    };

    #[cfg(not(feature = "dry-run"))]
    let gpio = gpio_stopwatch::SysfsGpio::new();

    match launch::<_, _, DefaultConfig>(gpio, StdoutSink) {
        Ok(never) => match never {},
        Err(err) => {
            error!("stopwatch stopped: {}", error_chain(&err));
            ExitCode::FAILURE
        }
    }
}

/// `err: cause: cause...`
fn error_chain(err: &dyn Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
