//! Tracing setup for the stopwatch binary.
//!
//! Log output goes to stderr so stdout carries nothing but reports.

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "gpio_stopwatch=info";

/// Initialize the tracing subscriber with uptime timestamps and thread names.
///
/// Call once, at the start of the binary. Filtering follows `RUST_LOG`,
/// falling back to [`DEFAULT_FILTER`].
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_names(true)
                .with_file(false)
                .with_line_number(false)
                .with_timer(fmt::time::uptime()),
        )
        .with(filter)
        .init();
}
