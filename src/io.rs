//! Output channel abstraction for elapsed-time reports.
//!
//! The `ReportSink` trait receives rendered reports from the display worker
//! and from the stop transition. Both run on different threads, so a sink is
//! shared by reference.

use std::io::{self, Write};

/// Platform-agnostic report output trait.
///
/// - `write_str()` must write AND flush: a periodic report has no trailing
///   newline, so line buffering would hold it back
/// - `write_str()` must not block indefinitely
/// - Errors are returned, never dropped
pub trait ReportSink: Send + Sync {
    /// Write and flush a rendered report.
    fn write_str(&self, s: &str) -> io::Result<()>;
}

/// Standard output sink.
///
/// Holds the stdout lock for the duration of one report, so concurrent
/// reports never interleave.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn write_str(&self, s: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(s.as_bytes())?;
        out.flush()
    }
}
