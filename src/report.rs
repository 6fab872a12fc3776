//! Report types for elapsed-time output.
//!
//! `Report` carries an elapsed reading in milliseconds and knows how to render
//! itself for the terminal: periodic readings overwrite the current line,
//! the final reading of a run terminates it.

use core::fmt::{self, Write};

use crate::error::StopwatchError;

/// Capacity of a rendered report.
pub const REPORT_CAPACITY: usize = 48;

/// Elapsed-time report.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Report {
    /// Reading emitted every display period while running.
    ///
    /// Seconds with one decimal, carriage return first, no newline.
    Periodic(f64),

    /// Lap result emitted once when the watch stops.
    ///
    /// Seconds with two decimals, newline-terminated.
    Final(f64),
}

impl Report {
    /// Elapsed milliseconds carried by the report.
    pub const fn millis(&self) -> f64 {
        match self {
            Report::Periodic(ms) | Report::Final(ms) => *ms,
        }
    }

    /// Elapsed seconds carried by the report.
    pub fn seconds(&self) -> f64 {
        self.millis() / 1000.0
    }

    /// Render into a fixed-capacity buffer.
    pub fn render(&self) -> Result<heapless::String<REPORT_CAPACITY>, StopwatchError> {
        let mut buf = heapless::String::new();
        write!(buf, "{}", self).map_err(|_| StopwatchError::ReportOverflow)?;
        Ok(buf)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Periodic(_) => write!(f, "\r{:.1}", self.seconds()),
            Report::Final(_) => write!(f, "\r{:.2}\n", self.seconds()),
        }
    }
}
