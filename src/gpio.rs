//! GPIO abstraction for platform-agnostic pin access.
//!
//! The `Gpio` trait is the only way the stopwatch touches hardware. Two
//! implementations ship with the crate:
//! - [`SysfsGpio`] drives pins through the Linux `/sys/class/gpio` interface
//! - [`DryRunGpio`] logs every access and reads all pins as released

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::GpioError;

// ============================================================================
// Pin Types
// ============================================================================

/// Kernel GPIO number (the `N` in `/sys/class/gpio/gpioN`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PinId(pub u16);

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gpio{}", self.0)
    }
}

/// Pin direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Input (buttons)
    In,
    /// Output (lights)
    Out,
}

impl Direction {
    /// Sysfs representation (`"in"` / `"out"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary pin level.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    /// `0`: light off, button released
    Low,
    /// `1`: light on, button asserted
    High,
}

impl Level {
    /// Sysfs representation (`"0"` / `"1"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Low => "0",
            Level::High => "1",
        }
    }

    /// Parse a sysfs value, ignoring surrounding whitespace.
    ///
    /// Returns `None` for anything other than `0` or `1`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "0" => Some(Level::Low),
            "1" => Some(Level::High),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four pins the stopwatch is wired to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PinMap {
    /// Running indicator
    pub green: PinId,
    /// Stopped indicator
    pub red: PinId,
    /// Start/stop button
    pub start_stop: PinId,
    /// Reset button
    pub reset: PinId,
}

impl PinMap {
    /// Board wiring.
    pub const BOARD: PinMap = PinMap {
        green: PinId(44),
        red: PinId(68),
        start_stop: PinId(66),
        reset: PinId(69),
    };

    /// Light pins (configured as outputs).
    pub const fn lights(&self) -> [PinId; 2] {
        [self.green, self.red]
    }

    /// Button pins (configured as inputs).
    pub const fn buttons(&self) -> [PinId; 2] {
        [self.start_stop, self.reset]
    }
}

// ============================================================================
// GPIO Trait
// ============================================================================

/// Platform-agnostic GPIO trait.
///
/// Shared by every worker thread, so methods take `&self` and implementations
/// must be `Send + Sync`. Failures are always reported; a read never falls
/// back to a default level.
pub trait Gpio: Send + Sync {
    /// Configure a pin as input or output.
    fn set_direction(&self, pin: PinId, direction: Direction) -> Result<(), GpioError>;

    /// Read the current level of a pin.
    fn read_pin(&self, pin: PinId) -> Result<Level, GpioError>;

    /// Drive an output pin.
    fn write_pin(&self, pin: PinId, level: Level) -> Result<(), GpioError>;
}

// ============================================================================
// Sysfs Implementation
// ============================================================================

/// Default sysfs GPIO root.
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// GPIO over the Linux sysfs interface.
///
/// Pins must already be exported (`/sys/class/gpio/gpioN` exists). Every
/// access opens, reads or writes, and closes the attribute file.
#[derive(Debug, Clone)]
pub struct SysfsGpio {
    root: PathBuf,
}

impl SysfsGpio {
    /// GPIO rooted at [`SYSFS_GPIO_ROOT`].
    pub fn new() -> Self {
        Self::with_root(SYSFS_GPIO_ROOT)
    }

    /// GPIO rooted at an arbitrary directory (laid out like `/sys/class/gpio`).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sysfs root this instance reads from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn attribute(&self, pin: PinId, name: &str) -> PathBuf {
        self.root.join(pin.to_string()).join(name)
    }
}

impl Default for SysfsGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpio for SysfsGpio {
    fn set_direction(&self, pin: PinId, direction: Direction) -> Result<(), GpioError> {
        fs::write(self.attribute(pin, "direction"), direction.as_str()).map_err(|source| {
            GpioError::Io {
                pin,
                op: "set direction",
                source,
            }
        })
    }

    fn read_pin(&self, pin: PinId) -> Result<Level, GpioError> {
        let raw = fs::read_to_string(self.attribute(pin, "value")).map_err(|source| {
            GpioError::Io {
                pin,
                op: "read",
                source,
            }
        })?;

        Level::parse(&raw).ok_or_else(|| GpioError::InvalidValue {
            pin,
            value: raw.trim().to_string(),
        })
    }

    fn write_pin(&self, pin: PinId, level: Level) -> Result<(), GpioError> {
        fs::write(self.attribute(pin, "value"), level.as_str()).map_err(|source| GpioError::Io {
            pin,
            op: "write",
            source,
        })
    }
}

// ============================================================================
// Dry-Run Implementation
// ============================================================================

/// GPIO that only logs.
///
/// Every button reads as released, so the watch stays stopped. Useful to
/// exercise startup and worker scheduling on a host without the board.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunGpio;

impl Gpio for DryRunGpio {
    fn set_direction(&self, pin: PinId, direction: Direction) -> Result<(), GpioError> {
        info!(%pin, %direction, "set direction");
        Ok(())
    }

    fn read_pin(&self, _pin: PinId) -> Result<Level, GpioError> {
        Ok(Level::Low)
    }

    fn write_pin(&self, pin: PinId, level: Level) -> Result<(), GpioError> {
        info!(%pin, %level, "write");
        Ok(())
    }
}
