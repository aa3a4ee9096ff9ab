//! Unified error types for the button firmware.
//!
//! The debounce core itself never fails. These types belong to the layers
//! around it: the expander driver's register I/O, local GPIO configuration,
//! and configuration checks. All variants are `Copy` so they can be logged
//! and passed around without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation outside the debounce core funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A transaction with the I/O expander failed.
    Expander(ExpanderError),
    /// Local GPIO configuration returned a non-OK status code.
    Gpio(i32),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expander(e) => write!(f, "expander: {e}"),
            Self::Gpio(rc) => write!(f, "gpio: config failed (rc={rc})"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Expander errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpanderError {
    /// The device did not acknowledge its address or a data byte.
    NoAcknowledge,
    /// Bus error (misplaced START/STOP).
    Bus,
    /// Lost arbitration to another bus master.
    ArbitrationLoss,
    /// Receive overrun on the bus peripheral.
    Overrun,
    /// Any other bus failure reported by the HAL.
    Other,
    /// Pin number outside 0..16.
    InvalidPin(u8),
}

impl fmt::Display for ExpanderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAcknowledge => write!(f, "no acknowledge"),
            Self::Bus => write!(f, "bus error"),
            Self::ArbitrationLoss => write!(f, "arbitration lost"),
            Self::Overrun => write!(f, "overrun"),
            Self::Other => write!(f, "I2C failure"),
            Self::InvalidPin(pin) => write!(f, "invalid pin {pin}"),
        }
    }
}

impl From<ExpanderError> for Error {
    fn from(e: ExpanderError) -> Self {
        Self::Expander(e)
    }
}

impl From<embedded_hal::i2c::ErrorKind> for ExpanderError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;
        match kind {
            ErrorKind::NoAcknowledge(_) => Self::NoAcknowledge,
            ErrorKind::Bus => Self::Bus,
            ErrorKind::ArbitrationLoss => Self::ArbitrationLoss,
            ErrorKind::Overrun => Self::Overrun,
            _ => Self::Other,
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
