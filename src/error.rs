//! Unified error types for the instrument-cluster firmware.
//!
//! A single `Error` enum that every subsystem can convert into. All
//! variants are `Copy` so they can be passed through the control loop and
//! event sink without allocation.
//!
//! The reference hardware has no recoverable-error path at all: waits on
//! the conversion device block forever. Errors only appear when a caller
//! opts into a bounded wait (see `ClusterConfig::conversion_timeout_us`)
//! or when a pin driver reports a fault.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level cluster error
// ---------------------------------------------------------------------------

/// Sensor and configuration failures, as seen by callers outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The analog sampler could not produce a reading.
    Sensor(SensorError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The completion line was still asserted when the bounded wait ran out.
    ConversionTimeout,
    /// A strobe or completion pin driver returned an error.
    GpioFault,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConversionTimeout => write!(f, "conversion timed out"),
            Self::GpioFault => write!(f, "GPIO fault"),
        }
    }
}

impl core::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
