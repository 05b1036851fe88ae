//! Port traits — the hexagonal boundary between the control loop and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ClusterService (domain)
//! ```
//!
//! Driven adapters (sampler, counters, timer, indicator, display, event
//! sinks) implement these traits. The
//! [`ClusterService`](super::service::ClusterService) consumes them via
//! generics, so the control loop never touches hardware directly and can
//! be run against mocks or the simulated board.
//!
//! Pacing and settling waits are not a port of their own: they go through
//! [`embedded_hal::delay::DelayNs`].

use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the control loop calls this to obtain raw inputs.
pub trait SensorPort {
    /// Trigger a conversion, wait for it to complete, and read the raw
    /// 8-bit sample.
    ///
    /// Blocks until the conversion device answers unless the adapter was
    /// built with a bounded wait, in which case it may return
    /// [`SensorError::ConversionTimeout`].
    fn sample_temperature(&mut self) -> Result<u8, SensorError>;

    /// Non-destructive read of the external pulse counter.
    fn pulse_count(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the control loop calls this to drive outputs.
pub trait ActuatorPort {
    /// Stop the pulse counter. There is no matching start: once stopped
    /// it stays stopped for the rest of the process.
    fn stop_pulse_counter(&mut self);

    /// Whether the pulse counter is still counting.
    fn pulse_counter_running(&self) -> bool;

    /// Drive the overheat indicator output.
    fn set_overheat_indicator(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Decay timer port (driven adapter: one-shot hardware timer)
// ───────────────────────────────────────────────────────────────

/// One-shot interval timer used to pace fuel consumption.
pub trait DecayTimerPort {
    /// Load `reload` into the count register and start counting. Re-arming
    /// a running timer restarts the count; it does not clear the overflow
    /// flag.
    fn arm(&mut self, reload: u16);

    /// Overflow flag, set by hardware when the count wraps.
    fn overflowed(&self) -> bool;

    /// Clear the overflow flag and stop counting.
    fn clear_and_stop(&mut self);

    /// Whether the timer is counting.
    fn is_running(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Display port (external collaborator)
// ───────────────────────────────────────────────────────────────

/// Character display. Rows and columns are 1-based.
pub trait DisplayPort {
    /// Write `text` starting at (`row`, `col`).
    fn set_text(&mut self, row: u8, col: u8, text: &str);

    /// Write `value` in decimal, zero-padded to at least `width` digits.
    fn set_number(&mut self, row: u8, col: u8, value: u32, width: u8);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::error::Error for ConfigError {}

impl From<ConfigError> for crate::error::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::ValidationFailed(msg) => Self::Config(msg),
        }
    }
}
