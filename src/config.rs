//! System configuration parameters
//!
//! Every design constant of the instrument cluster. `Default` reproduces
//! the reference hardware values; nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    // --- Timing ---
    /// Pacing delay at the end of every control cycle (milliseconds)
    pub loop_period_ms: u32,
    /// Settling delay held after the ADC read strobe (milliseconds)
    pub settle_delay_ms: u32,
    /// Bound on the conversion-complete wait (microseconds).
    /// `None` blocks until the device answers, like the reference board.
    pub conversion_timeout_us: Option<u32>,
    /// Completion-line poll interval, used only with a timeout (microseconds)
    pub conversion_poll_us: u32,
    /// Supervisor poll interval while the system is toggled off (milliseconds)
    pub idle_poll_ms: u32,

    // --- Fuel ---
    /// Fuel level at power-on (0-100%)
    pub fuel_initial_percent: u8,
    /// Level removed on each decay-timer expiry (%)
    pub fuel_step_percent: u8,
    /// Decay only happens while the level is at or above this (%)
    pub fuel_decay_min_percent: u8,
    /// Upper bound of the low-fuel band (%)
    pub low_fuel_max_percent: u8,
    /// Levels strictly below this stop the vehicle (%)
    pub fuel_depleted_below_percent: u8,
    /// Decay timer reload value (16-bit, counts up to overflow)
    pub decay_timer_reload: u16,
    /// Decay timer count rate (Hz)
    pub timer_clock_hz: u32,

    // --- Temperature ---
    /// Overheat indicator lights strictly above this (degrees C)
    pub overheat_above_c: u16,

    // --- Speed ---
    /// Static pulse count used for the power-on speed value
    pub speed_pulse_count: u32,
    /// Wheel circumference (metres)
    pub wheel_circumference_m: f32,
    /// Sensor pulses per wheel revolution
    pub pulses_per_revolution: u32,
    /// Speed added every cycle (km/h)
    pub speed_increment_kmh: u32,

    // --- Reporting ---
    /// Emit a telemetry event every N cycles (0 disables)
    pub telemetry_every_cycles: u32,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            // Timing
            loop_period_ms: 100,
            settle_delay_ms: 250,
            conversion_timeout_us: None,
            conversion_poll_us: 10,
            idle_poll_ms: 50,

            // Fuel
            fuel_initial_percent: 100,
            fuel_step_percent: 10,
            fuel_decay_min_percent: 10,
            low_fuel_max_percent: 20,
            fuel_depleted_below_percent: 10,
            decay_timer_reload: 0xFE17,
            timer_clock_hz: 1_000_000, // 12 MHz crystal / 12

            // Temperature
            overheat_above_c: 40,

            // Speed
            speed_pulse_count: 50,
            wheel_circumference_m: 1.884,
            pulses_per_revolution: 20,
            speed_increment_kmh: 5,

            // Reporting
            telemetry_every_cycles: 10,
        }
    }
}

impl ClusterConfig {
    /// Reject values that would break the control loop invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loop_period_ms == 0 {
            return Err(ConfigError::ValidationFailed("loop_period_ms must be > 0"));
        }
        if self.fuel_initial_percent > 100 {
            return Err(ConfigError::ValidationFailed(
                "fuel_initial_percent must be <= 100",
            ));
        }
        if self.fuel_step_percent == 0 {
            return Err(ConfigError::ValidationFailed("fuel_step_percent must be > 0"));
        }
        // An empty tank must stop the timer.
        if self.fuel_decay_min_percent == 0 {
            return Err(ConfigError::ValidationFailed(
                "fuel_decay_min_percent must be > 0",
            ));
        }
        // Every armed level must afford one whole step.
        if self.fuel_step_percent > self.fuel_decay_min_percent {
            return Err(ConfigError::ValidationFailed(
                "fuel_step_percent exceeds fuel_decay_min_percent",
            ));
        }
        if self.low_fuel_max_percent < self.fuel_depleted_below_percent {
            return Err(ConfigError::ValidationFailed(
                "low_fuel_max_percent below depletion threshold",
            ));
        }
        if self.pulses_per_revolution == 0 {
            return Err(ConfigError::ValidationFailed(
                "pulses_per_revolution must be > 0",
            ));
        }
        if self.wheel_circumference_m <= 0.0 {
            return Err(ConfigError::ValidationFailed(
                "wheel_circumference_m must be positive",
            ));
        }
        if self.conversion_timeout_us.is_some() && self.conversion_poll_us == 0 {
            return Err(ConfigError::ValidationFailed(
                "conversion_poll_us must be > 0 when a timeout is set",
            ));
        }
        Ok(())
    }

    /// Decay timer period implied by the reload value and clock (microseconds).
    pub fn decay_interval_us(&self) -> u64 {
        let ticks = 0x1_0000 - u64::from(self.decay_timer_reload);
        ticks * 1_000_000 / u64::from(self.timer_clock_hz.max(1))
    }
}
