//! Speed readout.
//!
//! The speed shown on the cluster is a placeholder model, not a pulse-rate
//! computation: it starts from a value derived from fixed design constants
//! and grows by a fixed increment every cycle. The pulse counter is read
//! each cycle but does not feed the formula.
//!
//! Halting (on fuel depletion) pins the value to zero. The caller halts
//! on every depleted cycle, after the increment, so those cycles end at
//! zero.

use crate::config::ClusterConfig;

/// Compose the 16-bit pulse count from the counter's high and low bytes.
pub const fn compose_count(high: u8, low: u8) -> u16 {
    ((high as u16) << 8) | low as u16
}

/// Power-on speed (km/h) from the static pulse count, truncated.
///
/// `pulses * circumference * 3600 / (1000 * pulses_per_rev)`
pub fn initial_speed_kmh(config: &ClusterConfig) -> u32 {
    let distance_m = config.speed_pulse_count as f32 * config.wheel_circumference_m;
    let divisor = (1000 * config.pulses_per_revolution) as f32;
    (distance_m * 3600.0 / divisor) as u32
}

pub struct SpeedModel {
    speed_kmh: u32,
    increment_kmh: u32,
}

impl SpeedModel {
    pub fn new(config: &ClusterConfig) -> Self {
        Self {
            speed_kmh: initial_speed_kmh(config),
            increment_kmh: config.speed_increment_kmh,
        }
    }

    pub fn speed_kmh(&self) -> u32 {
        self.speed_kmh
    }

    /// Per-cycle increment.
    pub fn advance(&mut self) {
        self.speed_kmh = self.speed_kmh.saturating_add(self.increment_kmh);
    }

    /// Force the speed to zero.
    pub fn halt(&mut self) {
        self.speed_kmh = 0;
    }
}
