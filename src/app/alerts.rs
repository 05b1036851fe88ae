//! Alert evaluation.
//!
//! Alerts are pure functions of the current fuel level and temperature,
//! recomputed every cycle. Nothing is latched: an alert holds exactly as
//! long as its condition does.
//!
//! | Alert              | Condition                       |
//! |--------------------|---------------------------------|
//! | low fuel warning   | `depleted_below <= level <= low_fuel_max` |
//! | fuel depleted stop | `level < depleted_below`        |
//! | overheat warning   | `temperature > overheat_above`  |
//!
//! The fuel alerts share one [`FuelAlert`] value so that at most one of
//! them can ever be active. Overheat is independent.

use serde::Serialize;

use crate::config::ClusterConfig;

/// Fuel alert band. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum FuelAlert {
    #[default]
    None,
    /// Level inside the low-fuel band.
    Low,
    /// Level below the depletion threshold: the vehicle is stopped.
    Depleted,
}

/// Alert state derived for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AlertFlags {
    pub fuel: FuelAlert,
    pub overheat: bool,
}

impl AlertFlags {
    pub fn low_fuel_warning(&self) -> bool {
        self.fuel == FuelAlert::Low
    }

    pub fn fuel_depleted_stop(&self) -> bool {
        self.fuel == FuelAlert::Depleted
    }

    pub fn overheat_warning(&self) -> bool {
        self.overheat
    }
}

/// Threshold set copied out of [`ClusterConfig`].
#[derive(Debug, Clone, Copy)]
pub struct AlertThresholds {
    low_fuel_max_percent: u8,
    depleted_below_percent: u8,
    overheat_above_c: u16,
}

impl AlertThresholds {
    pub fn new(config: &ClusterConfig) -> Self {
        Self {
            low_fuel_max_percent: config.low_fuel_max_percent,
            depleted_below_percent: config.fuel_depleted_below_percent,
            overheat_above_c: config.overheat_above_c,
        }
    }

    /// Classify a fuel level.
    pub fn fuel_alert(&self, level_percent: u8) -> FuelAlert {
        if level_percent < self.depleted_below_percent {
            FuelAlert::Depleted
        } else if level_percent <= self.low_fuel_max_percent {
            FuelAlert::Low
        } else {
            FuelAlert::None
        }
    }

    pub fn overheat(&self, temperature_c: u16) -> bool {
        temperature_c > self.overheat_above_c
    }

    /// Evaluate every alert against the current readings.
    pub fn evaluate(&self, level_percent: u8, temperature_c: u16) -> AlertFlags {
        AlertFlags {
            fuel: self.fuel_alert(level_percent),
            overheat: self.overheat(temperature_c),
        }
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self::new(&ClusterConfig::default())
    }
}
