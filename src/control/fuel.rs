//! Fuel model driven by a one-shot decay timer.
//!
//! Fuel is consumed in discrete steps: each time the decay timer expires
//! and the control loop notices, the level drops by one step.
//!
//! ```text
//!            arm (level >= min)          count wraps
//!   Idle ─────────────────────▶ Armed ─────────────▶ Expired
//!    ▲                                                 │
//!    └──────── observe: level -= step, clear + stop ───┘
//! ```
//!
//! The timer is re-armed every cycle while the level permits. Once the
//! level falls below `min_percent` it is never armed again and the level
//! freezes for the rest of the process.

use crate::app::ports::DecayTimerPort;
use crate::config::ClusterConfig;

/// Decay timer phase, derived from the hardware flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayPhase {
    Idle,
    Armed,
    Expired,
}

impl DecayPhase {
    pub fn of(timer: &impl DecayTimerPort) -> Self {
        if timer.overflowed() {
            Self::Expired
        } else if timer.is_running() {
            Self::Armed
        } else {
            Self::Idle
        }
    }
}

/// One applied decay step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelStep {
    pub from: u8,
    pub to: u8,
}

pub struct FuelGauge {
    level_percent: u8,
    step_percent: u8,
    min_percent: u8,
    reload: u16,
}

impl FuelGauge {
    pub fn new(config: &ClusterConfig) -> Self {
        Self {
            level_percent: config.fuel_initial_percent,
            step_percent: config.fuel_step_percent,
            min_percent: config.fuel_decay_min_percent,
            reload: config.decay_timer_reload,
        }
    }

    pub fn level_percent(&self) -> u8 {
        self.level_percent
    }

    /// Whether the level still allows the timer to run.
    pub fn can_decay(&self) -> bool {
        self.level_percent >= self.min_percent
    }

    /// Run the per-cycle timer duty: re-arm if permitted, then apply one
    /// step if the timer has expired.
    pub fn service(&mut self, timer: &mut impl DecayTimerPort) -> Option<FuelStep> {
        if self.can_decay() {
            timer.arm(self.reload);
        }

        if DecayPhase::of(timer) == DecayPhase::Expired && self.can_decay() {
            let from = self.level_percent;
            self.level_percent = from.saturating_sub(self.step_percent);
            timer.clear_and_stop();
            return Some(FuelStep {
                from,
                to: self.level_percent,
            });
        }

        None
    }
}
