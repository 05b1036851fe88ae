//! Hardware adapter — bridges the board peripherals to domain port traits.
//!
//! Owns the analog sampler and the overheat indicator pin, and borrows the
//! pulse counter and decay timer registers (those are shared with their
//! interrupt/clock side). Exposes everything through [`SensorPort`],
//! [`ActuatorPort`] and [`DecayTimerPort`].

use embedded_hal::digital::OutputPin;
use log::{info, warn};

use crate::app::ports::{ActuatorPort, DecayTimerPort, SensorPort};
use crate::control::speed::compose_count;
use crate::drivers::decay_timer::DecayTimer;
use crate::drivers::pulse_counter::PulseCounter;
use crate::error::SensorError;
use crate::sensors::AnalogSampler;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<'a, A, L> {
    sampler: A,
    counter: &'a PulseCounter,
    timer: &'a DecayTimer,
    indicator: L,
}

impl<'a, A, L> HardwareAdapter<'a, A, L>
where
    A: AnalogSampler,
    L: OutputPin,
{
    /// Take ownership of the peripherals and start the pulse counter.
    pub fn new(sampler: A, counter: &'a PulseCounter, timer: &'a DecayTimer, mut indicator: L) -> Self {
        if indicator.set_low().is_err() {
            warn!("hardware: indicator pin init failed");
        }
        counter.start();
        info!("hardware: pulse counter started");
        Self {
            sampler,
            counter,
            timer,
            indicator,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<A, L> SensorPort for HardwareAdapter<'_, A, L>
where
    A: AnalogSampler,
    L: OutputPin,
{
    fn sample_temperature(&mut self) -> Result<u8, SensorError> {
        self.sampler.sample()
    }

    fn pulse_count(&mut self) -> u16 {
        let (high, low) = self.counter.read_halves();
        compose_count(high, low)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<A, L> ActuatorPort for HardwareAdapter<'_, A, L>
where
    A: AnalogSampler,
    L: OutputPin,
{
    fn stop_pulse_counter(&mut self) {
        self.counter.stop();
    }

    fn pulse_counter_running(&self) -> bool {
        self.counter.is_running()
    }

    fn set_overheat_indicator(&mut self, on: bool) {
        let result = if on {
            self.indicator.set_high()
        } else {
            self.indicator.set_low()
        };
        if let Err(e) = result {
            warn!("hardware: indicator write failed: {:?}", e);
        }
    }
}

// ── DecayTimerPort implementation ─────────────────────────────

impl<A, L> DecayTimerPort for HardwareAdapter<'_, A, L> {
    fn arm(&mut self, reload: u16) {
        self.timer.load_and_start(reload);
    }

    fn overflowed(&self) -> bool {
        self.timer.overflowed()
    }

    fn clear_and_stop(&mut self) {
        self.timer.clear_overflow();
        self.timer.stop();
    }

    fn is_running(&self) -> bool {
        self.timer.is_running()
    }
}
