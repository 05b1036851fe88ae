//! Application service — the control loop.
//!
//! [`ClusterService`] owns the fuel, speed and alert state and runs one
//! control cycle per call. All I/O flows through port traits injected at
//! call sites, making the whole loop testable with mock adapters or the
//! simulated board.
//!
//! ```text
//!  SensorPort ───▶ ┌────────────────────────┐ ──▶ DisplayPort
//!  DecayTimerPort ◀┤     ClusterService      ├──▶ EventSink
//!  ActuatorPort ◀──│  fuel · speed · alerts  │
//!                  └────────────────────────┘
//! ```
//!
//! ## Cycle order
//!
//! 1. sample + convert temperature
//! 2. read the pulse counter (observational)
//! 3. advance speed
//! 4. re-arm / service the fuel decay timer
//! 5. evaluate alerts
//! 6. fuel depletion: speed to zero, stop the pulse counter
//! 7. overheat indicator
//! 8. render
//! 9. pacing delay
//!
//! The toggle latch is only consulted before step 1, so a cycle that has
//! started always runs to the end.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::config::ClusterConfig;
use crate::control::fuel::FuelGauge;
use crate::control::speed::SpeedModel;
use crate::drivers::toggle::ToggleLatch;
use crate::error::Result;
use crate::layout::{self, DashboardView};
use crate::sensors::temperature;

use super::alerts::{AlertThresholds, FuelAlert};
use super::events::{AppEvent, CycleReport};
use super::ports::{ActuatorPort, DecayTimerPort, DisplayPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// ClusterService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
///
/// State lives as long as the service: toggling the system off and on
/// again resumes with the same fuel level and speed, and a stopped pulse
/// counter stays stopped.
pub struct ClusterService {
    config: ClusterConfig,
    thresholds: AlertThresholds,
    fuel: FuelGauge,
    speed: SpeedModel,
    /// Last good raw sample, reused if the sampler fails.
    last_raw: u8,
    fuel_alert: FuelAlert,
    overheat: bool,
    depleted: bool,
    cycle_count: u64,
    sessions: u64,
}

impl ClusterService {
    /// Construct the service. Speed starts at its power-on value and fuel
    /// at `fuel_initial_percent`.
    pub fn new(config: ClusterConfig) -> Self {
        let thresholds = AlertThresholds::new(&config);
        let fuel = FuelGauge::new(&config);
        let speed = SpeedModel::new(&config);
        let fuel_alert = thresholds.fuel_alert(fuel.level_percent());
        info!(
            "ClusterService: fuel={}% speed={}km/h",
            fuel.level_percent(),
            speed.speed_kmh()
        );

        Self {
            config,
            thresholds,
            fuel,
            speed,
            last_raw: 0,
            fuel_alert,
            overheat: false,
            depleted: false,
            cycle_count: 0,
            sessions: 0,
        }
    }

    /// Validate `config` first.
    pub fn try_new(config: ClusterConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full control cycle, including the trailing pacing delay.
    ///
    /// The `hw` parameter satisfies the sensor, actuator and timer ports
    /// at once; this avoids a triple mutable borrow while keeping the
    /// port boundary explicit.
    pub fn cycle<H, V, D, S>(
        &mut self,
        hw: &mut H,
        display: &mut V,
        delay: &mut D,
        sink: &mut S,
    ) -> CycleReport
    where
        H: SensorPort + ActuatorPort + DecayTimerPort,
        V: DisplayPort,
        D: DelayNs,
        S: EventSink,
    {
        self.cycle_count += 1;

        // 1. Temperature
        let raw = match hw.sample_temperature() {
            Ok(raw) => {
                self.last_raw = raw;
                raw
            }
            Err(e) => {
                warn!("cycle {}: sample failed: {}", self.cycle_count, e);
                sink.emit(&AppEvent::SampleFailed(e));
                self.last_raw
            }
        };
        let reading = temperature::convert(raw);

        // 2. Pulse counter (captured, not used by the speed model)
        let pulse_count = hw.pulse_count();

        // 3. Speed
        self.speed.advance();

        // 4. Fuel decay timer
        let step = self.fuel.service(hw);
        if let Some(step) = step {
            sink.emit(&AppEvent::FuelDecayed {
                from: step.from,
                to: step.to,
            });
        }

        // 5. Alerts
        let alerts = self
            .thresholds
            .evaluate(self.fuel.level_percent(), reading.celsius);
        if alerts.fuel != self.fuel_alert {
            sink.emit(&AppEvent::FuelAlertChanged {
                from: self.fuel_alert,
                to: alerts.fuel,
            });
            self.fuel_alert = alerts.fuel;
        }

        // 6. Depletion is terminal for the process.
        if alerts.fuel_depleted_stop() {
            self.speed.halt();
            hw.stop_pulse_counter();
            if !self.depleted {
                self.depleted = true;
                sink.emit(&AppEvent::FuelDepleted);
            }
        }

        // 7. Overheat indicator, recomputed every cycle.
        hw.set_overheat_indicator(alerts.overheat);
        if alerts.overheat != self.overheat {
            self.overheat = alerts.overheat;
            sink.emit(&AppEvent::OverheatChanged(alerts.overheat));
        }

        // 8. Render
        layout::render(
            display,
            &DashboardView {
                speed_kmh: self.speed.speed_kmh(),
                fuel_percent: self.fuel.level_percent(),
                temperature_c: reading.celsius,
                fuel_alert: alerts.fuel,
            },
        );

        let report = CycleReport {
            cycle: self.cycle_count,
            raw_sample: raw,
            temperature_c: reading.celsius,
            pulse_count,
            speed_kmh: self.speed.speed_kmh(),
            fuel_percent: self.fuel.level_percent(),
            fuel_decayed: step.is_some(),
            pulse_counter_running: hw.pulse_counter_running(),
            alerts,
        };
        debug!("cycle: {:?}", report);

        let every = self.config.telemetry_every_cycles;
        if every > 0 && self.cycle_count % u64::from(every) == 0 {
            sink.emit(&AppEvent::Telemetry(report));
        }

        // 9. Pacing
        delay.delay_ms(self.config.loop_period_ms);

        report
    }

    // ── Sessions ──────────────────────────────────────────────

    /// Run cycles for as long as `latch` reads `running` at the loop
    /// entry check. Returns the number of cycles run.
    pub fn run_session<H, V, D, S>(
        &mut self,
        latch: &ToggleLatch,
        hw: &mut H,
        display: &mut V,
        delay: &mut D,
        sink: &mut S,
    ) -> u64
    where
        H: SensorPort + ActuatorPort + DecayTimerPort,
        V: DisplayPort,
        D: DelayNs,
        S: EventSink,
    {
        if !latch.is_running() {
            return 0;
        }

        self.sessions += 1;
        sink.emit(&AppEvent::SessionStarted);

        let mut cycles = 0;
        while latch.is_running() {
            self.cycle(hw, display, delay, sink);
            cycles += 1;
        }

        sink.emit(&AppEvent::SessionStopped { cycles });
        cycles
    }

    /// Alternate between idle polling and sessions while `keep_going`
    /// holds. `keep_going` is checked between sessions and idle polls.
    pub fn supervise<H, V, D, S>(
        &mut self,
        latch: &ToggleLatch,
        hw: &mut H,
        display: &mut V,
        delay: &mut D,
        sink: &mut S,
        mut keep_going: impl FnMut(&Self) -> bool,
    ) where
        H: SensorPort + ActuatorPort + DecayTimerPort,
        V: DisplayPort,
        D: DelayNs,
        S: EventSink,
    {
        while keep_going(self) {
            if latch.is_running() {
                self.run_session(latch, hw, display, delay, sink);
            } else {
                delay.delay_ms(self.config.idle_poll_ms);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn fuel_percent(&self) -> u8 {
        self.fuel.level_percent()
    }

    pub fn speed_kmh(&self) -> u32 {
        self.speed.speed_kmh()
    }

    /// Whether fuel depletion has stopped the vehicle.
    pub fn is_depleted(&self) -> bool {
        self.depleted
    }

    /// Total cycles run since construction.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Sessions started since construction.
    pub fn sessions(&self) -> u64 {
        self.sessions
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }
}
