//! Outbound application events.
//!
//! The [`ClusterService`](super::service::ClusterService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side decide what to do with them.

use serde::Serialize;

use crate::app::alerts::{AlertFlags, FuelAlert};
use crate::error::SensorError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The toggle latch read `running` and a session began.
    SessionStarted,

    /// The latch read `stopped` at the loop entry check.
    SessionStopped { cycles: u64 },

    /// The decay timer expired and fuel dropped by one step.
    FuelDecayed { from: u8, to: u8 },

    /// The fuel alert band changed.
    FuelAlertChanged { from: FuelAlert, to: FuelAlert },

    /// Fuel dropped below the depletion threshold: speed forced to zero
    /// and the pulse counter stopped. Emitted once per process.
    FuelDepleted,

    /// The overheat indicator was switched on (`true`) or off.
    OverheatChanged(bool),

    /// The analog sampler failed; the previous sample was reused.
    SampleFailed(SensorError),

    /// Periodic telemetry snapshot.
    Telemetry(CycleReport),
}

/// Everything one control cycle measured and displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CycleReport {
    /// 1-based cycle number since the service was created.
    pub cycle: u64,
    pub raw_sample: u8,
    pub temperature_c: u16,
    /// Observational only; not used by the speed model.
    pub pulse_count: u16,
    pub speed_kmh: u32,
    pub fuel_percent: u8,
    /// True if fuel dropped a step during this cycle.
    pub fuel_decayed: bool,
    pub pulse_counter_running: bool,
    pub alerts: AlertFlags,
}
