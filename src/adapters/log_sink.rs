//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events
//! through the `log` facade. Telemetry goes out as one JSON object per
//! line so it can be scraped from the console.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(report) => match serde_json::to_string(report) {
                Ok(json) => info!("TELEM | {}", json),
                Err(e) => warn!("TELEM | encode failed: {}", e),
            },
            AppEvent::SessionStarted => {
                info!("SESSION | started");
            }
            AppEvent::SessionStopped { cycles } => {
                info!("SESSION | stopped after {} cycles", cycles);
            }
            AppEvent::FuelDecayed { from, to } => {
                info!("FUEL | {}% -> {}%", from, to);
            }
            AppEvent::FuelAlertChanged { from, to } => {
                info!("FUEL | alert {:?} -> {:?}", from, to);
            }
            AppEvent::FuelDepleted => {
                warn!("FUEL | depleted, vehicle stopped, pulse counter halted");
            }
            AppEvent::OverheatChanged(on) => {
                if *on {
                    warn!("TEMP | overheat indicator ON");
                } else {
                    info!("TEMP | overheat indicator OFF");
                }
            }
            AppEvent::SampleFailed(e) => {
                warn!("ADC | sample failed ({}), reusing previous value", e);
            }
        }
    }
}
