//! Instrument Cluster — host simulator entry point.
//!
//! Runs the control loop against the simulated board in real time.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  environment thread                                          │
//! │    button script ──▶ FallingEdge ──▶ toggle_isr_handler()    │
//! │    temperature ramp ──▶ SimBoard::set_temperature_raw        │
//! │                                                              │
//! │  main thread                                                 │
//! │    ClusterService::supervise(SYSTEM_TOGGLE, SimHardware,     │
//! │                              CharDisplay, SimClock, LogSink) │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The script switches the system on, off, and on again, so the second
//! session resumes with the fuel and speed the first one left behind.
#![deny(unused_must_use)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use log::info;

use cluster::adapters::char_display::CharDisplay;
use cluster::adapters::log_sink::LogEventSink;
use cluster::adapters::sim::SimBoard;
use cluster::app::service::ClusterService;
use cluster::config::ClusterConfig;
use cluster::drivers::toggle::{FallingEdge, SYSTEM_TOGGLE, toggle_isr_handler};

static BOARD: SimBoard = SimBoard::new();

/// Toggle button line levels: (ms since boot, level). Idle high.
const BUTTON_SCRIPT: &[(u64, bool)] = &[
    (200, false),
    (300, true),
    (6_000, false),
    (6_100, true),
    (7_000, false),
    (7_100, true),
    (14_000, false),
    (14_100, true),
];
/// Sessions to run before exiting.
const SESSIONS: u64 = 2;
const PULSE_RATE_HZ: u32 = 120;
const TEMP_START_RAW: u8 = 30;
const TEMP_MAX_RAW: u8 = 48;
const TEMP_RAMP_EVERY_MS: u64 = 500;
const ENV_TICK: Duration = Duration::from_millis(20);

// ── Environment ───────────────────────────────────────────────

/// Plays the button script and ramps the temperature input.
fn drive_environment() {
    let boot = Instant::now();
    let mut edge = FallingEdge::new(true);
    let mut script = BUTTON_SCRIPT.iter().peekable();
    let mut raw = TEMP_START_RAW;
    let mut next_ramp_ms = TEMP_RAMP_EVERY_MS;

    while script.peek().is_some() {
        let now_ms = boot.elapsed().as_millis() as u64;

        while let Some(&&(at_ms, level)) = script.peek() {
            if at_ms > now_ms {
                break;
            }
            if edge.sample(level) {
                toggle_isr_handler();
            }
            script.next();
        }

        if now_ms >= next_ramp_ms {
            raw = (raw + 1).min(TEMP_MAX_RAW);
            BOARD.set_temperature_raw(raw);
            next_ramp_ms += TEMP_RAMP_EVERY_MS;
        }

        std::thread::sleep(ENV_TICK);
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // RUST_LOG overrides; `info` otherwise.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Instrument cluster simulator v{}", env!("CARGO_PKG_VERSION"));

    let mut service =
        ClusterService::try_new(ClusterConfig::default()).context("invalid cluster configuration")?;

    BOARD.set_realtime(true);
    BOARD.set_pulse_rate_hz(PULSE_RATE_HZ);
    BOARD.set_temperature_raw(TEMP_START_RAW);

    let mut hw = BOARD.hardware(service.config());
    let mut lcd = CharDisplay::new();
    let mut sink = LogEventSink::new();
    let mut delay = BOARD.clock();

    let environment = std::thread::Builder::new()
        .name("environment".into())
        .spawn(drive_environment)
        .context("spawning environment thread")?;

    info!("System ready. Waiting for toggle.");
    service.supervise(
        &SYSTEM_TOGGLE,
        &mut hw,
        &mut lcd,
        &mut delay,
        &mut sink,
        |svc| svc.sessions() < SESSIONS,
    );

    environment
        .join()
        .map_err(|_| anyhow!("environment thread panicked"))?;

    info!("LCD | {}", lcd.line(1));
    info!("LCD | {}", lcd.line(2));
    info!(
        "Done: {} cycles, fuel={}%, speed={}km/h, depleted={}",
        service.cycle_count(),
        service.fuel_percent(),
        service.speed_kmh(),
        service.is_depleted()
    );
    Ok(())
}
