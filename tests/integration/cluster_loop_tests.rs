//! Integration tests for the ClusterService control cycle against mock
//! hardware and the in-memory character display.

use super::mock_hw::{HwCall, MockDelay, MockHardware, RecordingSink};

use cluster::adapters::char_display::CharDisplay;
use cluster::app::alerts::FuelAlert;
use cluster::app::events::{AppEvent, CycleReport};
use cluster::app::service::ClusterService;
use cluster::config::ClusterConfig;
use cluster::error::SensorError;

struct Rig {
    svc: ClusterService,
    hw: MockHardware,
    lcd: CharDisplay,
    delay: MockDelay,
    sink: RecordingSink,
}

impl Rig {
    fn new(raw: u8) -> Self {
        Self {
            svc: ClusterService::new(ClusterConfig::default()),
            hw: MockHardware::with_raw(raw),
            lcd: CharDisplay::new(),
            delay: MockDelay::new(),
            sink: RecordingSink::new(),
        }
    }

    fn cycle(&mut self) -> CycleReport {
        self.svc
            .cycle(&mut self.hw, &mut self.lcd, &mut self.delay, &mut self.sink)
    }

    /// One cycle that observes an expired decay timer.
    fn cycle_expired(&mut self) -> CycleReport {
        self.hw.expire_timer();
        self.cycle()
    }
}

// ── Fuel ──────────────────────────────────────────────────────

#[test]
fn fuel_holds_until_timer_expires() {
    let mut rig = Rig::new(25);
    for _ in 0..5 {
        let report = rig.cycle();
        assert_eq!(report.fuel_percent, 100);
        assert!(!report.fuel_decayed);
    }
    assert_eq!(rig.hw.count(&HwCall::ArmTimer(0xFE17)), 5, "re-armed every cycle");
    assert_eq!(rig.hw.count(&HwCall::ClearTimer), 0);
}

#[test]
fn each_expiry_drops_one_step_and_clears_timer() {
    let mut rig = Rig::new(25);
    let report = rig.cycle_expired();
    assert_eq!(report.fuel_percent, 90);
    assert!(report.fuel_decayed);
    assert!(!rig.hw.timer_overflow);
    assert!(!rig.hw.timer_running);
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::FuelDecayed { from: 100, to: 90 }));
}

#[test]
fn fuel_walks_through_low_band_to_depletion() {
    let mut rig = Rig::new(25);

    for _ in 0..8 {
        rig.cycle_expired();
    }
    assert_eq!(rig.svc.fuel_percent(), 20);
    let report = rig.cycle();
    assert_eq!(report.alerts.fuel, FuelAlert::Low);
    assert!(!report.alerts.fuel_depleted_stop());

    let report = rig.cycle_expired();
    assert_eq!(report.fuel_percent, 10);
    assert_eq!(report.alerts.fuel, FuelAlert::Low);

    let report = rig.cycle_expired();
    assert_eq!(report.fuel_percent, 0);
    assert_eq!(report.alerts.fuel, FuelAlert::Depleted);
    assert!(rig.svc.is_depleted());

    // Frozen from here on.
    for _ in 0..5 {
        assert_eq!(rig.cycle_expired().fuel_percent, 0);
    }

    let changes: Vec<_> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::FuelAlertChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (FuelAlert::None, FuelAlert::Low),
            (FuelAlert::Low, FuelAlert::Depleted)
        ]
    );
}

#[test]
fn timer_is_never_armed_after_depletion() {
    let mut rig = Rig::new(25);
    for _ in 0..10 {
        rig.cycle_expired();
    }
    assert!(rig.svc.is_depleted());

    rig.hw.clear_calls();
    for _ in 0..3 {
        rig.cycle();
    }
    assert!(
        !rig.hw.calls.iter().any(|c| matches!(c, HwCall::ArmTimer(_))),
        "depleted gauge must leave the timer alone"
    );
}

// ── Speed and depletion ───────────────────────────────────────

#[test]
fn speed_climbs_five_per_cycle_from_reference_start() {
    let mut rig = Rig::new(25);
    assert_eq!(rig.cycle().speed_kmh, 21);
    rig.cycle();
    assert_eq!(rig.cycle().speed_kmh, 31);
}

#[test]
fn depletion_forces_zero_speed_and_stopped_counter_every_cycle() {
    let mut rig = Rig::new(25);
    for _ in 0..9 {
        assert!(rig.cycle_expired().speed_kmh > 0);
    }
    rig.hw.clear_calls();

    for _ in 0..4 {
        let report = rig.cycle_expired();
        assert_eq!(report.speed_kmh, 0);
        assert!(!report.pulse_counter_running);
    }
    assert_eq!(rig.hw.count(&HwCall::StopPulseCounter), 4);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::FuelDepleted)),
        1,
        "depletion is announced once"
    );
}

// ── Temperature and overheat ──────────────────────────────────

#[test]
fn overheat_indicator_follows_temperature_each_cycle() {
    let mut rig = Rig::new(45);
    let report = rig.cycle();
    assert_eq!(report.temperature_c, 45);
    assert!(report.alerts.overheat_warning());
    assert!(rig.hw.indicator_on());

    rig.hw.raw = 40;
    let report = rig.cycle();
    assert!(!report.alerts.overheat);
    assert!(!rig.hw.indicator_on());

    rig.hw.raw = 41;
    rig.cycle();
    assert!(rig.hw.indicator_on());

    assert_eq!(rig.hw.count(&HwCall::SetIndicator(true)), 2);
    assert_eq!(rig.hw.count(&HwCall::SetIndicator(false)), 1);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::OverheatChanged(_))),
        3
    );
}

#[test]
fn failed_sample_reuses_previous_reading() {
    let mut rig = Rig::new(25);
    rig.hw.queued.push_back(Ok(33));
    rig.hw.queued.push_back(Err(SensorError::ConversionTimeout));

    assert_eq!(rig.cycle().raw_sample, 33);
    let report = rig.cycle();
    assert_eq!(report.raw_sample, 33);
    assert_eq!(report.temperature_c, 33);
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::SampleFailed(SensorError::ConversionTimeout)));

    // Next good sample is used again.
    assert_eq!(rig.cycle().raw_sample, 25);
}

#[test]
fn pulse_count_is_reported_but_does_not_drive_speed() {
    let mut slow = Rig::new(25);
    let mut fast = Rig::new(25);
    fast.hw.pulses = 4000;

    let a = slow.cycle();
    let b = fast.cycle();
    assert_eq!(b.pulse_count, 4000);
    assert_eq!(a.speed_kmh, b.speed_kmh);
}

// ── Display ───────────────────────────────────────────────────

#[test]
fn renders_readings_on_second_row() {
    let mut rig = Rig::new(25);
    rig.cycle_expired();
    assert_eq!(rig.lcd.line(1).as_str(), "TERMINAL        ");
    assert_eq!(rig.lcd.line(2).as_str(), "s:21 F:90% T:25c");
}

#[test]
fn small_values_are_zero_padded() {
    let mut rig = Rig::new(7);
    rig.cycle_expired();
    assert_eq!(rig.lcd.line(2).as_str(), "s:21 F:90% T:07c");
}

#[test]
fn low_fuel_text_appears_and_clears() {
    let mut rig = Rig::new(25);
    for _ in 0..8 {
        rig.cycle_expired();
    }
    assert_eq!(rig.lcd.line(1).as_str(), "TERMINAL LowFuel");

    for _ in 0..2 {
        rig.cycle_expired();
    }
    // Depleted keeps the warning up and shows the stopped vehicle.
    assert_eq!(rig.lcd.line(1).as_str(), "TERMINAL LowFuel");
    assert_eq!(rig.lcd.line(2).as_str(), "s:00 F:00% T:25c");
}

#[test]
fn three_digit_speed_leaves_no_residue_after_depletion() {
    let mut rig = Rig::new(25);
    for _ in 0..10 {
        rig.cycle();
    }
    for _ in 0..9 {
        rig.cycle_expired();
    }
    assert_eq!(rig.svc.speed_kmh(), 111);
    assert_eq!(rig.lcd.line(2).as_str(), "s:111F:10% T:25c");

    rig.cycle_expired();
    assert_eq!(rig.svc.speed_kmh(), 0);
    assert_eq!(rig.lcd.line(2).as_str(), "s:00 F:00% T:25c");
}

#[test]
fn full_tank_percent_sign_overwrites_last_digit() {
    let mut rig = Rig::new(25);
    rig.cycle();
    assert_eq!(rig.lcd.line(2).as_str(), "s:21 F:10% T:25c");
}

// ── Pacing and telemetry ──────────────────────────────────────

#[test]
fn every_cycle_ends_with_loop_period_delay() {
    let mut rig = Rig::new(25);
    for _ in 0..4 {
        rig.cycle();
    }
    assert_eq!(rig.delay.ms_calls, vec![100; 4]);
    assert_eq!(rig.delay.total_ms(), 400);
}

#[test]
fn telemetry_is_sampled_every_configured_cycles() {
    let mut rig = Rig::new(25);
    for _ in 0..25 {
        rig.cycle();
    }
    let cycles: Vec<u64> = rig
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Telemetry(r) => Some(r.cycle),
            _ => None,
        })
        .collect();
    assert_eq!(cycles, vec![10, 20]);
}
