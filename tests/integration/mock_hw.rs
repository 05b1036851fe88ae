//! Mock adapters for integration tests.
//!
//! Records every hardware call so tests can assert on the full command
//! history without a board. The decay timer is manual: tests decide when
//! it expires.

use std::collections::VecDeque;

use cluster::app::events::AppEvent;
use cluster::app::ports::{ActuatorPort, DecayTimerPort, EventSink, SensorPort};
use cluster::error::SensorError;
use embedded_hal::delay::DelayNs;

// ── Hardware call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum HwCall {
    Sample,
    ReadPulses,
    StopPulseCounter,
    SetIndicator(bool),
    ArmTimer(u16),
    ClearTimer,
}

// ── MockHardware ──────────────────────────────────────────────

type SampleHook = Box<dyn FnMut(u64)>;

pub struct MockHardware {
    pub calls: Vec<HwCall>,
    /// Returned when `queued` is empty.
    pub raw: u8,
    /// One-shot sample results, consumed front first.
    pub queued: VecDeque<Result<u8, SensorError>>,
    pub pulses: u16,
    pub counter_running: bool,
    pub timer_running: bool,
    pub timer_overflow: bool,
    pub samples: u64,
    on_sample: Option<SampleHook>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            raw: 25,
            queued: VecDeque::new(),
            pulses: 0,
            counter_running: true,
            timer_running: false,
            timer_overflow: false,
            samples: 0,
            on_sample: None,
        }
    }

    pub fn with_raw(raw: u8) -> Self {
        Self {
            raw,
            ..Self::new()
        }
    }

    /// Run `hook` with the 1-based sample number each time a sample is
    /// taken, before the result is returned.
    pub fn on_sample(&mut self, hook: impl FnMut(u64) + 'static) {
        self.on_sample = Some(Box::new(hook));
    }

    /// Flag the decay timer as overflowed, as its interrupt would.
    pub fn expire_timer(&mut self) {
        self.timer_overflow = true;
    }

    pub fn count(&self, call: &HwCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn indicator_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                HwCall::SetIndicator(on) => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn sample_temperature(&mut self) -> Result<u8, SensorError> {
        self.calls.push(HwCall::Sample);
        self.samples += 1;
        if let Some(hook) = self.on_sample.as_mut() {
            hook(self.samples);
        }
        self.queued.pop_front().unwrap_or(Ok(self.raw))
    }

    fn pulse_count(&mut self) -> u16 {
        self.calls.push(HwCall::ReadPulses);
        self.pulses
    }
}

impl ActuatorPort for MockHardware {
    fn stop_pulse_counter(&mut self) {
        self.calls.push(HwCall::StopPulseCounter);
        self.counter_running = false;
    }

    fn pulse_counter_running(&self) -> bool {
        self.counter_running
    }

    fn set_overheat_indicator(&mut self, on: bool) {
        self.calls.push(HwCall::SetIndicator(on));
    }
}

impl DecayTimerPort for MockHardware {
    fn arm(&mut self, reload: u16) {
        self.calls.push(HwCall::ArmTimer(reload));
        self.timer_running = true;
    }

    fn overflowed(&self) -> bool {
        self.timer_overflow
    }

    fn clear_and_stop(&mut self) {
        self.calls.push(HwCall::ClearTimer);
        self.timer_overflow = false;
        self.timer_running = false;
    }

    fn is_running(&self) -> bool {
        self.timer_running
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Accumulates requested delay without sleeping.
#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
    pub ms_calls: Vec<u32>,
}

#[allow(dead_code)]
impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.ms_calls.push(ms);
        self.total_ns += u64::from(ms) * 1_000_000;
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Collects emitted events for assertion.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
