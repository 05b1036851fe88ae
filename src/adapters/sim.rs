//! Simulated board for host runs and tests.
//!
//! Stands in for the ADC0804, the count input, the decay timer clock and
//! the indicator LED. Everything is atomics behind `&self`, so the board
//! can live in a `static` and be poked from another thread (toggle button,
//! temperature profile) while the control loop runs.
//!
//! ```text
//!   SimClock::delay_* ──▶ elapsed time ──▶ DecayTimer::advance
//!                                     └──▶ PulseCounter::on_pulse (rate)
//!   SimWr edge ──▶ conversion (N INTR polls) ──▶ latch input ──▶ SimBus
//! ```

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, AtomicU64, Ordering};

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::adapters::hardware::HardwareAdapter;
use crate::config::ClusterConfig;
use crate::drivers::decay_timer::DecayTimer;
use crate::drivers::pulse_counter::PulseCounter;
use crate::sensors::adc0804::{Adc0804, DataBus};

/// Completion-line polls a conversion takes unless told otherwise.
const DEFAULT_CONVERSION_POLLS: u32 = 3;
const US_PER_SEC: u64 = 1_000_000;

pub struct SimBoard {
    pub timer: DecayTimer,
    pub counter: PulseCounter,

    // ADC0804
    adc_input: AtomicU8,
    adc_latched: AtomicU8,
    wr_low: AtomicBool,
    rd_low: AtomicBool,
    converting: AtomicBool,
    busy_polls_left: AtomicU32,
    conversion_polls: AtomicU32,
    adc_hung: AtomicBool,
    conversions: AtomicU32,

    // Indicator
    led_on: AtomicBool,

    /// Delays also sleep the calling thread.
    realtime: AtomicBool,

    // Clock
    elapsed_us: AtomicU64,
    timer_clock_hz: AtomicU32,
    timer_carry: AtomicU64,
    pulse_rate_hz: AtomicU32,
    pulse_carry: AtomicU64,
}

impl SimBoard {
    pub const fn new() -> Self {
        Self {
            timer: DecayTimer::new(),
            counter: PulseCounter::new(),
            adc_input: AtomicU8::new(25),
            adc_latched: AtomicU8::new(0),
            wr_low: AtomicBool::new(false),
            rd_low: AtomicBool::new(false),
            converting: AtomicBool::new(false),
            busy_polls_left: AtomicU32::new(0),
            conversion_polls: AtomicU32::new(DEFAULT_CONVERSION_POLLS),
            adc_hung: AtomicBool::new(false),
            conversions: AtomicU32::new(0),
            led_on: AtomicBool::new(false),
            realtime: AtomicBool::new(false),
            elapsed_us: AtomicU64::new(0),
            timer_clock_hz: AtomicU32::new(1_000_000),
            timer_carry: AtomicU64::new(0),
            pulse_rate_hz: AtomicU32::new(0),
            pulse_carry: AtomicU64::new(0),
        }
    }

    // ── Stimulus ──────────────────────────────────────────────

    /// Raw code the next conversion will latch.
    pub fn set_temperature_raw(&self, raw: u8) {
        self.adc_input.store(raw, Ordering::Relaxed);
    }

    /// Number of INTR polls each conversion stays busy for.
    pub fn set_conversion_polls(&self, polls: u32) {
        self.conversion_polls.store(polls, Ordering::Relaxed);
    }

    /// A hung converter never releases INTR.
    pub fn set_adc_hung(&self, hung: bool) {
        self.adc_hung.store(hung, Ordering::Relaxed);
    }

    /// Pulses per second on the count input.
    pub fn set_pulse_rate_hz(&self, hz: u32) {
        self.pulse_rate_hz.store(hz, Ordering::Relaxed);
    }

    /// Make every delay also sleep for the same wall-clock time.
    pub fn set_realtime(&self, on: bool) {
        self.realtime.store(on, Ordering::Relaxed);
    }

    pub fn set_timer_clock_hz(&self, hz: u32) {
        self.timer_clock_hz.store(hz, Ordering::Relaxed);
    }

    // ── Observation ───────────────────────────────────────────

    pub fn indicator_on(&self) -> bool {
        self.led_on.load(Ordering::Relaxed)
    }

    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us.load(Ordering::Relaxed)
    }

    pub fn conversions(&self) -> u32 {
        self.conversions.load(Ordering::Relaxed)
    }

    // ── Wiring ────────────────────────────────────────────────

    pub fn clock(&self) -> SimClock<'_> {
        SimClock { board: self }
    }

    pub fn adc(&self, config: &ClusterConfig) -> SimAdc<'_> {
        Adc0804::new(
            SimWr(self),
            SimRd(self),
            SimIntr(self),
            SimBus(self),
            self.clock(),
            config,
        )
    }

    /// Board peripherals behind the port traits.
    pub fn hardware(&self, config: &ClusterConfig) -> SimHardware<'_> {
        self.set_timer_clock_hz(config.timer_clock_hz);
        HardwareAdapter::new(self.adc(config), &self.counter, &self.timer, SimLed(self))
    }

    /// Let `us` microseconds of board time pass.
    pub fn advance_us(&self, us: u64) {
        self.elapsed_us.fetch_add(us, Ordering::Relaxed);

        let clock_hz = u64::from(self.timer_clock_hz.load(Ordering::Relaxed));
        let ticks = scale(&self.timer_carry, us, clock_hz);
        self.timer.advance(ticks.min(u64::from(u32::MAX)) as u32);

        let rate_hz = u64::from(self.pulse_rate_hz.load(Ordering::Relaxed));
        for _ in 0..scale(&self.pulse_carry, us, rate_hz) {
            self.counter.on_pulse();
        }
    }

    fn wr_edge(&self, high: bool) {
        let was_low = self.wr_low.swap(!high, Ordering::AcqRel);
        if high && was_low {
            self.busy_polls_left
                .store(self.conversion_polls.load(Ordering::Relaxed), Ordering::Relaxed);
            self.converting.store(true, Ordering::Release);
            self.conversions.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn intr_high(&self) -> bool {
        if !self.converting.load(Ordering::Acquire) {
            return false;
        }
        if self.adc_hung.load(Ordering::Relaxed) {
            return true;
        }
        let left = self.busy_polls_left.load(Ordering::Relaxed);
        if left == 0 {
            self.adc_latched
                .store(self.adc_input.load(Ordering::Relaxed), Ordering::Relaxed);
            self.converting.store(false, Ordering::Release);
            return false;
        }
        self.busy_polls_left.store(left - 1, Ordering::Relaxed);
        true
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

/// Whole events produced by `us` at `hz`, carrying the remainder.
/// Saturates at `u64::MAX` events.
fn scale(carry: &AtomicU64, us: u64, hz: u64) -> u64 {
    let total = u128::from(carry.load(Ordering::Relaxed)) + u128::from(us) * u128::from(hz);
    let per_sec = u128::from(US_PER_SEC);
    carry.store((total % per_sec) as u64, Ordering::Relaxed);
    u64::try_from(total / per_sec).unwrap_or(u64::MAX)
}

pub type SimAdc<'a> = Adc0804<SimWr<'a>, SimRd<'a>, SimIntr<'a>, SimBus<'a>, SimClock<'a>>;
pub type SimHardware<'a> = HardwareAdapter<'a, SimAdc<'a>, SimLed<'a>>;

// ── Pins ──────────────────────────────────────────────────────

/// ADC write strobe.
pub struct SimWr<'a>(&'a SimBoard);
/// ADC read strobe.
pub struct SimRd<'a>(&'a SimBoard);
/// ADC completion line.
pub struct SimIntr<'a>(&'a SimBoard);
/// ADC parallel data bus.
pub struct SimBus<'a>(&'a SimBoard);
/// Overheat indicator LED.
pub struct SimLed<'a>(&'a SimBoard);

impl ErrorType for SimWr<'_> {
    type Error = Infallible;
}

impl OutputPin for SimWr<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.wr_edge(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.wr_edge(true);
        Ok(())
    }
}

impl ErrorType for SimRd<'_> {
    type Error = Infallible;
}

impl OutputPin for SimRd<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.rd_low.store(true, Ordering::Release);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.rd_low.store(false, Ordering::Release);
        Ok(())
    }
}

impl ErrorType for SimIntr<'_> {
    type Error = Infallible;
}

impl InputPin for SimIntr<'_> {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.intr_high())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.intr_high())
    }
}

impl DataBus for SimBus<'_> {
    fn read(&mut self) -> u8 {
        if self.0.rd_low.load(Ordering::Acquire) {
            self.0.adc_latched.load(Ordering::Relaxed)
        } else {
            // Outputs tri-stated; the bus floats high.
            0xFF
        }
    }
}

impl ErrorType for SimLed<'_> {
    type Error = Infallible;
}

impl OutputPin for SimLed<'_> {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.led_on.store(false, Ordering::Relaxed);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.led_on.store(true, Ordering::Relaxed);
        Ok(())
    }
}

// ── Clock ─────────────────────────────────────────────────────

/// Delay provider that advances board time. On a realtime board it also
/// sleeps the calling thread for the same duration.
#[derive(Clone, Copy)]
pub struct SimClock<'a> {
    board: &'a SimBoard,
}

impl SimClock<'_> {
    fn wait_us(&mut self, us: u64) {
        self.board.advance_us(us);
        if self.board.realtime.load(Ordering::Relaxed) {
            std::thread::sleep(std::time::Duration::from_micros(us));
        }
    }
}

impl DelayNs for SimClock<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.wait_us(u64::from(ns.div_ceil(1000)));
    }

    fn delay_us(&mut self, us: u32) {
        self.wait_us(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.wait_us(u64::from(ms) * 1000);
    }
}
