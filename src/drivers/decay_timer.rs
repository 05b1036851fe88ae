//! One-shot 16-bit interval timer used for fuel decay.
//!
//! Models a 16-bit up-counter without auto-reload: software loads a start
//! value and sets the run bit; the count advances at the timer clock and
//! sets the overflow flag when it wraps past 0xFFFF. The flag stays set
//! until software clears it.
//!
//! On the board the count advances in hardware. On the host the simulated
//! clock calls [`DecayTimer::advance`] for the time that passed.

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

#[derive(Debug)]
pub struct DecayTimer {
    count: AtomicU16,
    running: AtomicBool,
    overflow: AtomicBool,
}

impl DecayTimer {
    pub const fn new() -> Self {
        Self {
            count: AtomicU16::new(0),
            running: AtomicBool::new(false),
            overflow: AtomicBool::new(false),
        }
    }

    /// Load the count register and set the run bit.
    pub fn load_and_start(&self, reload: u16) {
        self.count.store(reload, Ordering::Relaxed);
        self.running.store(true, Ordering::Release);
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn clear_overflow(&self) {
        self.overflow.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn overflowed(&self) -> bool {
        self.overflow.load(Ordering::Acquire)
    }

    pub fn count(&self) -> u16 {
        self.count.load(Ordering::Relaxed)
    }

    /// Advance the count by `ticks` timer clocks. No effect while stopped.
    pub fn advance(&self, ticks: u32) {
        if !self.is_running() || ticks == 0 {
            return;
        }
        let next = u32::from(self.count()) + ticks;
        if next > u32::from(u16::MAX) {
            self.overflow.store(true, Ordering::Release);
        }
        self.count.store((next & 0xFFFF) as u16, Ordering::Relaxed);
    }
}

impl Default for DecayTimer {
    fn default() -> Self {
        Self::new()
    }
}
