//! External pulse counter (16-bit timer in counter mode).
//!
//! Each edge on the count input increments a free-running 16-bit register
//! while the counter is running. The register is exposed as two bytes and
//! reads are non-destructive: nothing resets it except wrap-around.
//!
//! The edge handler and the control loop run in different contexts, so
//! the register is an atomic.

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

#[derive(Debug)]
pub struct PulseCounter {
    count: AtomicU16,
    running: AtomicBool,
}

impl PulseCounter {
    pub const fn new() -> Self {
        Self {
            count: AtomicU16::new(0),
            running: AtomicBool::new(false),
        }
    }

    pub fn start(&self) {
        self.running.store(true, Ordering::Release);
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Count-input edge. Ignored while stopped; wraps at 16 bits.
    pub fn on_pulse(&self) {
        if self.is_running() {
            self.count.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Current register value as (high, low) bytes.
    pub fn read_halves(&self) -> (u8, u8) {
        let [high, low] = self.count.load(Ordering::Relaxed).to_be_bytes();
        (high, low)
    }
}

impl Default for PulseCounter {
    fn default() -> Self {
        Self::new()
    }
}
