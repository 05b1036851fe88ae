//! System on/off toggle latch.
//!
//! ## Hardware
//!
//! Momentary switch on an edge-triggered external interrupt line. Every
//! falling edge inverts the latch; there is no debounce and no error path.
//!
//! The ISR only flips the bit. The control loop reads it once at the top
//! of every cycle, so switching off mid-cycle lets the current cycle run
//! to completion and only prevents the next one from starting.

use core::sync::atomic::{AtomicBool, Ordering};

/// Process-wide latch driven by the toggle interrupt.
pub static SYSTEM_TOGGLE: ToggleLatch = ToggleLatch::new();

/// ISR handler — register this on the toggle line's falling edge.
/// Lock-free, safe to call from interrupt context.
pub fn toggle_isr_handler() {
    SYSTEM_TOGGLE.on_falling_edge();
}

/// Single-bit run/stop latch shared between one ISR and the control loop.
#[derive(Debug)]
pub struct ToggleLatch {
    running: AtomicBool,
}

impl ToggleLatch {
    /// Starts inactive.
    pub const fn new() -> Self {
        Self {
            running: AtomicBool::new(false),
        }
    }

    /// Invert the latch. Called from the edge ISR.
    pub fn on_falling_edge(&self) {
        self.running.fetch_xor(true, Ordering::AcqRel);
    }

    /// Loop-entry check.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl Default for ToggleLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Qualifies falling edges on a sampled line, the way the interrupt
/// controller does in edge-triggered mode.
#[derive(Debug, Clone, Copy)]
pub struct FallingEdge {
    last_high: bool,
}

impl FallingEdge {
    /// `idle_high` is the line level at rest (pulled up).
    pub const fn new(idle_high: bool) -> Self {
        Self {
            last_high: idle_high,
        }
    }

    /// Feed the current level; returns `true` on a high→low transition.
    pub fn sample(&mut self, high: bool) -> bool {
        let fell = self.last_high && !high;
        self.last_high = high;
        fell
    }
}
