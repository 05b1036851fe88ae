//! Register-level drivers for the interrupt latch, counter and timer.

pub mod decay_timer;
pub mod pulse_counter;
pub mod toggle;
