//! Application core — the control loop and its policy, zero I/O.
//!
//! This module contains the business rules of the instrument cluster:
//! cycle orchestration, alert evaluation, and session handling. All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod alerts;
pub mod events;
pub mod ports;
pub mod service;
