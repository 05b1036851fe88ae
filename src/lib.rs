//! Instrument-cluster firmware library.
//!
//! Samples an analog temperature input, counts rotation pulses, models
//! fuel consumption on a one-shot timer, and renders the readings plus
//! alerts on a 16x2 character display. A single external edge interrupt
//! toggles the whole system on and off.
//!
//! The control loop ([`app::service::ClusterService`]) only talks to port
//! traits; [`adapters`] provides the board wiring and a simulated board
//! for host runs.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod layout;
pub mod sensors;
