//! Fuel and speed models.

pub mod fuel;
pub mod speed;
