//! Sensor subsystem — the analog sampler and the temperature model.

pub mod adc0804;
pub mod temperature;

use crate::error::SensorError;

/// Capability of an external conversion device: start a conversion, then
/// read the result.
pub trait AnalogSampler {
    /// Start a conversion and wait until the device signals completion.
    fn start_conversion(&mut self) -> Result<(), SensorError>;

    /// Strobe the result onto the bus, capture it, and hold the settling
    /// delay before releasing the strobe. Any 8-bit value is valid.
    fn read_sample(&mut self) -> Result<u8, SensorError>;

    /// Both steps back to back.
    fn sample(&mut self) -> Result<u8, SensorError> {
        self.start_conversion()?;
        self.read_sample()
    }
}
