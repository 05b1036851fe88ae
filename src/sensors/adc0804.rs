//! ADC0804 analog sampler driver.
//!
//! Drives the three-wire handshake of a parallel-output 8-bit ADC:
//!
//! | Signal | Direction | Meaning                                         |
//! |--------|-----------|-------------------------------------------------|
//! | WR     | out       | falling-then-rising edge starts a conversion   |
//! | INTR   | in        | high while converting, low once complete       |
//! | RD     | out       | low exposes the result on the data bus          |
//! | DB0-7  | in        | 8-bit parallel result                           |
//!
//! ## Waiting for completion
//!
//! With [`ConversionWait::Blocking`] the driver spins on INTR with no
//! timeout: a device that never completes stalls the caller forever, as on
//! the reference board. [`ConversionWait::Bounded`] polls at a fixed
//! interval and gives up with [`SensorError::ConversionTimeout`].
//!
//! Generic over `embedded-hal` pins and delay so the same driver runs on
//! real GPIO and on the simulated board.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::AnalogSampler;
use crate::config::ClusterConfig;
use crate::error::SensorError;

/// 8-bit parallel data bus.
pub trait DataBus {
    fn read(&mut self) -> u8;
}

/// How [`Adc0804::start_conversion`] waits for INTR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionWait {
    /// Busy-wait with no timeout.
    Blocking,
    /// Poll every `poll_us`, give up after `timeout_us`.
    Bounded { timeout_us: u32, poll_us: u32 },
}

impl ConversionWait {
    pub fn from_config(config: &ClusterConfig) -> Self {
        match config.conversion_timeout_us {
            None => Self::Blocking,
            Some(timeout_us) => Self::Bounded {
                timeout_us,
                poll_us: config.conversion_poll_us.max(1),
            },
        }
    }
}

pub struct Adc0804<WR, RD, INTR, BUS, D> {
    wr: WR,
    rd: RD,
    intr: INTR,
    bus: BUS,
    delay: D,
    settle_ms: u32,
    wait: ConversionWait,
}

impl<WR, RD, INTR, BUS, D> Adc0804<WR, RD, INTR, BUS, D>
where
    WR: OutputPin,
    RD: OutputPin,
    INTR: InputPin,
    BUS: DataBus,
    D: DelayNs,
{
    pub fn new(wr: WR, rd: RD, intr: INTR, bus: BUS, delay: D, config: &ClusterConfig) -> Self {
        Self {
            wr,
            rd,
            intr,
            bus,
            delay,
            settle_ms: config.settle_delay_ms,
            wait: ConversionWait::from_config(config),
        }
    }

    pub fn wait_policy(&self) -> ConversionWait {
        self.wait
    }

    /// Give the pins, bus and delay back.
    pub fn release(self) -> (WR, RD, INTR, BUS, D) {
        (self.wr, self.rd, self.intr, self.bus, self.delay)
    }

    fn conversion_done(&mut self) -> Result<bool, SensorError> {
        self.intr.is_low().map_err(|_| SensorError::GpioFault)
    }

    fn wait_for_completion(&mut self) -> Result<(), SensorError> {
        match self.wait {
            ConversionWait::Blocking => {
                while !self.conversion_done()? {
                    core::hint::spin_loop();
                }
                Ok(())
            }
            ConversionWait::Bounded {
                timeout_us,
                poll_us,
            } => {
                let mut waited_us: u32 = 0;
                loop {
                    if self.conversion_done()? {
                        return Ok(());
                    }
                    if waited_us >= timeout_us {
                        log::warn!("adc0804: INTR still high after {}us", waited_us);
                        return Err(SensorError::ConversionTimeout);
                    }
                    self.delay.delay_us(poll_us);
                    waited_us = waited_us.saturating_add(poll_us);
                }
            }
        }
    }
}

impl<WR, RD, INTR, BUS, D> AnalogSampler for Adc0804<WR, RD, INTR, BUS, D>
where
    WR: OutputPin,
    RD: OutputPin,
    INTR: InputPin,
    BUS: DataBus,
    D: DelayNs,
{
    fn start_conversion(&mut self) -> Result<(), SensorError> {
        self.wr.set_low().map_err(|_| SensorError::GpioFault)?;
        self.wr.set_high().map_err(|_| SensorError::GpioFault)?;
        self.wait_for_completion()
    }

    fn read_sample(&mut self) -> Result<u8, SensorError> {
        self.rd.set_high().map_err(|_| SensorError::GpioFault)?;
        self.rd.set_low().map_err(|_| SensorError::GpioFault)?;
        let raw = self.bus.read();
        self.delay.delay_ms(self.settle_ms);
        self.rd.set_high().map_err(|_| SensorError::GpioFault)?;
        Ok(raw)
    }
}
