//! LM35-style temperature conversion.
//!
//! The raw 8-bit code is scaled to millivolts and then to whole degrees
//! Celsius. Both scale factors are 10, so the net conversion is the
//! identity: a raw code of 45 reads as 45 °C. Real hardware would need a
//! reference-voltage step between the two; the cluster keeps the
//! two-constant behaviour so existing readouts stay the same.

const MV_PER_CODE: u16 = 10;
const MV_PER_DEGREE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemperatureReading {
    pub raw: u8,
    pub millivolts: u16,
    pub celsius: u16,
}

/// Convert a raw sample to a reading.
pub const fn convert(raw: u8) -> TemperatureReading {
    let millivolts = raw as u16 * MV_PER_CODE;
    TemperatureReading {
        raw,
        millivolts,
        celsius: millivolts / MV_PER_DEGREE,
    }
}
