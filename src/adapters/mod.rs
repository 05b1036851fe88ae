//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `hardware`     | SensorPort         | ADC sampler, pulse counter   |
//! |                | ActuatorPort       | pulse counter, indicator pin |
//! |                | DecayTimerPort     | decay timer                  |
//! | `char_display` | DisplayPort        | 16x2 frame buffer            |
//! | `log_sink`     | EventSink          | `log` output                 |
//! | `sim`          | pins, bus, DelayNs | simulated board              |

pub mod char_display;
pub mod hardware;
pub mod log_sink;
pub mod sim;
