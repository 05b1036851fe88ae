//! Fixed 16x2 display layout.
//!
//! Single source of truth for where each reading lands. Rows and columns
//! are 1-based.
//!
//! ```text
//!   col  1234567890123456
//!   row1 TERMINAL LowFuel
//!   row2 s:16 F:90% T:25c
//! ```

use crate::app::alerts::FuelAlert;
use crate::app::ports::DisplayPort;

pub const HEADER: (u8, u8) = (1, 1);
pub const HEADER_TEXT: &str = "TERMINAL";

pub const FUEL_ALERT: (u8, u8) = (1, 10);
pub const FUEL_ALERT_TEXT: &str = "LowFuel";
const FUEL_ALERT_BLANK: &str = "       ";

pub const SPEED_LABEL: (u8, u8) = (2, 1);
pub const SPEED_VALUE: (u8, u8) = (2, 3);
/// Cols 3-5: room for a three-digit speed before the fuel label.
const SPEED_BLANK: &str = "   ";

pub const FUEL_LABEL: (u8, u8) = (2, 6);
pub const FUEL_VALUE: (u8, u8) = (2, 8);
pub const FUEL_UNIT: (u8, u8) = (2, 10);

pub const TEMP_LABEL: (u8, u8) = (2, 12);
pub const TEMP_VALUE: (u8, u8) = (2, 14);
pub const TEMP_UNIT: (u8, u8) = (2, 16);

/// Minimum digits for every numeric field.
pub const VALUE_WIDTH: u8 = 2;

/// Values shown on one refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardView {
    pub speed_kmh: u32,
    pub fuel_percent: u8,
    pub temperature_c: u16,
    pub fuel_alert: FuelAlert,
}

/// Draw a full frame.
pub fn render(display: &mut impl DisplayPort, view: &DashboardView) {
    let (row, col) = FUEL_ALERT;
    match view.fuel_alert {
        FuelAlert::Low | FuelAlert::Depleted => display.set_text(row, col, FUEL_ALERT_TEXT),
        FuelAlert::None => display.set_text(row, col, FUEL_ALERT_BLANK),
    }

    display.set_text(HEADER.0, HEADER.1, HEADER_TEXT);

    display.set_text(SPEED_LABEL.0, SPEED_LABEL.1, "s:");
    // A shorter value must not leave digits of a longer one behind.
    display.set_text(SPEED_VALUE.0, SPEED_VALUE.1, SPEED_BLANK);
    display.set_number(SPEED_VALUE.0, SPEED_VALUE.1, view.speed_kmh, VALUE_WIDTH);

    display.set_text(FUEL_LABEL.0, FUEL_LABEL.1, "F:");
    display.set_number(
        FUEL_VALUE.0,
        FUEL_VALUE.1,
        u32::from(view.fuel_percent),
        VALUE_WIDTH,
    );
    display.set_text(FUEL_UNIT.0, FUEL_UNIT.1, "%");

    display.set_text(TEMP_LABEL.0, TEMP_LABEL.1, "T:");
    display.set_number(
        TEMP_VALUE.0,
        TEMP_VALUE.1,
        u32::from(view.temperature_c),
        VALUE_WIDTH,
    );
    display.set_text(TEMP_UNIT.0, TEMP_UNIT.1, "c");
}
