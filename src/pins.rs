//! GPIO / peripheral pin assignments for the transfer-station controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Operator push-buttons (active HIGH, external pull-down)
// ---------------------------------------------------------------------------

/// Cycles AUTO ⇄ MANUAL on release.
pub const MODE_BUTTON_GPIO: i32 = 8;
/// Advances the manual pump selection on release.
pub const PUMP_SELECT_BUTTON_GPIO: i32 = 9;

/// Menu navigation buttons.  Owned by the display collaborator; the control
/// core never reads them.
pub const NAV_UP_GPIO: i32 = 2;
pub const NAV_DOWN_GPIO: i32 = 3;
pub const NAV_LEFT_GPIO: i32 = 4;
pub const NAV_RIGHT_GPIO: i32 = 5;
pub const NAV_OK_GPIO: i32 = 6;
pub const NAV_ESC_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Level sensors (float switches)
// ---------------------------------------------------------------------------

/// Well float switch.  See [`crate::sensors::water_level::WELL_EMPTY_LEVEL`].
pub const WELL_SENSOR_GPIO: i32 = 10;
/// Cistern float switch.  See [`crate::sensors::water_level::CISTERN_FULL_LEVEL`].
pub const CISTERN_SENSOR_GPIO: i32 = 11;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Front-panel indicator lit while an AUTO mode is selected.
pub const LED_AUTO_GPIO: i32 = 14;
/// Front-panel indicator lit while MANUAL mode is selected.
pub const LED_MANUAL_GPIO: i32 = 15;
/// Pump 1 contactor (active HIGH).
pub const PUMP_1_GPIO: i32 = 16;
/// Pump 2 contactor (active HIGH).
pub const PUMP_2_GPIO: i32 = 17;

// ---------------------------------------------------------------------------
// I²C bus (RTC + AT24C32 EEPROM on the same module, LCD backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 38;
pub const I2C_SCL_GPIO: i32 = 39;
/// Bus clock for the RTC/EEPROM module.
pub const I2C_BAUDRATE_HZ: u32 = 100_000;
