//! Input subsystem: the four debounced lines and the aggregating
//! [`InputHub`].
//!
//! The hub owns every input driver and produces an [`InputLevels`] snapshot
//! that the control tick reads.  Polling and reading are split so the
//! debounce filter runs on its own cadence.

pub mod water_level;

use embedded_hal::digital::InputPin;

use crate::control::context::InputLevels;
use crate::drivers::debounce::DebouncedInput;

/// GPIO handles for the hub, built in `main` where peripheral ownership is
/// established.
pub struct InputPins<P> {
    pub mode_button: (P, i32),
    pub select_button: (P, i32),
    pub well_sensor: (P, i32),
    pub cistern_sensor: (P, i32),
}

/// Aggregates all debounced inputs.
pub struct InputHub<P> {
    mode_button: DebouncedInput<P>,
    select_button: DebouncedInput<P>,
    well_sensor: DebouncedInput<P>,
    cistern_sensor: DebouncedInput<P>,
}

impl<P: InputPin> InputHub<P> {
    pub fn new(pins: InputPins<P>, debounce_window_ms: u32) -> Self {
        let input = |(pin, gpio): (P, i32)| {
            DebouncedInput::with_window(pin, gpio, debounce_window_ms)
        };
        Self {
            mode_button: input(pins.mode_button),
            select_button: input(pins.select_button),
            well_sensor: input(pins.well_sensor),
            cistern_sensor: input(pins.cistern_sensor),
        }
    }

    /// Sample every line once.
    pub fn poll_all(&mut self, now_ms: u32) {
        self.mode_button.poll(now_ms);
        self.select_button.poll(now_ms);
        self.well_sensor.poll(now_ms);
        self.cistern_sensor.poll(now_ms);
    }

    pub fn levels(&self) -> InputLevels {
        InputLevels {
            mode_button: self.mode_button.is_active(),
            select_button: self.select_button.is_active(),
            well_line: self.well_sensor.is_active(),
            cistern_line: self.cistern_sensor.is_active(),
        }
    }
}
