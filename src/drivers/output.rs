//! Digital actuator driver (pump contactor, panel indicator).
//!
//! ## Safety contract
//!
//! The driver is a dumb actuator.  Interlocks are enforced upstream by the
//! safety supervisor; this driver only remembers what it last wrote so that
//! repeated commands do not re-toggle the line.

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::error::HwError;

pub struct DigitalOutput<P> {
    pin: P,
    gpio: i32,
    /// Last level successfully written; `None` until the first write.
    state: Option<bool>,
}

impl<P: OutputPin> DigitalOutput<P> {
    pub fn new(pin: P, gpio: i32) -> Self {
        Self {
            pin,
            gpio,
            state: None,
        }
    }

    pub fn activate(&mut self) -> Result<(), HwError> {
        self.set_state(true)
    }

    pub fn deactivate(&mut self) -> Result<(), HwError> {
        self.set_state(false)
    }

    pub fn toggle(&mut self) -> Result<(), HwError> {
        self.set_state(!self.is_active())
    }

    /// Drive the line.  No-op if it already holds `on`.
    pub fn set_state(&mut self, on: bool) -> Result<(), HwError> {
        if self.state == Some(on) {
            return Ok(());
        }
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        match res {
            Ok(()) => {
                self.state = Some(on);
                Ok(())
            }
            Err(e) => {
                warn!("GPIO {}: write {} failed ({:?})", self.gpio, on, e);
                // Unknown level now; force a rewrite on the next command.
                self.state = None;
                Err(HwError::GpioWriteFailed(self.gpio))
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == Some(true)
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}
