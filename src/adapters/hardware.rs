//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`InputHub`] and all output drivers, exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  This is the only module in the
//! system that touches GPIO.  Generic over the `embedded-hal` pin traits:
//! the firmware plugs in `PinDriver`s, host tests plug in `SimLine`s.

use embedded_hal::digital::{InputPin, OutputPin};
use log::warn;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::context::{InputLevels, PumpCommand};
use crate::control::mode::Indicators;
use crate::drivers::output::DigitalOutput;
use crate::error::HwError;
use crate::sensors::InputHub;

/// Output drivers for the adapter.
pub struct Outputs<O> {
    pub pump1: DigitalOutput<O>,
    pub pump2: DigitalOutput<O>,
    pub led_auto: DigitalOutput<O>,
    pub led_manual: DigitalOutput<O>,
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I, O> {
    inputs: InputHub<I>,
    outputs: Outputs<O>,
}

impl<I: InputPin, O: OutputPin> HardwareAdapter<I, O> {
    pub fn new(inputs: InputHub<I>, outputs: Outputs<O>) -> Self {
        Self { inputs, outputs }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I: InputPin, O: OutputPin> SensorPort for HardwareAdapter<I, O> {
    fn poll(&mut self, now_ms: u32) {
        self.inputs.poll_all(now_ms);
    }

    fn levels(&self) -> InputLevels {
        self.inputs.levels()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<I: InputPin, O: OutputPin> ActuatorPort for HardwareAdapter<I, O> {
    fn apply_pumps(&mut self, cmd: PumpCommand) -> Result<(), HwError> {
        // Switch off before on so both pumps are never energised by a
        // half-applied command.
        let o = &mut self.outputs;
        if !cmd.pump1 {
            o.pump1.deactivate()?;
        }
        if !cmd.pump2 {
            o.pump2.deactivate()?;
        }
        if cmd.pump1 {
            o.pump1.activate()?;
        }
        if cmd.pump2 {
            o.pump2.activate()?;
        }
        Ok(())
    }

    fn set_indicators(&mut self, indicators: Indicators) -> Result<(), HwError> {
        self.outputs.led_auto.set_state(indicators.auto_lit)?;
        self.outputs.led_manual.set_state(indicators.manual_lit)
    }

    fn pumps(&self) -> PumpCommand {
        PumpCommand {
            pump1: self.outputs.pump1.is_active(),
            pump2: self.outputs.pump2.is_active(),
        }
    }

    fn all_off(&mut self) {
        for pump in [&mut self.outputs.pump1, &mut self.outputs.pump2] {
            if let Err(e) = pump.deactivate() {
                warn!("all_off: {}", e);
            }
        }
    }
}
