//! Sensor-driven strategy: one pump per fill, alternating on each
//! completed fill.

use log::info;

use super::PumpStrategy;
use super::context::{ControlInputs, PumpCommand, PumpId};
use super::fill::{FillCycle, FillEvent};

#[derive(Debug, Clone, Default)]
pub struct SensorStrategy {
    cycle: FillCycle,
}

impl SensorStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cycle(&self) -> &FillCycle {
        &self.cycle
    }

    /// Pump that runs (or will run) the current fill.
    pub fn active_pump(&self) -> PumpId {
        self.cycle.active_pump()
    }
}

impl PumpStrategy for SensorStrategy {
    fn name(&self) -> &'static str {
        "sensor"
    }

    fn tick(&mut self, inputs: &ControlInputs) -> PumpCommand {
        match self.cycle.step(inputs) {
            Some(FillEvent::Started) => {
                info!("SENSOR | fill started on {:?}", self.cycle.active_pump());
            }
            Some(FillEvent::Completed) => {
                info!("SENSOR | fill complete, next fill on {:?}", self.cycle.active_pump());
            }
            Some(FillEvent::Abandoned) => info!("SENSOR | cistern full while paused"),
            Some(FillEvent::Paused) => info!("SENSOR | well empty, fill paused"),
            Some(FillEvent::Resumed) => info!("SENSOR | well refilled, fill resumed"),
            None => {}
        }
        self.cycle.command()
    }
}
