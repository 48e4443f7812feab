//! Manual strategy: the select button walks a four-step ring.
//!
//! ```text
//!   None ─▶ Pump1 ─▶ Pump2 ─▶ Both ─▶ None ...
//! ```
//!
//! While the well is empty both pumps are forced off and the selection is
//! frozen; presses during that time are dropped.

use log::info;

use super::PumpStrategy;
use super::context::{ControlInputs, PumpCommand, PumpId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ManualSelection {
    #[default]
    None = 0,
    Pump1 = 1,
    Pump2 = 2,
    Both = 3,
}

impl ManualSelection {
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Pump1,
            Self::Pump1 => Self::Pump2,
            Self::Pump2 => Self::Both,
            Self::Both => Self::None,
        }
    }

    pub const fn command(self) -> PumpCommand {
        match self {
            Self::None => PumpCommand::OFF,
            Self::Pump1 => PumpCommand::only(PumpId::Pump1),
            Self::Pump2 => PumpCommand::only(PumpId::Pump2),
            Self::Both => PumpCommand::BOTH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ManualStrategy {
    selection: ManualSelection,
}

impl ManualStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> ManualSelection {
        self.selection
    }
}

impl PumpStrategy for ManualStrategy {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn tick(&mut self, inputs: &ControlInputs) -> PumpCommand {
        if inputs.well_empty {
            return PumpCommand::OFF;
        }
        if inputs.select_released {
            self.selection = self.selection.next();
            info!("MANUAL | selection -> {:?}", self.selection);
        }
        self.selection.command()
    }
}
