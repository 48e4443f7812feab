//! Pure control logic: the mode selector and the three pump strategies.
//!
//! ```text
//!   InputLevels ──▶ EdgeTracker ──▶ ControlInputs ──▶ PumpStrategy ──▶ PumpCommand
//!                        ModeSelector ──▶ which strategy runs
//! ```
//!
//! Nothing in here touches hardware or a clock; every time value arrives
//! through [`ControlInputs`], which keeps the whole module host-testable.

pub mod context;
pub mod cycle_time;
pub mod fill;
pub mod manual;
pub mod mode;
pub mod sensor;
pub mod timer;

use core::fmt;

use serde::{Deserialize, Serialize};

use context::{ControlInputs, PumpCommand};

/// Active control mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum ControlMode {
    /// Refill the cistern on level-sensor events, alternating pumps per fill.
    #[default]
    AutoBySensors = 0,
    /// Refill on level-sensor events, alternating pumps on cycle durations.
    AutoByTimer = 1,
    /// Operator picks the pumps with the select button.
    Manual = 2,
}

impl ControlMode {
    pub const fn is_auto(self) -> bool {
        matches!(self, Self::AutoBySensors | Self::AutoByTimer)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::AutoBySensors => "AutoBySensors",
            Self::AutoByTimer => "AutoByTimer",
            Self::Manual => "Manual",
        }
    }
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One pump-control policy, evaluated once per control tick.
///
/// Implementations keep all of their cross-tick state in `self`; the
/// returned command is the complete desired output for this tick.
pub trait PumpStrategy {
    fn name(&self) -> &'static str;

    fn tick(&mut self, inputs: &ControlInputs) -> PumpCommand;
}
