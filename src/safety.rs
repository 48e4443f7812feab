//! Safety supervisor.
//!
//! The supervisor runs **every control tick before the strategy** and keeps
//! a fault bitmask.  Whatever the active strategy asks for, the command is
//! passed through [`SafetySupervisor::gate`] before it reaches the pumps.
//!
//! ## Fault lifecycle
//!
//! 1. A condition triggers a fault (the well float reports empty).
//! 2. The supervisor sets the corresponding bit.
//! 3. While any bit is set, `gate` turns every pump command into "both off".
//! 4. Each tick the supervisor re-evaluates; when the condition clears the
//!    bit is cleared and commands pass through unchanged.
//!
//! The strategies apply the well interlock themselves as well (it drives
//! their pause logic).  The gate guarantees the outcome even if a strategy
//! gets it wrong.

use log::{error, info};

use crate::control::context::{ControlInputs, PumpCommand};
use crate::error::SafetyFault;

/// Safety supervisor.
#[derive(Debug, Default)]
pub struct SafetySupervisor {
    /// Current fault bitmask.
    faults: u8,
}

impl SafetySupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate all safety conditions against this tick's inputs.
    /// Returns the updated fault bitmask.
    pub fn evaluate(&mut self, inputs: &ControlInputs) -> u8 {
        // ── Well level ────────────────────────────────────────────
        self.eval_fault(SafetyFault::WellEmpty, inputs.well_empty);

        self.faults
    }

    /// Apply the interlocks to a strategy's command.
    pub fn gate(&self, cmd: PumpCommand) -> PumpCommand {
        if self.has_faults() {
            PumpCommand::OFF
        } else {
            cmd
        }
    }

    /// Current fault bitmask.
    pub fn faults(&self) -> u8 {
        self.faults
    }

    /// True if **any** fault is active.
    pub fn has_faults(&self) -> bool {
        self.faults != 0
    }

    /// Check if a specific fault is active.
    pub fn has_fault(&self, fault: SafetyFault) -> bool {
        self.faults & fault.mask() != 0
    }

    // ── Internal ──────────────────────────────────────────────────

    /// Set or clear a fault bit based on a boolean condition.
    fn eval_fault(&mut self, fault: SafetyFault, condition: bool) {
        if condition {
            if self.faults & fault.mask() == 0 {
                error!("SAFETY FAULT SET: {fault}");
            }
            self.faults |= fault.mask();
        } else {
            if self.faults & fault.mask() != 0 {
                info!("SAFETY FAULT CLEARED: {fault}");
            }
            self.faults &= !fault.mask();
        }
    }
}
