//! Cistern fill cycle shared by both automatic strategies.
//!
//! ```text
//!              cistern emptied                cistern full
//!   ┌──────┐ ─────────────────▶ ┌─────────┐ ──────────────▶ ┌──────┐
//!   │ Idle │                    │ Filling │                 │ Idle │  (flip pump)
//!   └──────┘                    └─────────┘                 └──────┘
//!                                 │    ▲
//!                      well empty │    │ well refilled
//!                                 ▼    │
//!                               (paused)
//! ```
//!
//! The alternation bit flips only when a fill completes unpaused.  A fill
//! that ends while paused returns to Idle without flipping, since the
//! active pump never finished its turn.
//!
//! "Cistern emptied" is a full-to-not-full edge seen by this cycle's own
//! latch, which only advances when [`FillCycle::step`] runs.  A strategy
//! that sits inactive (another mode selected, or the timer disarmed) keeps
//! its last observation, so a cistern that drained in the meantime starts a
//! fill on the first step after it becomes active again.  The latch starts
//! out as "full": a cistern that is already low the first time the cycle
//! runs counts as emptied.

use super::context::{ControlInputs, FallingEdge, PumpCommand, PumpId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillPhase {
    Idle,
    Filling,
}

/// Transition reported by [`FillCycle::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillEvent {
    Started,
    Completed,
    /// Cistern filled while the well interlock held the pumps off.
    Abandoned,
    Paused,
    Resumed,
}

#[derive(Debug, Clone)]
pub struct FillCycle {
    phase: FillPhase,
    use_pump1: bool,
    paused_by_well: bool,
    cistern_was_full: FallingEdge,
}

impl FillCycle {
    pub fn new() -> Self {
        Self {
            phase: FillPhase::Idle,
            use_pump1: true,
            paused_by_well: false,
            cistern_was_full: FallingEdge::new(true),
        }
    }

    /// Advance the cycle for one tick.
    ///
    /// At most one event is reported.  A fill that starts with the well
    /// already empty reports [`FillEvent::Paused`].
    pub fn step(&mut self, inputs: &ControlInputs) -> Option<FillEvent> {
        let mut event = None;
        let emptied = self.cistern_was_full.update(inputs.cistern_full);

        match self.phase {
            FillPhase::Idle => {
                if emptied {
                    self.phase = FillPhase::Filling;
                    self.paused_by_well = false;
                    event = Some(FillEvent::Started);
                }
            }
            FillPhase::Filling => {
                if inputs.cistern_full {
                    self.phase = FillPhase::Idle;
                    if self.paused_by_well {
                        self.paused_by_well = false;
                        return Some(FillEvent::Abandoned);
                    }
                    self.use_pump1 = !self.use_pump1;
                    return Some(FillEvent::Completed);
                }
            }
        }

        if self.phase == FillPhase::Filling {
            if inputs.well_empty {
                if !self.paused_by_well {
                    self.paused_by_well = true;
                    event = Some(FillEvent::Paused);
                }
            } else if self.paused_by_well {
                self.paused_by_well = false;
                event = Some(FillEvent::Resumed);
            }
        }

        event
    }

    /// Output for the current state.  Off whenever not actively filling.
    pub fn command(&self) -> PumpCommand {
        if self.is_pumping() {
            PumpCommand::only(self.active_pump())
        } else {
            PumpCommand::OFF
        }
    }

    /// Hand the running fill over to the other pump.
    pub fn alternate(&mut self) {
        self.use_pump1 = !self.use_pump1;
    }

    /// Drop back to Idle, keeping the alternation bit.
    ///
    /// The cistern latch is re-primed, so a cistern that is still (or
    /// becomes) low starts a fill on the next step.
    pub fn reset(&mut self) {
        self.phase = FillPhase::Idle;
        self.paused_by_well = false;
        self.cistern_was_full = FallingEdge::new(true);
    }

    pub fn phase(&self) -> FillPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused_by_well
    }

    pub fn is_pumping(&self) -> bool {
        self.phase == FillPhase::Filling && !self.paused_by_well
    }

    /// Pump the next (or current) fill runs on.
    pub fn active_pump(&self) -> PumpId {
        if self.use_pump1 {
            PumpId::Pump1
        } else {
            PumpId::Pump2
        }
    }
}

impl Default for FillCycle {
    fn default() -> Self {
        Self::new()
    }
}
