//! Per-tick data handed between the input layer, the strategies and the
//! actuators.
//!
//! `InputLevels` is what the debounced hardware reports.  `EdgeTracker`
//! gives the levels their physical meaning and detects the operator's
//! select-button release, producing a [`ControlInputs`].  Strategies answer
//! with a [`PumpCommand`].
//!
//! The cistern full-to-empty latch is not here: each automatic strategy
//! owns one in its [`FillCycle`](super::fill::FillCycle), advanced only
//! while that strategy runs.

use core::fmt;

use crate::sensors::water_level::{cistern_is_full, well_is_empty};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Wall-clock instant in whole seconds, as reported by the clock port.
///
/// The counter is free-running; [`Timestamp::secs_since`] uses wrapping
/// subtraction so a rollover never produces a huge elapsed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp(pub u32);

impl Timestamp {
    pub const fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn secs(self) -> u32 {
        self.0
    }

    /// Whole seconds elapsed from `earlier` to `self`.
    pub const fn secs_since(self, earlier: Timestamp) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    pub const fn plus_secs(self, secs: u32) -> Self {
        Self(self.0.wrapping_add(secs))
    }
}

// ---------------------------------------------------------------------------
// Debounced levels (written by the sensor port)
// ---------------------------------------------------------------------------

/// Stable logical level of every input the control core reads.
///
/// The level sensors are reported raw; use [`ControlInputs`] for their
/// physical meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputLevels {
    pub mode_button: bool,
    pub select_button: bool,
    pub well_line: bool,
    pub cistern_line: bool,
}

// ---------------------------------------------------------------------------
// Strategy inputs
// ---------------------------------------------------------------------------

/// Everything a pump strategy may look at during one control tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlInputs {
    pub now: Timestamp,
    pub well_empty: bool,
    pub cistern_full: bool,
    /// The pump-select button was released since the previous tick.
    pub select_released: bool,
}

/// Falling-edge detector over one boolean signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingEdge {
    last: bool,
}

impl FallingEdge {
    pub const fn new(initial: bool) -> Self {
        Self { last: initial }
    }

    /// Feed the current level; `true` exactly once per high→low transition.
    pub fn update(&mut self, level: bool) -> bool {
        let fell = self.last && !level;
        self.last = level;
        fell
    }

    pub fn level(&self) -> bool {
        self.last
    }
}

/// Select-button latch shared by every mode.
///
/// Updated on every control tick whatever the active mode, so a press made
/// in an automatic mode is never replayed on entering Manual.
#[derive(Debug, Clone)]
pub struct EdgeTracker {
    select: FallingEdge,
}

impl EdgeTracker {
    pub fn new() -> Self {
        Self {
            select: FallingEdge::new(false),
        }
    }

    pub fn derive(&mut self, levels: &InputLevels, now: Timestamp) -> ControlInputs {
        ControlInputs {
            now,
            well_empty: well_is_empty(levels.well_line),
            cistern_full: cistern_is_full(levels.cistern_line),
            select_released: self.select.update(levels.select_button),
        }
    }
}

impl Default for EdgeTracker {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Pump outputs (written by strategies; consumed by the actuator port)
// ---------------------------------------------------------------------------

/// Which of the two pumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PumpId {
    Pump1,
    Pump2,
}

impl PumpId {
    pub const fn index(self) -> usize {
        match self {
            Self::Pump1 => 0,
            Self::Pump2 => 1,
        }
    }
}

/// Desired state of both pump outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpCommand {
    pub pump1: bool,
    pub pump2: bool,
}

impl PumpCommand {
    /// Both pumps off.
    pub const OFF: Self = Self {
        pump1: false,
        pump2: false,
    };

    pub const BOTH: Self = Self {
        pump1: true,
        pump2: true,
    };

    /// Exactly one pump on.
    pub const fn only(pump: PumpId) -> Self {
        match pump {
            PumpId::Pump1 => Self {
                pump1: true,
                pump2: false,
            },
            PumpId::Pump2 => Self {
                pump1: false,
                pump2: true,
            },
        }
    }

    pub const fn any_on(self) -> bool {
        self.pump1 || self.pump2
    }

    pub const fn is_on(self, pump: PumpId) -> bool {
        match pump {
            PumpId::Pump1 => self.pump1,
            PumpId::Pump2 => self.pump2,
        }
    }
}

impl fmt::Display for PumpCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |b: bool| if b { "ON" } else { "off" };
        write!(f, "p1={} p2={}", on_off(self.pump1), on_off(self.pump2))
    }
}
