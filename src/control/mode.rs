//! Mode selector: the mode button toggles between Manual and whichever
//! automatic mode was last in use.
//!
//! ```text
//!            release                      release
//!   Auto(x) ────────▶ Manual ──────────────────────▶ Auto(previous_auto)
//! ```
//!
//! The button acts on its falling edge, so holding it down does nothing
//! until it is let go.  Automatic-mode choice (sensors vs timer) is made
//! through [`ModeSelector::request`], which the display path uses.

use super::ControlMode;
use super::context::FallingEdge;

/// Panel indicator levels for the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indicators {
    pub auto_lit: bool,
    pub manual_lit: bool,
}

#[derive(Debug, Clone)]
pub struct ModeSelector {
    mode: ControlMode,
    previous_auto: ControlMode,
    button: FallingEdge,
}

impl ModeSelector {
    pub fn new(initial: ControlMode) -> Self {
        Self {
            mode: initial,
            previous_auto: if initial.is_auto() {
                initial
            } else {
                ControlMode::AutoBySensors
            },
            button: FallingEdge::new(false),
        }
    }

    /// Feed the debounced mode-button level; returns the mode to run this
    /// tick.
    pub fn tick(&mut self, button_active: bool) -> ControlMode {
        if self.button.update(button_active) {
            self.mode = if self.mode.is_auto() {
                ControlMode::Manual
            } else {
                self.previous_auto
            };
        }
        self.mode
    }

    /// Switch mode from outside the button path.  Returns `true` if the
    /// mode actually changed.
    pub fn request(&mut self, mode: ControlMode) -> bool {
        if mode.is_auto() {
            self.previous_auto = mode;
        }
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Automatic mode the button returns to from Manual.
    pub fn previous_auto(&self) -> ControlMode {
        self.previous_auto
    }

    pub fn indicators(&self) -> Indicators {
        let auto_lit = self.mode.is_auto();
        Indicators {
            auto_lit,
            manual_lit: !auto_lit,
        }
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new(ControlMode::default())
    }
}
