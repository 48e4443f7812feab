//! Mock adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO.  Input levels are set directly in
//! terms of what they mean (well empty, cistern full) so tests never
//! depend on the sensor polarity.

use cistern_pump::app::events::AppEvent;
use cistern_pump::app::ports::{
    ActuatorPort, ClockPort, DisplayPort, DisplayView, EventSink, SensorPort,
};
use cistern_pump::control::context::{InputLevels, PumpCommand, Timestamp};
use cistern_pump::control::mode::Indicators;
use cistern_pump::error::HwError;
use cistern_pump::sensors::water_level::{CISTERN_FULL_LEVEL, WELL_EMPTY_LEVEL};

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Pumps(PumpCommand),
    Indicators(Indicators),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    pub polls: usize,
    levels: InputLevels,
    pumps: PumpCommand,
    pub fail_pump_writes: bool,
}

#[allow(dead_code)]
impl MockHardware {
    /// Well full, cistern full, buttons released.
    pub fn new() -> Self {
        let mut hw = Self {
            calls: Vec::new(),
            polls: 0,
            levels: InputLevels::default(),
            pumps: PumpCommand::OFF,
            fail_pump_writes: false,
        };
        hw.set_well_empty(false);
        hw.set_cistern_full(true);
        hw
    }

    pub fn set_well_empty(&mut self, empty: bool) {
        self.levels.well_line = if empty {
            WELL_EMPTY_LEVEL
        } else {
            !WELL_EMPTY_LEVEL
        };
    }

    pub fn set_cistern_full(&mut self, full: bool) {
        self.levels.cistern_line = if full {
            CISTERN_FULL_LEVEL
        } else {
            !CISTERN_FULL_LEVEL
        };
    }

    pub fn set_mode_button(&mut self, pressed: bool) {
        self.levels.mode_button = pressed;
    }

    pub fn set_select_button(&mut self, pressed: bool) {
        self.levels.select_button = pressed;
    }

    pub fn last_indicators(&self) -> Option<Indicators> {
        self.calls.iter().rev().find_map(|c| match c {
            ActuatorCall::Indicators(i) => Some(*i),
            _ => None,
        })
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockHardware {
    fn poll(&mut self, _now_ms: u32) {
        self.polls += 1;
    }

    fn levels(&self) -> InputLevels {
        self.levels
    }
}

impl ActuatorPort for MockHardware {
    fn apply_pumps(&mut self, cmd: PumpCommand) -> Result<(), HwError> {
        self.calls.push(ActuatorCall::Pumps(cmd));
        if self.fail_pump_writes && cmd.any_on() {
            return Err(HwError::GpioWriteFailed(16));
        }
        self.pumps = cmd;
        Ok(())
    }

    fn set_indicators(&mut self, indicators: Indicators) -> Result<(), HwError> {
        self.calls.push(ActuatorCall::Indicators(indicators));
        Ok(())
    }

    fn pumps(&self) -> PumpCommand {
        self.pumps
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
        self.pumps = PumpCommand::OFF;
    }
}

// ── ManualClock ───────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct ManualClock {
    pub now: u32,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn advance(&mut self, secs: u32) {
        self.now = self.now.wrapping_add(secs);
    }
}

impl ClockPort for ManualClock {
    fn now(&mut self) -> Timestamp {
        Timestamp(self.now)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── ScriptedPanel ─────────────────────────────────────────────

/// Display stub that applies one queued edit per refresh.
#[derive(Default)]
pub struct ScriptedPanel {
    pub edits: Vec<Box<dyn FnMut(&mut DisplayView)>>,
    pub seen: Vec<DisplayView>,
}

impl DisplayPort for ScriptedPanel {
    fn refresh(&mut self, view: &mut DisplayView) {
        self.seen.push(view.clone());
        if !self.edits.is_empty() {
            let mut edit = self.edits.remove(0);
            edit(view);
        }
    }
}
