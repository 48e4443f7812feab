//! Fuzz target: control tick under arbitrary input sequences
//!
//! Each input byte is one control tick: bits 0-3 are the raw levels of the
//! mode button, select button, well line and cistern line; bits 4-7 advance
//! the clock.  Verifies:
//! - No panics across mode switches and clock wrap
//! - No pump is ever on while the well is reported empty
//!
//! cargo fuzz run fuzz_control_inputs

#![no_main]

use cistern_pump::adapters::nvram::MemoryNvram;
use cistern_pump::app::events::AppEvent;
use cistern_pump::app::commands::AppCommand;
use cistern_pump::app::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};
use cistern_pump::app::service::AppService;
use cistern_pump::control::context::{InputLevels, PumpCommand, PumpId, Timestamp};
use cistern_pump::control::cycle_time::PumpCycleTime;
use cistern_pump::control::mode::Indicators;
use cistern_pump::control::ControlMode;
use cistern_pump::cycle_store::CycleStore;
use cistern_pump::error::HwError;
use cistern_pump::sensors::water_level::well_is_empty;
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Bench {
    levels: InputLevels,
    pumps: PumpCommand,
}

impl SensorPort for Bench {
    fn poll(&mut self, _now_ms: u32) {}

    fn levels(&self) -> InputLevels {
        self.levels
    }
}

impl ActuatorPort for Bench {
    fn apply_pumps(&mut self, cmd: PumpCommand) -> Result<(), HwError> {
        self.pumps = cmd;
        Ok(())
    }

    fn set_indicators(&mut self, _indicators: Indicators) -> Result<(), HwError> {
        Ok(())
    }

    fn pumps(&self) -> PumpCommand {
        self.pumps
    }

    fn all_off(&mut self) {
        self.pumps = PumpCommand::OFF;
    }
}

struct Clock(u32);

impl ClockPort for Clock {
    fn now(&mut self) -> Timestamp {
        Timestamp(self.0)
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let mut app = AppService::new(ControlMode::AutoBySensors);
    let mut store = CycleStore::new(MemoryNvram::new());
    let mut hw = Bench::default();
    let mut clock = Clock(u32::MAX - 64);
    let mut sink = Discard;

    app.start(&mut store, &mut sink);
    app.handle_command(
        AppCommand::SetCycleTime {
            pump: PumpId::Pump1,
            time: PumpCycleTime::new(0, 0, 5),
        },
        &mut sink,
    );

    for byte in data {
        hw.levels = InputLevels {
            mode_button: byte & 0b0001 != 0,
            select_button: byte & 0b0010 != 0,
            well_line: byte & 0b0100 != 0,
            cistern_line: byte & 0b1000 != 0,
        };
        clock.0 = clock.0.wrapping_add(u32::from(byte >> 4));
        app.control_tick(&mut hw, &mut clock, &mut store, &mut sink);

        if well_is_empty(hw.levels.well_line) {
            assert!(!hw.pumps.any_on());
        }
    }
});
