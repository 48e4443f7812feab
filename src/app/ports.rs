//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (inputs, pump outputs, clock, NVRAM, display, event
//! sinks) implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::control::ControlMode;
use crate::control::context::{InputLevels, PumpCommand, Timestamp};
use crate::control::cycle_time::CycleTimes;
use crate::control::mode::Indicators;
use crate::error::{HwError, NvramError};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: debounced buttons and level switches.
pub trait SensorPort {
    /// Sample every input line and run the debounce filter.
    fn poll(&mut self, now_ms: u32);

    /// Last stable level of every input.  Pure.
    fn levels(&self) -> InputLevels;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the two pumps and the panel indicators.
///
/// The domain never reads actuator state back for decisions; the
/// `pumps()` query exists for idempotence checks and display only.
pub trait ActuatorPort {
    /// Drive both pump outputs.
    fn apply_pumps(&mut self, cmd: PumpCommand) -> Result<(), HwError>;

    /// Drive the AUTO / MANUAL indicators.
    fn set_indicators(&mut self, indicators: Indicators) -> Result<(), HwError>;

    /// Last pump state successfully written.
    fn pumps(&self) -> PumpCommand;

    /// Best-effort: turn both pumps off, ignoring write errors.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for the timer strategy.
pub trait ClockPort {
    fn now(&mut self) -> Timestamp;
}

// ───────────────────────────────────────────────────────────────
// NVRAM port (driven adapter: domain ↔ EEPROM)
// ───────────────────────────────────────────────────────────────

/// Byte-addressed non-volatile memory.
///
/// Page boundaries and bus framing are the implementation's problem;
/// callers see a flat address space.
pub trait NvramPort {
    /// Fill `buf` with the bytes starting at `address`.
    fn read_record(&mut self, address: u16, buf: &mut [u8]) -> Result<(), NvramError>;

    /// Write `data` starting at `address`.  Blocks until the device has
    /// committed it.
    fn write_record(&mut self, address: u16, data: &[u8]) -> Result<(), NvramError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (driving adapter: operator panel ↔ domain)
// ───────────────────────────────────────────────────────────────

/// What the operator panel sees on each refresh.
///
/// `mode` and `cycles` are editable; anything the panel writes back is
/// applied by the service before the next control tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayView {
    pub mode: ControlMode,
    pub cycles: CycleTimes,
    pub pumps: PumpCommand,
    pub well_empty: bool,
    pub now: Timestamp,
}

pub trait DisplayPort {
    fn refresh(&mut self, view: &mut DisplayView);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the service)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the scheduler invokes when a cadence is due.
///
/// The [`Scheduler`](crate::scheduler::Scheduler) knows nothing about the
/// service or its ports; the main loop decides what each task does.
pub trait SchedulerDelegate {
    fn on_task_due(&mut self, task: CadenceTask);
}

impl<F: FnMut(CadenceTask)> SchedulerDelegate for F {
    fn on_task_due(&mut self, task: CadenceTask) {
        self(task)
    }
}

/// The three cadences of the cooperative loop, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceTask {
    /// Sample and debounce inputs.
    PollInputs,
    /// Mode selection, strategy, pump outputs, persistence.
    Control,
    /// Operator panel refresh.
    RefreshDisplay,
}
