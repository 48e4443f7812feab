//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the mode selector, the three pump strategies, the
//! safety supervisor and the select-button latch.  It exposes a
//! hardware-agnostic API.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!   ClockPort ──▶ │          AppService           │
//! ActuatorPort ◀──│ Mode · Strategies · Safety    │──▶ CycleStore
//!  DisplayPort ◀─▶└──────────────────────────────┘
//! ```
//!
//! ## Control tick order
//!
//! 1. Resolve the mode from the mode-button edge.
//! 2. Derive this tick's edges and level meanings.
//! 3. Evaluate the safety interlocks.
//! 4. Run the strategy for the mode resolved in step 1.
//! 5. Gate the command and drive the pumps and indicators.
//! 6. Persist cycle durations if they changed.
//!
//! Steps 1 and 4 happen inside one call, so a strategy never runs with a
//! stale mode.

use log::{error, info, warn};

use crate::control::context::{ControlInputs, EdgeTracker, PumpCommand, PumpId};
use crate::control::cycle_time::CycleTimes;
use crate::control::manual::{ManualSelection, ManualStrategy};
use crate::control::mode::ModeSelector;
use crate::control::sensor::SensorStrategy;
use crate::control::timer::TimerStrategy;
use crate::control::{ControlMode, PumpStrategy};
use crate::cycle_store::CycleStore;
use crate::safety::SafetySupervisor;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{
    ActuatorPort, ClockPort, DisplayPort, DisplayView, EventSink, NvramPort, SensorPort,
};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    selector: ModeSelector,
    edges: EdgeTracker,
    manual: ManualStrategy,
    sensor: SensorStrategy,
    timer: TimerStrategy,
    safety: SafetySupervisor,
    /// Inputs seen by the most recent control tick.
    last_inputs: ControlInputs,
    /// Pump state after the most recent control tick.
    pumps: PumpCommand,
}

impl AppService {
    /// Construct the service in `initial` mode with disarmed timer cycles.
    ///
    /// Call [`start`](Self::start) next to load the stored cycles.
    pub fn new(initial: ControlMode) -> Self {
        Self {
            selector: ModeSelector::new(initial),
            edges: EdgeTracker::new(),
            manual: ManualStrategy::new(),
            sensor: SensorStrategy::new(),
            timer: TimerStrategy::new(CycleTimes::default()),
            safety: SafetySupervisor::new(),
            last_inputs: ControlInputs::default(),
            pumps: PumpCommand::OFF,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Load the timer cycles from NVRAM and announce startup.
    ///
    /// A store failure leaves the timer disarmed; the failure is reported
    /// but does not stop the controller.
    pub fn start<N: NvramPort>(&mut self, store: &mut CycleStore<N>, sink: &mut impl EventSink) {
        match store.load_with_origin() {
            Ok((cycles, origin)) => {
                self.timer.set_cycles(cycles);
                sink.emit(&AppEvent::CyclesLoaded { cycles, origin });
            }
            Err(e) => {
                error!("Cycle store load failed: {}; timer disarmed", e);
                let cycles = *self.timer.cycles();
                if let Err(e) = store.assume_persisted(&cycles) {
                    warn!("Cycle snapshot could not be encoded: {}", e);
                }
                sink.emit(&AppEvent::StoreFailed(e));
            }
        }
        sink.emit(&AppEvent::Started {
            mode: self.selector.mode(),
            cycles: *self.timer.cycles(),
        });
        info!("AppService started in {}", self.selector.mode());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Input cadence: sample and debounce every line.
    pub fn poll_inputs(&mut self, hw: &mut impl SensorPort, now_ms: u32) {
        hw.poll(now_ms);
    }

    /// Run one full control cycle: mode → safety → strategy → actuators →
    /// persistence.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn control_tick<N: NvramPort>(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &mut impl ClockPort,
        store: &mut CycleStore<N>,
        sink: &mut impl EventSink,
    ) {
        let levels = hw.levels();
        let now = clock.now();

        // 1. Mode resolution
        let prev_mode = self.selector.mode();
        let mode = self.selector.tick(levels.mode_button);
        if mode != prev_mode {
            info!("Mode button: {} -> {}", prev_mode, mode);
            sink.emit(&AppEvent::ModeChanged {
                from: prev_mode,
                to: mode,
            });
        }

        // 2. Edges and level meanings
        let inputs = self.edges.derive(&levels, now);
        self.last_inputs = inputs;

        // 3. Safety evaluation
        let prev_faults = self.safety.faults();
        let faults = self.safety.evaluate(&inputs);
        if faults != prev_faults {
            if faults != 0 {
                warn!("Safety fault! flags=0b{:08b}", faults);
                sink.emit(&AppEvent::FaultDetected(faults));
            } else {
                sink.emit(&AppEvent::FaultCleared);
            }
        }

        // 4. Strategy for the mode resolved above
        let requested = self.strategy_mut(mode).tick(&inputs);

        // 5. Actuators
        let cmd = self.safety.gate(requested);
        self.apply_actuators(cmd, hw, sink);

        // 6. Persistence
        self.persist_if_changed(store, sink);
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command from the operator panel.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::SetMode(mode) => {
                let prev = self.selector.mode();
                if self.selector.request(mode) {
                    info!("Mode set from panel: {} -> {}", prev, mode);
                    sink.emit(&AppEvent::ModeChanged {
                        from: prev,
                        to: mode,
                    });
                }
            }
            AppCommand::SetCycleTime { pump, time } => {
                if !time.is_valid() {
                    warn!("Rejected cycle time {} for {:?}", time, pump);
                    return;
                }
                if self.timer.cycles()[pump.index()] != time {
                    info!("Cycle time for {:?} set to {}", pump, time);
                    self.timer.set_cycle(pump, time);
                }
            }
        }
    }

    /// Display cadence: hand the panel the current view and apply whatever
    /// it changed.  Edited cycle times are persisted before returning.
    pub fn refresh_display<N: NvramPort>(
        &mut self,
        display: &mut impl DisplayPort,
        store: &mut CycleStore<N>,
        sink: &mut impl EventSink,
    ) {
        let before = self.display_view();
        let mut view = before.clone();
        display.refresh(&mut view);

        if view.mode != before.mode {
            self.handle_command(AppCommand::SetMode(view.mode), sink);
        }
        for pump in [PumpId::Pump1, PumpId::Pump2] {
            let time = view.cycles[pump.index()];
            if time != before.cycles[pump.index()] {
                self.handle_command(AppCommand::SetCycleTime { pump, time }, sink);
            }
        }
        self.persist_if_changed(store, sink);
    }

    /// Write the timer cycles if they differ from the persisted record.
    /// Returns `true` if a write happened.  A failed write is reported and
    /// retried on the next call.
    pub fn persist_if_changed<N: NvramPort>(
        &mut self,
        store: &mut CycleStore<N>,
        sink: &mut impl EventSink,
    ) -> bool {
        let cycles = *self.timer.cycles();
        match store.save_if_changed(&cycles) {
            Ok(true) => {
                info!("Cycle times persisted");
                sink.emit(&AppEvent::CyclesPersisted(cycles));
                true
            }
            Ok(false) => false,
            Err(e) => {
                error!("Cycle persist failed: {}", e);
                sink.emit(&AppEvent::StoreFailed(e));
                false
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn display_view(&self) -> DisplayView {
        DisplayView {
            mode: self.selector.mode(),
            cycles: *self.timer.cycles(),
            pumps: self.pumps,
            well_empty: self.last_inputs.well_empty,
            now: self.last_inputs.now,
        }
    }

    pub fn mode(&self) -> ControlMode {
        self.selector.mode()
    }

    /// Automatic mode the mode button returns to from Manual.
    pub fn previous_auto_mode(&self) -> ControlMode {
        self.selector.previous_auto()
    }

    pub fn cycles(&self) -> &CycleTimes {
        self.timer.cycles()
    }

    pub fn manual_selection(&self) -> ManualSelection {
        self.manual.selection()
    }

    /// Pump the sensor strategy's current or next fill runs on.
    pub fn sensor_next_pump(&self) -> PumpId {
        self.sensor.active_pump()
    }

    /// Pump output after the most recent control tick.
    pub fn pumps(&self) -> PumpCommand {
        self.pumps
    }

    /// Current active fault bitmask (0 = no faults).
    pub fn fault_flags(&self) -> u8 {
        self.safety.faults()
    }

    // ── Internal ──────────────────────────────────────────────

    fn strategy_mut(&mut self, mode: ControlMode) -> &mut dyn PumpStrategy {
        match mode {
            ControlMode::Manual => &mut self.manual,
            ControlMode::AutoBySensors => &mut self.sensor,
            ControlMode::AutoByTimer => &mut self.timer,
        }
    }

    /// Translate the gated command into port calls.
    fn apply_actuators(
        &mut self,
        cmd: PumpCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        if let Err(e) = hw.apply_pumps(cmd) {
            error!("Pump write failed: {}; forcing all off", e);
            hw.all_off();
        }
        if let Err(e) = hw.set_indicators(self.selector.indicators()) {
            warn!("Indicator write failed: {}", e);
        }

        let applied = hw.pumps();
        if applied != self.pumps {
            self.pumps = applied;
            sink.emit(&AppEvent::PumpsChanged(applied));
        }
    }
}

impl Default for AppService {
    fn default() -> Self {
        Self::new(ControlMode::default())
    }
}
