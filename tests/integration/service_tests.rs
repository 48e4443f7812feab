//! Integration tests for the AppService → strategy → actuators pipeline.
//!
//! These run on the host (x86_64) and drive the full control tick through
//! mock ports, checking what reaches the pump outputs.

use cistern_pump::adapters::nvram::MemoryNvram;
use cistern_pump::app::commands::AppCommand;
use cistern_pump::app::events::AppEvent;
use cistern_pump::app::ports::{DisplayView, NvramPort};
use cistern_pump::app::service::AppService;
use cistern_pump::control::ControlMode;
use cistern_pump::control::context::{PumpCommand, PumpId};
use cistern_pump::control::cycle_time::{CycleTimes, PumpCycleTime};
use cistern_pump::control::manual::ManualSelection;
use cistern_pump::control::mode::Indicators;
use cistern_pump::cycle_store::CycleStore;

use super::mock_hw::{ActuatorCall, ManualClock, MockHardware, RecordingSink, ScriptedPanel};

const P1: PumpCommand = PumpCommand::only(PumpId::Pump1);
const P2: PumpCommand = PumpCommand::only(PumpId::Pump2);

struct Rig {
    app: AppService,
    hw: MockHardware,
    clock: ManualClock,
    store: CycleStore<MemoryNvram>,
    sink: RecordingSink,
}

impl Rig {
    fn new() -> Self {
        Self::with_store(CycleStore::new(MemoryNvram::new()))
    }

    fn with_store(mut store: CycleStore<MemoryNvram>) -> Self {
        let mut app = AppService::new(ControlMode::AutoBySensors);
        let mut sink = RecordingSink::new();
        app.start(&mut store, &mut sink);
        Self {
            app,
            hw: MockHardware::new(),
            clock: ManualClock::default(),
            store,
            sink,
        }
    }

    fn tick(&mut self) -> PumpCommand {
        self.app
            .control_tick(&mut self.hw, &mut self.clock, &mut self.store, &mut self.sink);
        self.app.pumps()
    }

    fn click_mode(&mut self) {
        self.hw.set_mode_button(true);
        self.tick();
        self.hw.set_mode_button(false);
        self.tick();
    }

    fn click_select(&mut self) -> PumpCommand {
        self.hw.set_select_button(true);
        self.tick();
        self.hw.set_select_button(false);
        self.tick()
    }

    fn refresh(&mut self, panel: &mut ScriptedPanel) {
        self.app
            .refresh_display(panel, &mut self.store, &mut self.sink);
    }

    fn command(&mut self, cmd: AppCommand) {
        self.app.handle_command(cmd, &mut self.sink);
    }

    fn arm_timer(&mut self, p1: PumpCycleTime, p2: PumpCycleTime) {
        self.command(AppCommand::SetMode(ControlMode::AutoByTimer));
        self.command(AppCommand::SetCycleTime {
            pump: PumpId::Pump1,
            time: p1,
        });
        self.command(AppCommand::SetCycleTime {
            pump: PumpId::Pump2,
            time: p2,
        });
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boots_in_sensor_mode_with_pumps_off() {
    let mut rig = Rig::new();
    assert_eq!(rig.tick(), PumpCommand::OFF);
    assert_eq!(rig.app.mode(), ControlMode::AutoBySensors);
    assert_eq!(
        rig.hw.last_indicators(),
        Some(Indicators {
            auto_lit: true,
            manual_lit: false
        })
    );
    assert!(matches!(rig.sink.events.last(), Some(AppEvent::Started { .. })));
}

#[test]
fn erased_store_is_initialised_at_boot() {
    let rig = Rig::new();
    assert_eq!(rig.app.cycles(), &CycleTimes::default());
    assert_eq!(rig.store.nvram().bytes(0, 6), &[0u8; 6]);
}

// ── Mode selector ─────────────────────────────────────────────

#[test]
fn mode_button_round_trip() {
    let mut rig = Rig::new();

    rig.click_mode();
    assert_eq!(rig.app.mode(), ControlMode::Manual);
    assert_eq!(rig.app.previous_auto_mode(), ControlMode::AutoBySensors);
    assert!(rig.hw.last_indicators().is_some_and(|i| i.manual_lit && !i.auto_lit));

    rig.click_mode();
    assert_eq!(rig.app.mode(), ControlMode::AutoBySensors);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::ModeChanged { .. })),
        2
    );
}

#[test]
fn mode_button_returns_to_timer_mode() {
    let mut rig = Rig::new();
    rig.command(AppCommand::SetMode(ControlMode::AutoByTimer));
    rig.click_mode();
    assert_eq!(rig.app.mode(), ControlMode::Manual);
    rig.click_mode();
    assert_eq!(rig.app.mode(), ControlMode::AutoByTimer);
}

// ── Manual ────────────────────────────────────────────────────

#[test]
fn manual_select_walks_the_ring() {
    let mut rig = Rig::new();
    rig.click_mode();

    assert_eq!(rig.click_select(), P1);
    assert_eq!(rig.click_select(), P2);
    assert_eq!(rig.click_select(), PumpCommand::BOTH);
    assert_eq!(rig.click_select(), PumpCommand::OFF);
    assert_eq!(rig.app.manual_selection(), ManualSelection::None);
}

#[test]
fn select_presses_outside_manual_are_not_replayed() {
    let mut rig = Rig::new();
    rig.click_select();
    rig.click_mode();
    assert_eq!(rig.tick(), PumpCommand::OFF);
    assert_eq!(rig.app.manual_selection(), ManualSelection::None);
}

// ── Well interlock ────────────────────────────────────────────

#[test]
fn dry_well_stops_manual_pumps_within_one_tick() {
    let mut rig = Rig::new();
    rig.click_mode();
    for _ in 0..3 {
        rig.click_select();
    }
    assert_eq!(rig.app.pumps(), PumpCommand::BOTH);

    rig.hw.set_well_empty(true);
    assert_eq!(rig.tick(), PumpCommand::OFF);
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::FaultDetected(_))), 1);

    rig.hw.set_well_empty(false);
    assert_eq!(rig.tick(), PumpCommand::BOTH);
    assert_eq!(rig.sink.count(|e| *e == AppEvent::FaultCleared), 1);
}

#[test]
fn dry_well_stops_sensor_fill_within_one_tick() {
    let mut rig = Rig::new();
    rig.hw.set_cistern_full(false);
    assert_eq!(rig.tick(), P1);

    rig.hw.set_well_empty(true);
    assert_eq!(rig.tick(), PumpCommand::OFF);

    rig.hw.set_well_empty(false);
    assert_eq!(rig.tick(), P1, "same pump resumes");
}

#[test]
fn dry_well_wins_over_full_cistern() {
    let mut rig = Rig::new();
    rig.click_mode();
    rig.click_select();
    rig.hw.set_well_empty(true);
    rig.hw.set_cistern_full(true);
    assert_eq!(rig.tick(), PumpCommand::OFF);
}

// ── Sensor strategy ───────────────────────────────────────────

#[test]
fn sensor_fills_alternate_pumps() {
    let mut rig = Rig::new();
    for expected in [P1, P2, P1] {
        rig.hw.set_cistern_full(false);
        assert_eq!(rig.tick(), expected);
        assert_eq!(rig.tick(), expected);
        rig.hw.set_cistern_full(true);
        assert_eq!(rig.tick(), PumpCommand::OFF);
    }
}

#[test]
fn interrupted_sensor_fill_keeps_pump() {
    let mut rig = Rig::new();
    rig.hw.set_cistern_full(false);
    rig.tick();
    rig.hw.set_well_empty(true);
    rig.tick();
    rig.hw.set_cistern_full(true);
    rig.tick();
    assert_eq!(rig.app.sensor_next_pump(), PumpId::Pump1);
}

#[test]
fn cistern_drained_during_manual_detour_starts_fill_on_return() {
    let mut rig = Rig::new();
    assert_eq!(rig.tick(), PumpCommand::OFF);

    rig.click_mode();
    assert_eq!(rig.app.mode(), ControlMode::Manual);
    rig.hw.set_cistern_full(false);
    assert_eq!(rig.tick(), PumpCommand::OFF);

    rig.click_mode();
    assert_eq!(rig.app.mode(), ControlMode::AutoBySensors);
    assert_eq!(rig.app.pumps(), P1);
    for _ in 0..20 {
        assert_eq!(rig.tick(), P1);
    }
}

#[test]
fn sensor_fill_completed_during_manual_detour_alternates_on_return() {
    let mut rig = Rig::new();
    rig.hw.set_cistern_full(false);
    assert_eq!(rig.tick(), P1);

    rig.click_mode();
    rig.hw.set_cistern_full(true);
    rig.tick();

    rig.click_mode();
    assert_eq!(rig.app.pumps(), PumpCommand::OFF);
    assert_eq!(rig.app.sensor_next_pump(), PumpId::Pump2);

    rig.hw.set_cistern_full(false);
    assert_eq!(rig.tick(), P2);
}

#[test]
fn sensor_fill_in_progress_resumes_after_manual_detour() {
    let mut rig = Rig::new();
    rig.hw.set_cistern_full(false);
    assert_eq!(rig.tick(), P1);

    rig.click_mode();
    assert_eq!(rig.tick(), PumpCommand::OFF);

    rig.click_mode();
    assert_eq!(rig.app.pumps(), P1, "same fill, same pump");
}

// ── Timer strategy ────────────────────────────────────────────

#[test]
fn timer_hands_over_on_each_duration_boundary() {
    let mut rig = Rig::new();
    rig.arm_timer(PumpCycleTime::new(1, 0, 0), PumpCycleTime::new(0, 0, 30));

    rig.hw.set_cistern_full(false);
    assert_eq!(rig.tick(), P1);

    rig.clock.advance(3599);
    assert_eq!(rig.tick(), P1);
    rig.clock.advance(1);
    assert_eq!(rig.tick(), P2);

    rig.clock.advance(29);
    assert_eq!(rig.tick(), P2);
    rig.clock.advance(1);
    assert_eq!(rig.tick(), P1);
}

#[test]
fn disarmed_timer_never_pumps() {
    let mut rig = Rig::new();
    rig.arm_timer(PumpCycleTime::new(1, 0, 0), PumpCycleTime::DISARMED);

    rig.hw.set_cistern_full(false);
    for _ in 0..10 {
        rig.clock.advance(600);
        assert_eq!(rig.tick(), PumpCommand::OFF);
    }
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::PumpsChanged(_))), 0);
}

#[test]
fn arming_timer_with_low_cistern_starts_fill() {
    let mut rig = Rig::new();
    rig.command(AppCommand::SetMode(ControlMode::AutoByTimer));
    rig.hw.set_cistern_full(false);
    assert_eq!(rig.tick(), PumpCommand::OFF);

    let half_minute = PumpCycleTime::new(0, 0, 30);
    for pump in [PumpId::Pump1, PumpId::Pump2] {
        rig.command(AppCommand::SetCycleTime {
            pump,
            time: half_minute,
        });
    }

    assert_eq!(rig.tick(), P1);
    for _ in 0..20 {
        rig.clock.advance(2);
        assert!(rig.tick().any_on());
    }
    // 40 s in: pump 1 ran 30 s, pump 2 has 10 s.
    assert_eq!(rig.app.pumps(), P2);
}

#[test]
fn timer_turn_keeps_its_start_across_manual_detour() {
    let mut rig = Rig::new();
    rig.arm_timer(PumpCycleTime::new(0, 0, 30), PumpCycleTime::new(0, 0, 30));
    rig.hw.set_cistern_full(false);
    assert_eq!(rig.tick(), P1);

    rig.clock.advance(10);
    rig.click_mode();
    assert_eq!(rig.app.mode(), ControlMode::Manual);
    assert_eq!(rig.app.pumps(), PumpCommand::OFF);

    rig.clock.advance(10);
    rig.click_mode();
    assert_eq!(rig.app.mode(), ControlMode::AutoByTimer);
    assert_eq!(rig.app.pumps(), P1, "20 s into a 30 s turn");

    rig.clock.advance(9);
    assert_eq!(rig.tick(), P1);
    rig.clock.advance(1);
    assert_eq!(rig.tick(), P2);
}

#[test]
fn cycle_change_is_persisted_once() {
    let mut rig = Rig::new();
    let writes = rig.store.nvram().write_count();

    rig.arm_timer(PumpCycleTime::new(1, 0, 0), PumpCycleTime::new(0, 0, 30));
    rig.tick();
    rig.tick();

    assert_eq!(rig.store.nvram().write_count(), writes + 1);
    assert_eq!(rig.store.nvram().bytes(0, 6), &[1, 0, 0, 0, 0, 30]);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::CyclesPersisted(_))),
        1
    );
}

#[test]
fn persisted_cycles_survive_restart() {
    let mut rig = Rig::new();
    rig.arm_timer(PumpCycleTime::new(0, 45, 0), PumpCycleTime::new(0, 15, 0));
    rig.tick();

    let restarted = Rig::with_store(CycleStore::new(rig.store.nvram().clone()));
    assert_eq!(
        restarted.app.cycles(),
        &[PumpCycleTime::new(0, 45, 0), PumpCycleTime::new(0, 15, 0)]
    );
}

#[test]
fn failed_persist_is_reported_and_retried() {
    let mut rig = Rig::new();
    rig.store.nvram_mut().fail_writes(true);
    rig.arm_timer(PumpCycleTime::new(0, 1, 0), PumpCycleTime::new(0, 1, 0));
    rig.tick();
    assert_eq!(rig.sink.count(|e| matches!(e, AppEvent::StoreFailed(_))), 1);
    assert_eq!(rig.app.cycles()[0], PumpCycleTime::new(0, 1, 0));

    rig.store.nvram_mut().fail_writes(false);
    rig.tick();
    assert_eq!(rig.store.nvram().bytes(0, 6), &[0, 1, 0, 0, 1, 0]);
}

#[test]
fn unreadable_store_does_not_overwrite_record() {
    let mut nvram = MemoryNvram::new();
    nvram.write_record(0, &[0, 10, 0, 0, 20, 0]).unwrap();
    nvram.fail_reads(true);

    let mut rig = Rig::with_store(CycleStore::new(nvram));
    assert_eq!(rig.app.cycles(), &CycleTimes::default());
    rig.tick();
    assert_eq!(rig.store.nvram().bytes(0, 6), &[0, 10, 0, 0, 20, 0]);
}

// ── Display path ──────────────────────────────────────────────

#[test]
fn panel_edits_are_applied_and_persisted() {
    let mut rig = Rig::new();
    let mut panel = ScriptedPanel::default();
    panel.edits.push(Box::new(|v: &mut DisplayView| {
        v.mode = ControlMode::AutoByTimer;
        v.cycles[1] = PumpCycleTime::new(0, 0, 45);
    }));

    rig.refresh(&mut panel);
    assert_eq!(rig.app.mode(), ControlMode::AutoByTimer);
    assert_eq!(rig.app.cycles()[1], PumpCycleTime::new(0, 0, 45));
    // Written during the same refresh, before any control tick.
    assert_eq!(rig.store.nvram().bytes(3, 3), &[0, 0, 45]);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::CyclesPersisted(_))),
        1
    );

    rig.tick();
    rig.refresh(&mut panel);
    assert_eq!(panel.seen[1].mode, ControlMode::AutoByTimer);
    assert_eq!(
        rig.sink.count(|e| matches!(e, AppEvent::CyclesPersisted(_))),
        1
    );
}

#[test]
fn panel_cannot_store_out_of_range_time() {
    let mut rig = Rig::new();
    let mut panel = ScriptedPanel::default();
    panel.edits.push(Box::new(|v: &mut DisplayView| v.cycles[0] = PumpCycleTime::new(0, 75, 0)));
    let writes = rig.store.nvram().write_count();
    rig.refresh(&mut panel);
    assert_eq!(rig.app.cycles(), &CycleTimes::default());
    assert_eq!(rig.store.nvram().write_count(), writes);
}

// ── Actuator faults ───────────────────────────────────────────

#[test]
fn pump_write_failure_forces_all_off() {
    let mut rig = Rig::new();
    rig.hw.fail_pump_writes = true;
    rig.hw.set_cistern_full(false);
    assert_eq!(rig.tick(), PumpCommand::OFF);
    assert!(rig.hw.calls.contains(&ActuatorCall::AllOff));
}

#[test]
fn inputs_are_polled_through_the_service() {
    let mut rig = Rig::new();
    rig.app.poll_inputs(&mut rig.hw, 0);
    rig.app.poll_inputs(&mut rig.hw, 100);
    assert_eq!(rig.hw.polls, 2);
}
