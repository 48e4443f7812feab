//! Timer-driven strategy.
//!
//! Runs the same fill cycle as the sensor strategy, but each pump's turn
//! is bounded by its configured [`PumpCycleTime`].  When the active pump
//! has run for its duration the fill is handed to the other pump, whether
//! or not the cistern is full yet.
//!
//! ## Rules
//!
//! - Both durations must be armed.  Otherwise the pumps stay off and the
//!   fill cycle is held at Idle with its cistern latch primed, so arming
//!   while the cistern is low starts a fill straight away.
//! - Elapsed time is measured from the last hand-over (or the fill start).
//! - Resuming after a well pause restarts the measurement, so time spent
//!   paused is not charged to the active pump.

use log::info;

use super::PumpStrategy;
use super::context::{ControlInputs, PumpCommand, PumpId, Timestamp};
use super::cycle_time::{CycleTimes, PumpCycleTime};
use super::fill::{FillCycle, FillEvent, FillPhase};

#[derive(Debug, Clone, Default)]
pub struct TimerStrategy {
    cycle: FillCycle,
    cycles: CycleTimes,
    /// Start of the active pump's current turn.
    turn_started: Option<Timestamp>,
    disarmed_logged: bool,
}

impl TimerStrategy {
    pub fn new(cycles: CycleTimes) -> Self {
        Self {
            cycles,
            ..Self::default()
        }
    }

    pub fn cycles(&self) -> &CycleTimes {
        &self.cycles
    }

    pub fn set_cycles(&mut self, cycles: CycleTimes) {
        self.cycles = cycles;
    }

    pub fn set_cycle(&mut self, pump: PumpId, time: PumpCycleTime) {
        self.cycles[pump.index()] = time;
    }

    pub fn is_armed(&self) -> bool {
        self.cycles.iter().all(PumpCycleTime::is_armed)
    }

    pub fn cycle(&self) -> &FillCycle {
        &self.cycle
    }

    pub fn active_pump(&self) -> PumpId {
        self.cycle.active_pump()
    }

    fn hold_disarmed(&mut self) {
        if !self.disarmed_logged {
            info!("TIMER | cycle times not armed, pumps held off");
            self.disarmed_logged = true;
        }
        self.cycle.reset();
        self.turn_started = None;
    }
}

impl PumpStrategy for TimerStrategy {
    fn name(&self) -> &'static str {
        "timer"
    }

    fn tick(&mut self, inputs: &ControlInputs) -> PumpCommand {
        if !self.is_armed() {
            self.hold_disarmed();
            return PumpCommand::OFF;
        }
        self.disarmed_logged = false;

        match self.cycle.step(inputs) {
            Some(FillEvent::Started) => {
                info!("TIMER | fill started on {:?}", self.cycle.active_pump());
                self.turn_started = Some(inputs.now);
            }
            Some(FillEvent::Resumed) => {
                info!("TIMER | well refilled, {:?} turn restarted", self.cycle.active_pump());
                self.turn_started = Some(inputs.now);
            }
            Some(FillEvent::Paused) => info!("TIMER | well empty, fill paused"),
            Some(FillEvent::Completed) | Some(FillEvent::Abandoned) => {
                info!("TIMER | cistern full, fill ended");
                self.turn_started = None;
            }
            None => {}
        }

        if self.cycle.is_pumping() {
            let started = *self.turn_started.get_or_insert(inputs.now);
            let limit = self.cycles[self.cycle.active_pump().index()].total_secs();
            if inputs.now.secs_since(started) >= limit {
                self.cycle.alternate();
                self.turn_started = Some(inputs.now);
                info!(
                    "TIMER | {}s elapsed, switching to {:?}",
                    limit,
                    self.cycle.active_pump()
                );
            }
        } else if self.cycle.phase() == FillPhase::Idle {
            self.turn_started = None;
        }

        self.cycle.command()
    }
}
