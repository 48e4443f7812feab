//! Operator-panel adapter that renders the 16×2 LCD contents to the log.
//!
//! The real menu and navigation code is an external collaborator.  This
//! adapter renders what the LCD would show and logs it whenever it
//! changes.  Panel edits (mode or cycle changes made through the menu)
//! are queued with [`LogDisplay::queue_mode`] / [`LogDisplay::queue_cycle`]
//! and written into the view on the next refresh.

use core::fmt::Write;

use heapless::String;
use log::{info, warn};

use crate::app::ports::{DisplayPort, DisplayView};
use crate::control::ControlMode;
use crate::control::context::PumpId;
use crate::control::cycle_time::PumpCycleTime;

pub const LCD_COLUMNS: usize = 16;

pub type LcdLine = String<LCD_COLUMNS>;

#[derive(Debug, Default)]
pub struct LogDisplay {
    lines: (LcdLine, LcdLine),
    pending_mode: Option<ControlMode>,
    pending_cycles: [Option<PumpCycleTime>; 2],
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_mode(&mut self, mode: ControlMode) {
        self.pending_mode = Some(mode);
    }

    pub fn queue_cycle(&mut self, pump: PumpId, time: PumpCycleTime) {
        self.pending_cycles[pump.index()] = Some(time);
    }

    /// Lines shown by the last refresh.
    pub fn lines(&self) -> (&str, &str) {
        (self.lines.0.as_str(), self.lines.1.as_str())
    }
}

impl DisplayPort for LogDisplay {
    fn refresh(&mut self, view: &mut DisplayView) {
        if let Some(mode) = self.pending_mode.take() {
            view.mode = mode;
        }
        for (slot, pending) in view.cycles.iter_mut().zip(self.pending_cycles.iter_mut()) {
            if let Some(time) = pending.take() {
                *slot = time;
            }
        }

        let lines = render(view);
        if lines != self.lines {
            info!("LCD | {:<16} | {:<16} |", lines.0, lines.1);
            self.lines = lines;
        }
    }
}

/// Render the two LCD lines for `view`.
pub fn render(view: &DisplayView) -> (LcdLine, LcdLine) {
    let mut top = LcdLine::new();
    let mut bottom = LcdLine::new();

    let title = match view.mode {
        ControlMode::AutoBySensors => "AUTO: SENSORS",
        ControlMode::AutoByTimer => "AUTO: TIMER",
        ControlMode::Manual => "MANUAL",
    };
    push(&mut top, format_args!("{title}"));

    if view.well_empty {
        push(&mut bottom, format_args!("WELL EMPTY"));
    } else {
        let on_off = |b: bool| if b { "ON" } else { "off" };
        push(
            &mut bottom,
            format_args!("P1:{:<4}P2:{}", on_off(view.pumps.pump1), on_off(view.pumps.pump2)),
        );
    }

    (top, bottom)
}

fn push(line: &mut LcdLine, args: core::fmt::Arguments<'_>) {
    if line.write_fmt(args).is_err() {
        warn!("LCD | line overflow, truncated");
    }
}
