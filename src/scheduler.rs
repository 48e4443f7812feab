//! Cooperative cadence scheduler.
//!
//! One thread, three independent periods.  Every loop iteration the main
//! loop calls [`Scheduler::tick`] with the free-running millisecond
//! counter; each cadence whose period has elapsed is reported to a
//! [`SchedulerDelegate`].
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  main loop ──▶ Scheduler::tick(now_ms)                       │
//! │                  │                                           │
//! │                  ├─ PollInputs      (every input period)     │
//! │                  ├─ Control         (every control period)   │
//! │                  └─ RefreshDisplay  (every display period)   │
//! │                          │                                   │
//! │                          ▼                                   │
//! │                 SchedulerDelegate::on_task_due               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Due tasks are always dispatched in the order above, so a control tick
//! sees inputs polled in the same iteration.  Period checks use wrapping
//! subtraction; the millisecond counter may roll over.

use crate::app::ports::{CadenceTask, SchedulerDelegate};
use crate::config::SystemConfig;

// ═══════════════════════════════════════════════════════════════
//  Cadence
// ═══════════════════════════════════════════════════════════════

/// A "time since last run ≥ period" gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    period_ms: u32,
    /// `None` until the first run, which happens on the first check.
    last_run_ms: Option<u32>,
}

impl Cadence {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_run_ms: None,
        }
    }

    /// Returns `true` and restarts the period if it has elapsed.
    pub fn due(&mut self, now_ms: u32) -> bool {
        let due = self
            .last_run_ms
            .is_none_or(|last| now_ms.wrapping_sub(last) >= self.period_ms);
        if due {
            self.last_run_ms = Some(now_ms);
        }
        due
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// The scheduler engine.
///
/// Decoupled from the service: it only reports which cadence is due and
/// the delegate decides what that means.
pub struct Scheduler {
    inputs: Cadence,
    control: Cadence,
    display: Cadence,
}

impl Scheduler {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            inputs: Cadence::new(config.input_poll_interval_ms),
            control: Cadence::new(config.control_interval_ms),
            display: Cadence::new(config.display_interval_ms),
        }
    }

    /// Dispatch every cadence that is due at `now_ms`.
    pub fn tick(&mut self, now_ms: u32, delegate: &mut dyn SchedulerDelegate) {
        if self.inputs.due(now_ms) {
            delegate.on_task_due(CadenceTask::PollInputs);
        }
        if self.control.due(now_ms) {
            delegate.on_task_due(CadenceTask::Control);
        }
        if self.display.due(now_ms) {
            delegate.on_task_due(CadenceTask::RefreshDisplay);
        }
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
