//! Inbound commands to the application service.
//!
//! These represent actions requested by the operator panel (menu and
//! navigation buttons) that the [`AppService`](super::service::AppService)
//! interprets and acts upon.

use crate::control::ControlMode;
use crate::control::context::PumpId;
use crate::control::cycle_time::PumpCycleTime;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Switch control mode (the menu may pick either automatic mode).
    SetMode(ControlMode),

    /// Change one pump's timer duration.  Persisted on the next control tick.
    SetCycleTime { pump: PumpId, time: PumpCycleTime },
}
