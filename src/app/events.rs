//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them; the firmware logs them to serial.

use crate::control::ControlMode;
use crate::control::context::PumpCommand;
use crate::control::cycle_time::CycleTimes;
use crate::cycle_store::LoadOrigin;
use crate::error::StoreError;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started { mode: ControlMode, cycles: CycleTimes },

    /// The cycle record was loaded at boot.
    CyclesLoaded { cycles: CycleTimes, origin: LoadOrigin },

    /// The active control mode changed.
    ModeChanged { from: ControlMode, to: ControlMode },

    /// The pump outputs changed.
    PumpsChanged(PumpCommand),

    /// One or more safety faults were raised.
    FaultDetected(u8),

    /// All safety faults have been cleared.
    FaultCleared,

    /// Changed cycle durations were written to NVRAM.
    CyclesPersisted(CycleTimes),

    /// Reading or writing the cycle record failed.
    StoreFailed(StoreError),
}
