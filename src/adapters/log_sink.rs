//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { mode, cycles } => {
                info!("START | mode={} | p1={} p2={}", mode, cycles[0], cycles[1]);
            }
            AppEvent::CyclesLoaded { cycles, origin } => {
                info!("STORE | loaded {:?} | p1={} p2={}", origin, cycles[0], cycles[1]);
            }
            AppEvent::ModeChanged { from, to } => {
                info!("MODE | {} -> {}", from, to);
            }
            AppEvent::PumpsChanged(cmd) => {
                info!("PUMPS | {}", cmd);
            }
            AppEvent::FaultDetected(flags) => {
                info!("FAULT | detected, flags=0b{:08b}", flags);
            }
            AppEvent::FaultCleared => {
                info!("FAULT | all cleared");
            }
            AppEvent::CyclesPersisted(cycles) => {
                info!("STORE | saved p1={} p2={}", cycles[0], cycles[1]);
            }
            AppEvent::StoreFailed(e) => {
                warn!("STORE | {}", e);
            }
        }
    }
}
