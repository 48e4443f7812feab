//! System configuration parameters
//!
//! Timing for the cooperative loop and the input debounce.  The pump cycle
//! durations are user data, not configuration; they live in the
//! [`CycleStore`](crate::cycle_store::CycleStore).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Inputs ---
    /// Minimum spacing between two accepted activations of one input line.
    pub debounce_window_ms: u32,

    // --- Cadences ---
    /// Input polling period (milliseconds)
    pub input_poll_interval_ms: u32,
    /// Mode selection + pump strategy period (milliseconds)
    pub control_interval_ms: u32,
    /// Display refresh period (milliseconds)
    pub display_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: 200,

            input_poll_interval_ms: 100, // 10 Hz
            control_interval_ms: 200,    // 5 Hz
            display_interval_ms: 1000,   // 1 Hz
        }
    }
}

impl SystemConfig {
    /// Reject configurations the cooperative loop cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.input_poll_interval_ms == 0
            || self.control_interval_ms == 0
            || self.display_interval_ms == 0
        {
            return Err(Error::Config("cadence periods must be non-zero"));
        }
        if self.input_poll_interval_ms > self.control_interval_ms {
            return Err(Error::Config(
                "input polling must not be slower than the control tick",
            ));
        }
        if !(10..=5000).contains(&self.debounce_window_ms) {
            return Err(Error::Config("debounce_window_ms must be 10–5000"));
        }
        Ok(())
    }
}
