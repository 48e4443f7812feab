//! ESP32 time adapter.
//!
//! Provides monotonic time for the cooperative loop and the timer strategy.
//!
//! - **`target_os = "espidf"`**: wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`**: uses `std::time::Instant` for
//!   host-side testing and simulation.
//!
//! The timer strategy only needs elapsed whole seconds, so uptime serves
//! as its [`ClockPort`].

use crate::app::ports::ClockPort;
use crate::control::context::Timestamp;

/// Time adapter for the ESP32-S3 platform.
pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Microseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_us(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
    }

    /// Microseconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    /// Free-running millisecond counter for cadence gates.  Wraps after
    /// ~49 days; consumers use wrapping subtraction.
    pub fn uptime_ms(&self) -> u32 {
        (self.uptime_us() / 1_000) as u32
    }

    /// Seconds since boot (monotonic).
    pub fn uptime_secs(&self) -> u32 {
        (self.uptime_us() / 1_000_000) as u32
    }
}

impl ClockPort for SystemClock {
    fn now(&mut self) -> Timestamp {
        Timestamp::from_secs(self.uptime_secs())
    }
}
