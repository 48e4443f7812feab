//! Asymmetric debounce for buttons and float switches.
//!
//! ## Rule
//!
//! | Raw line  | Stable state | Accepted when                                   |
//! |-----------|--------------|-------------------------------------------------|
//! | active    | inactive     | `window_ms` elapsed since the last accepted activation |
//! | inactive  | active       | immediately                                     |
//!
//! Only activations are filtered.  Contact chatter on press therefore
//! produces a single accepted activation per window; a release is never
//! delayed.  The worst case is one missed activation inside the window,
//! which is accepted.
//!
//! `poll()` is driven from the input cadence of the scheduler, not from
//! every loop iteration.

use embedded_hal::digital::InputPin;
use log::warn;

/// Default activation window (milliseconds).
pub const DEBOUNCE_WINDOW_MS: u32 = 200;

/// A GPIO input filtered into a stable logical signal.
pub struct DebouncedInput<P> {
    pin: P,
    gpio: i32,
    window_ms: u32,
    /// Timestamp of the last accepted activation; `None` until the first.
    last_active_ms: Option<u32>,
    stable: bool,
    read_fault: bool,
}

impl<P: InputPin> DebouncedInput<P> {
    pub fn new(pin: P, gpio: i32) -> Self {
        Self::with_window(pin, gpio, DEBOUNCE_WINDOW_MS)
    }

    pub fn with_window(pin: P, gpio: i32, window_ms: u32) -> Self {
        Self {
            pin,
            gpio,
            window_ms,
            last_active_ms: None,
            stable: false,
            read_fault: false,
        }
    }

    /// GPIO this input is bound to.
    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Sample the raw line and update the stable state.
    ///
    /// A failed read keeps the previous stable state.
    pub fn poll(&mut self, now_ms: u32) {
        match self.pin.is_high() {
            Ok(raw) => {
                self.read_fault = false;
                self.update(raw, now_ms);
            }
            Err(e) => {
                if !self.read_fault {
                    warn!("GPIO {}: read failed ({:?}), holding last state", self.gpio, e);
                }
                self.read_fault = true;
            }
        }
    }

    /// Last stable state.
    pub fn is_active(&self) -> bool {
        self.stable
    }

    fn update(&mut self, raw: bool, now_ms: u32) {
        if !raw {
            self.stable = false;
            return;
        }
        if self.stable {
            return;
        }
        let accepted = self
            .last_active_ms
            .is_none_or(|last| now_ms.wrapping_sub(last) >= self.window_ms);
        if accepted {
            self.last_active_ms = Some(now_ms);
            self.stable = true;
        }
    }
}
