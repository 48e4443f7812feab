//! Error types for the transfer-station firmware.
//!
//! Storage and GPIO failures never stop the control loop: they are reported
//! as [`AppEvent`](crate::app::events::AppEvent)s and degrade to pumps off.
//! Only startup configuration is fatal, through [`Error`].  All types are
//! `Copy` so they can be passed through events and logs without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Startup failure that aborts boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// NVRAM transport errors
// ---------------------------------------------------------------------------

/// Failures raised by an [`NvramPort`](crate::app::ports::NvramPort)
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NvramError {
    /// The device did not acknowledge, or the bus transaction failed.
    Bus,
    /// `address + len` runs past the end of the device.
    OutOfRange,
}

impl fmt::Display for NvramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "bus transaction failed"),
            Self::OutOfRange => write!(f, "address out of range"),
        }
    }
}

// ---------------------------------------------------------------------------
// Cycle store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The underlying NVRAM transport failed.
    Transport(NvramError),
    /// The record could not be encoded or decoded.
    Codec,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Codec => write!(f, "record codec failure"),
        }
    }
}

impl From<NvramError> for StoreError {
    fn from(e: NvramError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwError {
    /// GPIO write returned an error.
    GpioWriteFailed(i32),
}

impl fmt::Display for HwError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed(pin) => write!(f, "GPIO {pin} write failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Safety interlocks
// ---------------------------------------------------------------------------

/// Interlocks tracked by the safety supervisor as a bitfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SafetyFault {
    /// The well float reports empty; no pump may run.
    WellEmpty = 0b0000_0001,
}

impl SafetyFault {
    /// Return the bitmask for this fault.
    pub const fn mask(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for SafetyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WellEmpty => write!(f, "well empty"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
