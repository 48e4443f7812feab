//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                  |
//! |----------------|--------------------|------------------------------|
//! | `hardware`     | SensorPort         | Debounced GPIO inputs        |
//! |                | ActuatorPort       | Pump / indicator GPIO        |
//! | `log_display`  | DisplayPort        | 16×2 LCD contents via log    |
//! | `log_sink`     | EventSink          | Serial log output            |
//! | `nvram`        | NvramPort          | In-memory EEPROM (host)      |
//! | `time`         | ClockPort          | ESP32 system timer           |
//!
//! The AT24C32 driver in [`crate::drivers::eeprom`] is the on-target
//! `NvramPort`.

pub mod hardware;
pub mod log_display;
pub mod log_sink;
pub mod nvram;
pub mod time;
