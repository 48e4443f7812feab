//! GPIO and bus drivers.  Everything here is generic over `embedded-hal`
//! traits so the same code runs on the ESP32 and against [`sim`] lines.

pub mod debounce;
pub mod eeprom;
pub mod output;
pub mod sim;
