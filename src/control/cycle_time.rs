//! Per-pump run duration used by the timer strategy.

use core::fmt;

use serde::{Deserialize, Serialize};

/// How long one pump runs before the timer strategy hands over to the other.
///
/// All-zero means "not armed".  Field order is the persisted byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PumpCycleTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Both pumps' durations, indexed by [`PumpId::index`](super::context::PumpId::index).
pub type CycleTimes = [PumpCycleTime; 2];

impl PumpCycleTime {
    pub const DISARMED: Self = Self::new(0, 0, 0);

    pub const MAX_HOUR: u8 = 23;
    pub const MAX_MINUTE: u8 = 59;
    pub const MAX_SECOND: u8 = 59;

    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// `None` unless every field is inside its clock range.
    pub const fn checked(hour: u8, minute: u8, second: u8) -> Option<Self> {
        let t = Self::new(hour, minute, second);
        if t.is_valid() { Some(t) } else { None }
    }

    pub const fn is_valid(&self) -> bool {
        self.hour <= Self::MAX_HOUR
            && self.minute <= Self::MAX_MINUTE
            && self.second <= Self::MAX_SECOND
    }

    pub const fn is_armed(&self) -> bool {
        self.hour != 0 || self.minute != 0 || self.second != 0
    }

    pub const fn total_secs(&self) -> u32 {
        self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32
    }
}

impl fmt::Display for PumpCycleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}
