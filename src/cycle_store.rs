//! Persistent store for the two pump cycle durations.
//!
//! ## Record layout (address 0, 6 bytes)
//!
//! ```text
//!   ┌────────┬────────┬────────┬────────┬────────┬────────┐
//!   │ p1 hh  │ p1 mm  │ p1 ss  │ p2 hh  │ p2 mm  │ p2 ss  │
//!   └────────┴────────┴────────┴────────┴────────┴────────┘
//! ```
//!
//! The layout is what postcard produces for `[PumpCycleTime; 2]` and must
//! stay byte-compatible across firmware versions.
//!
//! - All six bytes `0xFF` means the device was never written: defaults are
//!   substituted and written back.
//! - Otherwise each pump's 3-byte slot is checked on its own.  A slot with
//!   a field outside its clock range (an erased slot included) is reset to
//!   `00:00:00` with a warning; the other slot keeps its value, and the
//!   repaired record is written back.
//! - Writes happen only when the encoded record differs from the last one
//!   known to be on the device, to spare EEPROM endurance.

use log::{info, warn};

use crate::app::ports::NvramPort;
use crate::control::cycle_time::{CycleTimes, PumpCycleTime};
use crate::error::StoreError;

pub const CYCLE_RECORD_ADDR: u16 = 0x0000;
pub const CYCLE_RECORD_LEN: usize = 6;
const SLOT_LEN: usize = 3;

const ERASED: [u8; CYCLE_RECORD_LEN] = [0xFF; CYCLE_RECORD_LEN];

/// How [`CycleStore::load`] arrived at its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// A valid record was read.
    Stored,
    /// The device was erased; defaults were written.
    Initialised,
    /// At least one slot held out-of-range fields and was reset; the
    /// repaired record was written.
    Repaired,
}

pub struct CycleStore<N> {
    nvram: N,
    /// Bytes known to be on the device at the record address.
    persisted: Option<[u8; CYCLE_RECORD_LEN]>,
}

impl<N: NvramPort> CycleStore<N> {
    pub fn new(nvram: N) -> Self {
        Self {
            nvram,
            persisted: None,
        }
    }

    /// Read the record, self-healing an erased or corrupted device.
    pub fn load(&mut self) -> Result<CycleTimes, StoreError> {
        self.load_with_origin().map(|(cycles, _)| cycles)
    }

    pub fn load_with_origin(&mut self) -> Result<(CycleTimes, LoadOrigin), StoreError> {
        let mut raw = [0u8; CYCLE_RECORD_LEN];
        self.nvram.read_record(CYCLE_RECORD_ADDR, &mut raw)?;

        if raw == ERASED {
            info!("STORE | cycle record erased, writing defaults");
            let defaults = CycleTimes::default();
            self.save(&defaults)?;
            return Ok((defaults, LoadOrigin::Initialised));
        }

        let mut cycles = CycleTimes::default();
        let mut repaired = false;
        let slots = cycles.iter_mut().zip(raw.chunks_exact(SLOT_LEN));
        for (pump, (time, slot)) in slots.enumerate() {
            match decode_slot(slot) {
                Some(t) => *time = t,
                None => {
                    warn!("STORE | pump {} cycle {:02X?} out of range, reset", pump + 1, slot);
                    repaired = true;
                }
            }
        }

        if repaired {
            self.save(&cycles)?;
            return Ok((cycles, LoadOrigin::Repaired));
        }
        self.persisted = Some(raw);
        Ok((cycles, LoadOrigin::Stored))
    }

    /// Write the record unconditionally.
    ///
    /// The snapshot is only advanced once the transport reports success,
    /// so a failed write is retried by the next [`save_if_changed`](Self::save_if_changed).
    pub fn save(&mut self, cycles: &CycleTimes) -> Result<(), StoreError> {
        let bytes = encode(cycles)?;
        self.nvram.write_record(CYCLE_RECORD_ADDR, &bytes)?;
        self.persisted = Some(bytes);
        Ok(())
    }

    /// Write only if `cycles` differs byte-for-byte from the last persisted
    /// record.  Returns whether a write happened.
    pub fn save_if_changed(&mut self, cycles: &CycleTimes) -> Result<bool, StoreError> {
        let bytes = encode(cycles)?;
        if self.persisted == Some(bytes) {
            return Ok(false);
        }
        self.nvram.write_record(CYCLE_RECORD_ADDR, &bytes)?;
        self.persisted = Some(bytes);
        Ok(true)
    }

    /// Treat `cycles` as already on the device without writing it.
    ///
    /// Used after a failed load so that in-memory defaults do not
    /// overwrite a record that may still be valid.
    pub fn assume_persisted(&mut self, cycles: &CycleTimes) -> Result<(), StoreError> {
        self.persisted = Some(encode(cycles)?);
        Ok(())
    }

    pub fn nvram(&self) -> &N {
        &self.nvram
    }

    pub fn nvram_mut(&mut self) -> &mut N {
        &mut self.nvram
    }
}

fn encode(cycles: &CycleTimes) -> Result<[u8; CYCLE_RECORD_LEN], StoreError> {
    let mut buf = [0u8; CYCLE_RECORD_LEN];
    let used = postcard::to_slice(cycles, &mut buf)
        .map_err(|_| StoreError::Codec)?
        .len();
    if used != CYCLE_RECORD_LEN {
        return Err(StoreError::Codec);
    }
    Ok(buf)
}

fn decode_slot(slot: &[u8]) -> Option<PumpCycleTime> {
    postcard::from_bytes::<PumpCycleTime>(slot)
        .ok()
        .filter(PumpCycleTime::is_valid)
}
