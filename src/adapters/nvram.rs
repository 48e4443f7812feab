//! In-memory NVRAM backend.
//!
//! Models a factory-fresh AT24C32: 4 KiB, every byte `0xFF`.  Used by the
//! host build and the tests in place of the I²C EEPROM driver, with fault
//! injection for the transport-failure paths.

use log::info;

use crate::app::ports::NvramPort;
use crate::drivers::eeprom::AT24C32_CAPACITY;
use crate::error::NvramError;

#[derive(Debug, Clone)]
pub struct MemoryNvram {
    mem: Vec<u8>,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryNvram {
    pub fn new() -> Self {
        Self::with_capacity(AT24C32_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        info!("MemoryNvram: simulation backend ({} bytes, erased)", capacity);
        Self {
            mem: vec![0xFF; capacity],
            writes: 0,
            fail_reads: false,
            fail_writes: false,
        }
    }

    /// Raw view of `len` bytes at `address`.
    pub fn bytes(&self, address: usize, len: usize) -> &[u8] {
        &self.mem[address..address + len]
    }

    /// Number of successful `write_record` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Return every byte to `0xFF`.
    pub fn erase(&mut self) {
        self.mem.fill(0xFF);
    }

    fn span(&self, address: u16, len: usize) -> Result<core::ops::Range<usize>, NvramError> {
        let start = address as usize;
        let end = start + len;
        if end > self.mem.len() {
            return Err(NvramError::OutOfRange);
        }
        Ok(start..end)
    }
}

impl Default for MemoryNvram {
    fn default() -> Self {
        Self::new()
    }
}

impl NvramPort for MemoryNvram {
    fn read_record(&mut self, address: u16, buf: &mut [u8]) -> Result<(), NvramError> {
        let span = self.span(address, buf.len())?;
        if self.fail_reads {
            return Err(NvramError::Bus);
        }
        buf.copy_from_slice(&self.mem[span]);
        Ok(())
    }

    fn write_record(&mut self, address: u16, data: &[u8]) -> Result<(), NvramError> {
        let span = self.span(address, data.len())?;
        if self.fail_writes {
            return Err(NvramError::Bus);
        }
        self.mem[span].copy_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}
