//! AT24C32 I²C EEPROM transport (on the DS3231 RTC module).
//!
//! ## Geometry
//!
//! - 4 KiB, 16-bit big-endian word address sent before every access.
//! - Writes must not cross a 32-byte page; each page write is followed by
//!   the 5 ms internal write cycle.
//! - Reads are chunked to 32 bytes to stay inside small controller FIFOs.
//!
//! Page splitting is invisible to callers: [`NvramPort::write_record`]
//! takes any `address + len` that fits the device.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::NvramPort;
use crate::error::NvramError;

/// 7-bit bus address with A0..A2 pulled high on the RTC module.
pub const AT24C32_I2C_ADDR: u8 = 0x57;
/// Device capacity in bytes.
pub const AT24C32_CAPACITY: usize = 4096;

const PAGE_SIZE: usize = 32;
const READ_CHUNK: usize = 32;
const WRITE_CYCLE_MS: u32 = 5;

pub struct At24c32<I, D> {
    i2c: I,
    delay: D,
    bus_addr: u8,
}

impl<I: I2c, D: DelayNs> At24c32<I, D> {
    pub fn new(i2c: I, delay: D) -> Self {
        Self::with_address(i2c, delay, AT24C32_I2C_ADDR)
    }

    pub fn with_address(i2c: I, delay: D, bus_addr: u8) -> Self {
        Self {
            i2c,
            delay,
            bus_addr,
        }
    }

    /// Give the bus back (e.g. to share it with the RTC driver).
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }
}

fn check_range(address: u16, len: usize) -> Result<(), NvramError> {
    if address as usize + len > AT24C32_CAPACITY {
        return Err(NvramError::OutOfRange);
    }
    Ok(())
}

impl<I: I2c, D: DelayNs> NvramPort for At24c32<I, D> {
    fn read_record(&mut self, address: u16, buf: &mut [u8]) -> Result<(), NvramError> {
        check_range(address, buf.len())?;
        let mut addr = address;
        for chunk in buf.chunks_mut(READ_CHUNK) {
            self.i2c
                .write_read(self.bus_addr, &addr.to_be_bytes(), chunk)
                .map_err(|e| {
                    warn!("AT24C32: read at 0x{:04X} failed: {:?}", addr, e);
                    NvramError::Bus
                })?;
            addr += chunk.len() as u16;
        }
        Ok(())
    }

    fn write_record(&mut self, address: u16, data: &[u8]) -> Result<(), NvramError> {
        check_range(address, data.len())?;
        let mut addr = address as usize;
        let mut rest = data;
        while !rest.is_empty() {
            let n = (PAGE_SIZE - addr % PAGE_SIZE).min(rest.len());
            let mut frame = [0u8; 2 + PAGE_SIZE];
            frame[..2].copy_from_slice(&(addr as u16).to_be_bytes());
            frame[2..2 + n].copy_from_slice(&rest[..n]);

            self.i2c
                .write(self.bus_addr, &frame[..2 + n])
                .map_err(|e| {
                    warn!("AT24C32: page write at 0x{:04X} failed: {:?}", addr, e);
                    NvramError::Bus
                })?;
            self.delay.delay_ms(WRITE_CYCLE_MS);

            addr += n;
            rest = &rest[n..];
        }
        Ok(())
    }
}
