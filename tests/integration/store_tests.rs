//! Cycle store against the AT24C32 driver on a simulated I²C bus.
//!
//! Checks that the record reaches the device at the fixed address with the
//! fixed byte layout, whatever the transport does underneath.

use cistern_pump::control::cycle_time::{CycleTimes, PumpCycleTime};
use cistern_pump::cycle_store::{CycleStore, LoadOrigin};
use cistern_pump::drivers::eeprom::{AT24C32_CAPACITY, AT24C32_I2C_ADDR, At24c32};
use cistern_pump::error::{NvramError, StoreError};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation};

/// Byte-addressed EEPROM behind a 7-bit address.
struct SimBus {
    mem: Vec<u8>,
    pointer: usize,
    nack: bool,
}

impl SimBus {
    fn erased() -> Self {
        Self {
            mem: vec![0xFF; AT24C32_CAPACITY],
            pointer: 0,
            nack: false,
        }
    }
}

impl ErrorType for SimBus {
    type Error = ErrorKind;
}

impl I2c for SimBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.nack || address != AT24C32_I2C_ADDR {
            return Err(ErrorKind::Other);
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.pointer = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
                    for b in &bytes[2..] {
                        self.mem[self.pointer] = *b;
                        self.pointer += 1;
                    }
                }
                Operation::Read(buf) => {
                    for b in buf.iter_mut() {
                        *b = self.mem[self.pointer];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn store(bus: SimBus) -> CycleStore<At24c32<SimBus, NoDelay>> {
    CycleStore::new(At24c32::new(bus, NoDelay))
}

#[test]
fn fresh_device_is_initialised_with_zeros() {
    let mut s = store(SimBus::erased());
    let (cycles, origin) = s.load_with_origin().unwrap();
    assert_eq!(origin, LoadOrigin::Initialised);
    assert_eq!(cycles, CycleTimes::default());

    let mut again = store(SimBus {
        mem: dump(s),
        pointer: 0,
        nack: false,
    });
    assert_eq!(again.load_with_origin().unwrap().1, LoadOrigin::Stored);
}

#[test]
fn record_lands_at_address_zero() {
    let mut s = store(SimBus::erased());
    s.load().unwrap();
    s.save(&[PumpCycleTime::new(2, 30, 0), PumpCycleTime::new(0, 0, 30)])
        .unwrap();
    let mem = dump(s);
    assert_eq!(&mem[..6], &[2, 30, 0, 0, 0, 30]);
    assert!(mem[6..].iter().all(|b| *b == 0xFF));
}

#[test]
fn nack_surfaces_as_transport_error() {
    let mut bus = SimBus::erased();
    bus.nack = true;
    let mut s = store(bus);
    assert_eq!(s.load(), Err(StoreError::Transport(NvramError::Bus)));
}

fn dump(s: CycleStore<At24c32<SimBus, NoDelay>>) -> Vec<u8> {
    let mut s = s;
    let mut mem = vec![0u8; AT24C32_CAPACITY];
    use cistern_pump::app::ports::NvramPort;
    s.nvram_mut().read_record(0, &mut mem).unwrap();
    mem
}
