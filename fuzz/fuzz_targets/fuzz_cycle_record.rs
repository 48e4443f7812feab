//! Fuzz target: cycle record decoding
//!
//! Places arbitrary bytes at the record address and loads them through
//! `CycleStore`, verifying:
//! - No panics under arbitrary byte inputs
//! - Loaded durations are always inside their clock ranges
//! - A rejected record is replaced on the device by exactly what was loaded
//!
//! cargo fuzz run fuzz_cycle_record

#![no_main]

use cistern_pump::adapters::nvram::MemoryNvram;
use cistern_pump::app::ports::NvramPort;
use cistern_pump::control::cycle_time::PumpCycleTime;
use cistern_pump::cycle_store::{CycleStore, LoadOrigin, CYCLE_RECORD_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut nvram = MemoryNvram::new();
    let len = data.len().min(CYCLE_RECORD_LEN);
    if nvram.write_record(0, &data[..len]).is_err() {
        return;
    }

    let mut store = CycleStore::new(nvram);
    let (cycles, origin) = store.load_with_origin().expect("memory backend never fails");
    assert!(cycles.iter().all(PumpCycleTime::is_valid));

    if origin != LoadOrigin::Stored {
        let [p1, p2] = cycles;
        let expected = [p1.hour, p1.minute, p1.second, p2.hour, p2.minute, p2.second];
        assert_eq!(store.nvram().bytes(0, CYCLE_RECORD_LEN), &expected);
    }
});
