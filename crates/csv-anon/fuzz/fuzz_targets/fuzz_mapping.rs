//! Fuzz target for mapping file loading.

#![no_main]

use csv_anon::MappingTable;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    if let Ok(table) = MappingTable::from_reader(data) {
        for entry in table.entries() {
            assert_eq!(table.original_for(&entry.token), Some(entry.original.as_str()));
        }
    }
});
