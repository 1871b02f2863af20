//! Fuzz target for the anonymisation pass.
//!
//! Arbitrary bytes must never panic the pass, whichever field is requested.
//! The first input byte picks the field from the parsed header.

#![no_main]

use csv_anon::{Anonymiser, CsvSource, InputConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 || data.is_empty() {
        return;
    }

    let (selector, body) = (data[0] as usize, &data[1..]);
    let config = InputConfig::default();

    let mut probe = CsvSource::from_reader(body, &config);
    let field = match probe.read_header() {
        Ok(header) if !header.is_empty() => header.columns()[selector % header.len()].clone(),
        _ => "field".to_string(),
    };

    let mut source = CsvSource::from_reader(body, &config);
    let _ = Anonymiser::new().anonymise_to_writer(&mut source, std::io::sink(), &field);
});
