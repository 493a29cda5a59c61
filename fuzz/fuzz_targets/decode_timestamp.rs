#![no_main]

// Harness: decode_timestamp – arbitrary text must either fail with a
// FormatError or decode to a timestamp whose encoding decodes back to it.

use libfuzzer_sys::fuzz_target;
use hlc_core::time::Timestamp;

fuzz_target!(|text: &str| {
    if let Ok(ts) = Timestamp::decode(text) {
        let re = Timestamp::decode(&ts.encode());
        // Segments are dash-free, so decoded fields are never negative.
        assert_eq!(re, Ok(ts));
    }
});
