#![no_main]

use exprfuzz::{evaluate_str, ReferenceLimits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = evaluate_str(s, &ReferenceLimits::default());
    }
});
