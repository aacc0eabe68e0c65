//! Fuzz test for the status-file parser.
//!
//! Run with: cargo +nightly fuzz run parser_fuzz -- -max_total_time=60

#![no_main]

use lcfg_io::parse_component;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // The parser should handle any UTF-8 text without panicking, returning
    // Ok(component) or Err(parse error) for every input.
    if let Ok(input) = std::str::from_utf8(data) {
        let _ = parse_component("fuzzcomp", input);
    }
});
