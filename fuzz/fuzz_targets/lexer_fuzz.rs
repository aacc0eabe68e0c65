//! Fuzz test for the status-key parser and tag-list tokeniser.
//!
//! Run with: cargo +nightly fuzz run lexer_fuzz -- -max_total_time=60

#![no_main]

use lcfg_core::{Resource, TagList};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Key parsing should never panic, only return Ok or Err.
        let _ = Resource::parse_key(input);

        // Tag-list tokenisation should never panic either.
        let _ = TagList::from_string(input);
    }
});
