//! Fuzz target for seeding an entry.
//!
//! Tests that reset never panics and leaves the entry untouched on error.

#![no_main]

use card_entry::{CardEntry, FixedClock};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Some(clock) = FixedClock::new(2026, 10) else {
        return;
    };
    let mut entry = CardEntry::with_clock(clock);
    entry.reset(Some("4111")).expect("4111 is a valid seed");

    let before = entry.snapshot();
    match entry.reset(Some(data)) {
        Ok(()) => assert_eq!(entry.number(), data),
        Err(_) => assert_eq!(entry.snapshot(), before),
    }
});
