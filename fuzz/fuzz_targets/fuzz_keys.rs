//! Fuzz target for the entry state machine.
//!
//! Replays arbitrary key streams and checks the entry invariants after
//! every key.

#![no_main]

use arbitrary::Arbitrary;
use card_entry::{format, guess_brand, CardBrand, CardEntry, EntryPhase, FixedClock, KeyEvent};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    year: u16,
    month: u8,
    keys: Vec<Option<u8>>,
}

fuzz_target!(|input: Input| {
    let Some(clock) = FixedClock::new(input.year, input.month % 12 + 1) else {
        return;
    };
    let mut entry = CardEntry::with_clock(clock);

    for key in input.keys {
        let event = match key {
            Some(value) => KeyEvent::Digit(value),
            None => KeyEvent::Backspace,
        };

        let result = entry.apply(event);
        if matches!(event, KeyEvent::Digit(value) if value > 9) {
            assert!(result.is_err());
        }

        let number = entry.number_digits();
        let brand = entry.brand();
        if number.len() >= 2 {
            assert_eq!(brand, guess_brand(number));
        } else {
            assert_eq!(brand, CardBrand::Unknown);
        }
        assert!(number.len() <= brand.total_digits());
        assert_eq!(format::strip_formatting(entry.formatted_number()), entry.number());
        assert!(!entry.is_error() || entry.phase() == EntryPhase::Number);
        assert!(entry.cvc().len() <= brand.cvc_digits());
        if let Some(expiry) = entry.expiry() {
            assert!(!expiry.is_expired(&clock));
        }
    }
});
