//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use card_entry::{
    detect::guess_brand,
    format::{format_number, strip_formatting},
    luhn, mask, CardBrand, CardEntry, EntryPhase, FixedClock, KeyEvent, KeyOutcome, ReplayExt,
};
use proptest::prelude::*;
use std::sync::{Arc, Mutex};

// =============================================================================
// STRATEGIES
// =============================================================================

fn digits(len: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(0u8..=9, len)
}

fn brand_strategy() -> impl Strategy<Value = CardBrand> {
    prop_oneof![
        Just(CardBrand::Visa),
        Just(CardBrand::Mastercard),
        Just(CardBrand::Amex),
        Just(CardBrand::Unknown),
    ]
}

/// A Luhn-valid number of the brand's length whose prefix detects as the brand.
fn valid_number(brand: CardBrand) -> impl Strategy<Value = Vec<u8>> {
    let prefix = match brand {
        CardBrand::Visa => Just(vec![4u8, 1]).boxed(),
        CardBrand::Mastercard => (1u8..=5).prop_map(|d| vec![5, d]).boxed(),
        CardBrand::Amex => prop_oneof![Just(vec![3u8, 4]), Just(vec![3u8, 7])].boxed(),
        CardBrand::Unknown => Just(vec![6u8, 0]).boxed(),
    };
    let body_len = brand.total_digits() - 3;
    (prefix, digits(body_len..=body_len)).prop_map(|(mut number, body)| {
        number.extend(body);
        let check = luhn::generate_check_digit(&number);
        number.push(check);
        number
    })
}

/// Mostly digits, with enough backspaces to walk back across fields.
fn key_event() -> impl Strategy<Value = KeyEvent> {
    prop_oneof![
        4 => (0u8..=9).prop_map(KeyEvent::Digit),
        1 => Just(KeyEvent::Backspace),
    ]
}

fn entry() -> CardEntry<FixedClock> {
    CardEntry::with_clock(FixedClock::new(2026, 10).unwrap())
}

// =============================================================================
// LUHN ALGORITHM PROPERTIES
// =============================================================================

proptest! {
    /// Property: Appending the generated check digit always passes Luhn.
    #[test]
    fn check_digit_makes_number_valid(payload in digits(1..=18)) {
        let mut number = payload.clone();
        number.push(luhn::generate_check_digit(&payload));
        prop_assert!(luhn::validate(&number));
        prop_assert_eq!(luhn::compute_checksum(&number) % 10, 0);
    }

    /// Property: Luhn catches every single-digit substitution.
    #[test]
    fn single_digit_change_breaks_luhn(
        number in valid_number(CardBrand::Visa),
        position in 0usize..16,
        delta in 1u8..=9,
    ) {
        let mut mistyped = number.clone();
        mistyped[position] = (mistyped[position] + delta) % 10;
        prop_assert!(!luhn::validate(&mistyped));
    }

    /// Property: Values above 9 are never valid digits.
    #[test]
    fn out_of_range_values_fail(number in digits(2..=19), position in 0usize..19, value in 10u8..) {
        let mut number = number;
        let position = position % number.len();
        number[position] = value;
        prop_assert!(!luhn::validate(&number));
    }
}

// =============================================================================
// BRAND DETECTION PROPERTIES
// =============================================================================

proptest! {
    /// Property: Only the first two digits decide the brand.
    #[test]
    fn brand_depends_on_two_digit_prefix(number in digits(2..=19)) {
        prop_assert_eq!(guess_brand(&number), guess_brand(&number[..2]));
    }

    /// Property: Generated numbers detect as their brand and validate.
    #[test]
    fn valid_numbers_validate(
        (brand, number) in brand_strategy().prop_flat_map(|b| (Just(b), valid_number(b)))
    ) {
        prop_assert_eq!(guess_brand(&number), brand);
        prop_assert!(card_entry::validate(brand, &number));
    }
}

// =============================================================================
// FORMATTING PROPERTIES
// =============================================================================

proptest! {
    /// Property: Stripping the display string recovers the digits.
    #[test]
    fn format_then_strip_recovers_digits(brand in brand_strategy(), number in digits(0..=16)) {
        let number = &number[..number.len().min(brand.total_digits())];
        let formatted = format_number(number, brand, ' ');
        let raw: String = number.iter().map(|&d| char::from(b'0' + d)).collect();
        prop_assert_eq!(strip_formatting(&formatted), raw);
        prop_assert_eq!(
            formatted.len() - number.len(),
            brand.group_breaks().iter().filter(|&&b| b <= number.len()).count()
        );
    }

    /// Property: Masked output keeps the length and reveals at most 4 digits.
    #[test]
    fn mask_hides_all_but_last_four(number in digits(0..=19)) {
        let masked = mask::mask_digits(&number);
        prop_assert_eq!(masked.len(), number.len());
        prop_assert!(masked.chars().filter(|c| c.is_ascii_digit()).count() <= 4);
    }
}

// =============================================================================
// STATE MACHINE PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Property: Arbitrary key streams keep every entry invariant.
    #[test]
    fn key_streams_keep_invariants(keys in proptest::collection::vec(key_event(), 0..80)) {
        let clock = FixedClock::new(2026, 10).unwrap();
        let mut entry = CardEntry::with_clock(clock);

        for key in keys {
            let outcome = entry.apply(key);
            prop_assert!(outcome.is_ok());

            let number = entry.number_digits();
            let brand = entry.brand();

            if number.len() < 2 {
                prop_assert_eq!(brand, CardBrand::Unknown);
            } else {
                prop_assert_eq!(brand, guess_brand(number));
            }
            prop_assert!(number.len() <= brand.total_digits());
            prop_assert_eq!(strip_formatting(entry.formatted_number()), entry.number());

            if entry.is_error() {
                prop_assert_eq!(entry.phase(), EntryPhase::Number);
                prop_assert!(brand.is_fully_typed(number.len()));
            }
            if entry.phase() > EntryPhase::Number {
                prop_assert!(!entry.is_error());
                prop_assert!(brand.is_fully_typed(number.len()));
                prop_assert!(card_entry::validate(brand, number));
            }

            let month = entry.expiry_month();
            prop_assert!(month == 0 || (1..=12).contains(&month));
            if let Some(expiry) = entry.expiry() {
                prop_assert!(!expiry.is_expired(&clock));
            }

            prop_assert!(entry.cvc().len() <= brand.cvc_digits());
            prop_assert_eq!(
                entry.is_completed(),
                entry.phase() == EntryPhase::Cvc && entry.cvc().len() == brand.cvc_digits()
            );
        }
    }

    /// Property: The listener fires exactly on changes of the completed flag.
    #[test]
    fn listener_fires_only_on_transitions(keys in proptest::collection::vec(key_event(), 0..80)) {
        let mut entry = entry();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        entry.set_completion_listener(Some(Box::new(move |completed| {
            sink.lock().unwrap().push(completed);
        })));

        let mut expected = Vec::new();
        let mut last = false;
        for key in keys {
            entry.apply(key).unwrap();
            if entry.is_completed() != last {
                last = entry.is_completed();
                expected.push(last);
            }
        }

        prop_assert_eq!(&*calls.lock().unwrap(), &expected);
    }

    /// Property: A valid number, a future expiry and a full CVC complete the entry.
    #[test]
    fn typed_valid_card_completes(
        (brand, number) in brand_strategy().prop_flat_map(|b| (Just(b), valid_number(b))),
        month in 1u8..=12,
        year in 27u8..=99,
        cvc in digits(4..=4),
    ) {
        let mut entry = entry();
        let mut keys: Vec<KeyEvent> = number.iter().map(|&d| KeyEvent::Digit(d)).collect();
        keys.extend([month / 10, month % 10, year / 10, year % 10].map(KeyEvent::Digit));
        keys.extend(cvc[..brand.cvc_digits()].iter().map(|&d| KeyEvent::Digit(d)));

        let total = keys.len();
        prop_assert_eq!(keys.into_iter().apply_all(&mut entry), Ok(total));
        prop_assert!(entry.is_completed());
        prop_assert_eq!(entry.expiry_month(), month);
        prop_assert_eq!(entry.expiry_year(), year);
    }

    /// Property: Each accepted digit is undone by exactly one backspace.
    #[test]
    fn backspaces_undo_accepted_digits(keys in proptest::collection::vec((0u8..=9).prop_map(KeyEvent::Digit), 0..24)) {
        let mut entry = entry();
        let accepted = keys.into_iter().apply_all(&mut entry).unwrap();
        prop_assume!(!entry.is_error());

        for _ in 0..accepted {
            prop_assert_eq!(entry.on_backspace(), KeyOutcome::Accepted);
        }
        prop_assert_eq!(entry.on_backspace(), KeyOutcome::Ignored);
        prop_assert_eq!(entry.phase(), EntryPhase::Number);
        prop_assert_eq!(entry.formatted_number(), "");
    }

    /// Property: Reset with any seed of digits behaves like typing it.
    #[test]
    fn seed_matches_typing(seed in digits(0..=15)) {
        let text: String = seed.iter().map(|&d| char::from(b'0' + d)).collect();

        let mut seeded = entry();
        seeded.reset(Some(&text)).unwrap();

        let mut typed = entry();
        seed.iter().map(|&d| KeyEvent::Digit(d)).apply_all(&mut typed).unwrap();

        prop_assert_eq!(seeded.snapshot(), typed.snapshot());
    }
}
