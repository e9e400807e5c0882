//! Fuzz target for Luhn algorithm.
//!
//! Tests that luhn functions never panic and maintain invariants.

#![no_main]

use card_entry::luhn;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Raw bytes, including values above 9, must never panic
    let _ = luhn::validate(data);

    let digits: Vec<u8> = data.iter().map(|&b| b % 10).collect();
    if digits.is_empty() || digits.len() > 18 {
        return;
    }

    let check = luhn::generate_check_digit(&digits);
    assert!(check <= 9, "Check digit should be 0-9");

    // Adding check digit should make it valid
    let mut with_check = digits.clone();
    with_check.push(check);
    assert!(luhn::validate(&with_check), "Adding check digit should make valid");
});
