//! Luhn algorithm implementation for credit card validation.
//!
//! The Luhn algorithm (also known as the "modulus 10" algorithm) is a checksum
//! formula used to validate credit card numbers and other identification numbers.
//!
//! Digits are processed right to left. The check digit (last) is taken as is,
//! the digit before it is doubled, the next one is not, and so on. A doubled
//! value above 9 has 9 subtracted (the same as adding its two digits, since the
//! largest doubled value is 18). The number is valid when the total is a
//! multiple of 10.

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a digit sequence using the Luhn algorithm.
///
/// Returns `false` for an empty slice or for any value above 9.
///
/// # Example
///
/// ```
/// use card_entry::luhn::validate;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(&digits));
///
/// let invalid = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2];
/// assert!(!validate(&invalid));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() || digits.iter().any(|&d| d > 9) {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10) of a digit sequence.
///
/// The caller guarantees every value is 0-9.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    weighted_sum(digits, false)
}

/// Generates the check digit that completes `digits` into a valid number.
///
/// # Example
///
/// ```
/// use card_entry::luhn::generate_check_digit;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every digit moves one place left once the check digit is appended,
    // so the rightmost one given here is the first to be doubled.
    let sum = weighted_sum(digits, true);
    ((10 - (sum % 10)) % 10) as u8
}

fn weighted_sum(digits: &[u8], double_first: bool) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            let doubled = (i % 2 == 1) != double_first;
            if doubled {
                u32::from(DOUBLE_TABLE[usize::from(digit)])
            } else {
                u32::from(digit)
            }
        })
        .sum()
}
