//! Card brand detection from a number prefix.
//!
//! Detection needs the first two digits; that is enough to tell the supported
//! brands apart (Visa `4x`, Mastercard `51`-`55`, Amex `34`/`37`). Brands are
//! tried in [`CardBrand::PRIORITY`] order and the first match wins.
//!
//! # Performance
//!
//! Matching is done with slice patterns - no regex, no allocation.

use crate::CardBrand;

/// Guesses the brand from the leading digits of a number.
///
/// Returns [`CardBrand::Unknown`] when fewer than two digits are given or
/// when no brand claims the prefix. Digits past the second are ignored, so
/// the guess does not change as more digits arrive.
///
/// # Example
///
/// ```
/// use card_entry::detect::guess_brand;
/// use card_entry::CardBrand;
///
/// assert_eq!(guess_brand(&[4, 1]), CardBrand::Visa);
/// assert_eq!(guess_brand(&[5, 5]), CardBrand::Mastercard);
/// assert_eq!(guess_brand(&[3, 7]), CardBrand::Amex);
/// assert_eq!(guess_brand(&[6, 0]), CardBrand::Unknown);
/// ```
#[inline]
pub fn guess_brand(prefix: &[u8]) -> CardBrand {
    CardBrand::PRIORITY
        .into_iter()
        .find(|brand| matches_prefix(*brand, prefix))
        .unwrap_or(CardBrand::Unknown)
}

/// Returns true if the first two digits of `prefix` belong to `brand`.
///
/// `Unknown` claims every prefix; it is only reached as the fallback.
#[inline]
pub fn matches_prefix(brand: CardBrand, prefix: &[u8]) -> bool {
    match brand {
        CardBrand::Visa => matches!(prefix, [4, 0..=9, ..]),
        CardBrand::Mastercard => matches!(prefix, [5, 1..=5, ..]),
        CardBrand::Amex => matches!(prefix, [3, 4 | 7, ..]),
        CardBrand::Unknown => true,
    }
}

/// Returns true if `digits` has the overall shape of a `brand` number.
///
/// This checks the prefix and a minimum length only; the exact length is the
/// caller's concern (see [`CardBrand::is_fully_typed`]) and the checksum is
/// handled by [`crate::luhn`].
#[inline]
pub fn matches_full_pattern(brand: CardBrand, digits: &[u8]) -> bool {
    if digits.iter().any(|&d| d > 9) {
        return false;
    }

    match (brand, digits) {
        // 4 followed by at least six digits
        (CardBrand::Visa, [4, rest @ ..]) => rest.len() >= 6,
        // 51-55 followed by at least five digits
        (CardBrand::Mastercard, [5, 1..=5, rest @ ..]) => rest.len() >= 5,
        // 34 or 37 followed by at least five digits
        (CardBrand::Amex, [3, 4 | 7, rest @ ..]) => rest.len() >= 5,
        (CardBrand::Unknown, _) => true,
        _ => false,
    }
}
