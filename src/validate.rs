//! Full-number validation for a known brand.
//!
//! A number is accepted when it has the brand's shape and passes the Luhn
//! checksum. The state machine calls this exactly once, when the last digit of
//! a number is typed (or once at the end of a seeded reset).

use crate::card::CardBrand;
use crate::detect::matches_full_pattern;
use crate::error::ValidationError;
use crate::luhn;

/// Validates a complete card number for `brand`.
///
/// Pure and side-effect free: equal digit sequences always give equal
/// answers, whatever buffer they come from.
///
/// # Example
///
/// ```
/// use card_entry::{validate, CardBrand};
///
/// let visa = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert!(validate(CardBrand::Visa, &visa));
///
/// // Right checksum, wrong brand shape
/// assert!(!validate(CardBrand::Amex, &visa));
/// ```
#[inline]
pub fn validate(brand: CardBrand, digits: &[u8]) -> bool {
    check_number(brand, digits).is_ok()
}

/// Validates a complete card number and explains any failure.
///
/// The shape is checked first; the checksum only runs on a number that has
/// the right shape.
pub fn check_number(brand: CardBrand, digits: &[u8]) -> Result<(), ValidationError> {
    if !matches_full_pattern(brand, digits) {
        return Err(ValidationError::PatternMismatch {
            brand,
            length: digits.len(),
        });
    }

    if !luhn::validate(digits) {
        return Err(ValidationError::InvalidChecksum);
    }

    Ok(())
}
