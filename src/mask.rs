//! PCI-DSS compliant masking for partially typed numbers.
//!
//! Used wherever entry state may end up in a log line or a `Debug` dump.
//!
//! # PCI-DSS Compliance
//!
//! PCI-DSS allows displaying:
//! - First 6 digits (BIN) and last 4 digits
//! - Only the last 4 digits (preferred for customer-facing display)
//!
//! Never display or log the full card number.

/// Masks a digit sequence showing only the last 4 digits.
///
/// Sequences of 4 digits or fewer are masked completely, since they may be a
/// large share of a number still being typed.
///
/// # Example
///
/// ```
/// use card_entry::mask::mask_digits;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(mask_digits(&digits), "************1111");
/// assert_eq!(mask_digits(&[4, 1]), "**");
/// ```
#[inline]
pub fn mask_digits(digits: &[u8]) -> String {
    let len = digits.len();
    if len <= 4 {
        return "*".repeat(len);
    }

    let mut result = String::with_capacity(len);
    result.extend(std::iter::repeat('*').take(len - 4));
    result.extend(digits[len - 4..].iter().map(|&d| char::from(b'0' + d)));
    result
}

/// Masks a digit sequence showing the BIN (first 6) and last 4 digits.
///
/// Sequences too short to hide anything between the two are fully masked.
///
/// # Example
///
/// ```
/// use card_entry::mask::mask_with_bin;
///
/// let digits = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(mask_with_bin(&digits), "411111******1111");
/// ```
#[inline]
pub fn mask_with_bin(digits: &[u8]) -> String {
    let len = digits.len();
    if len <= 10 {
        return "*".repeat(len);
    }

    let mut result = String::with_capacity(len);
    result.extend(digits[..6].iter().map(|&d| char::from(b'0' + d)));
    result.extend(std::iter::repeat('*').take(len - 10));
    result.extend(digits[len - 4..].iter().map(|&d| char::from(b'0' + d)));
    result
}
