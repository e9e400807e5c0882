//! Display formatting for the number and expiry fields.
//!
//! # Format Conventions
//!
//! - **Visa/Mastercard** (16 digits): `XXXX XXXX XXXX XXXX`
//! - **American Express** (15 digits): `XXXX XXXXXX XXXXX`
//! - **Unknown**: digits with no separator
//!
//! A separator is written right after the digit that completes a group, so a
//! partially typed number shows where the next group will start:
//!
//! ```
//! use card_entry::format::format_number;
//! use card_entry::CardBrand;
//!
//! assert_eq!(format_number(&[4, 1, 1, 1], CardBrand::Visa, ' '), "4111 ");
//! assert_eq!(format_number(&[4, 1, 1, 1, 1], CardBrand::Visa, ' '), "4111 1");
//! ```

use crate::CardBrand;

/// Renders number digits with a separator after each of the brand's group
/// breaks that has been reached.
///
/// # Example
///
/// ```
/// use card_entry::format::format_number;
/// use card_entry::CardBrand;
///
/// let amex = [3, 7, 8, 2, 8, 2, 2, 4, 6, 3, 1, 0, 0, 0, 5];
/// assert_eq!(format_number(&amex, CardBrand::Amex, ' '), "3782 822463 10005");
/// ```
pub fn format_number(digits: &[u8], brand: CardBrand, separator: char) -> String {
    let mut result = String::with_capacity(digits.len() + brand.group_breaks().len());
    write_number(&mut result, digits, brand, separator);
    result
}

/// Same as [`format_number`], writing into an existing buffer after clearing it.
pub fn write_number(out: &mut String, digits: &[u8], brand: CardBrand, separator: char) {
    out.clear();
    for (i, &digit) in digits.iter().enumerate() {
        out.push(digit_char(digit));
        if brand.has_separator_after(i + 1) {
            out.push(separator);
        }
    }
}

/// Renders the expiry field.
///
/// The separator follows the month once the month is complete.
///
/// # Example
///
/// ```
/// use card_entry::format::format_expiry;
///
/// assert_eq!(format_expiry(&[0], &[], false, '/'), "0");
/// assert_eq!(format_expiry(&[0, 9], &[], true, '/'), "09/");
/// assert_eq!(format_expiry(&[0, 9], &[3, 0], true, '/'), "09/30");
/// ```
pub fn format_expiry(month: &[u8], year: &[u8], month_complete: bool, separator: char) -> String {
    let mut result = String::with_capacity(month.len() + year.len() + 1);
    write_expiry(&mut result, month, year, month_complete, separator);
    result
}

/// Same as [`format_expiry`], writing into an existing buffer after clearing it.
pub fn write_expiry(
    out: &mut String,
    month: &[u8],
    year: &[u8],
    month_complete: bool,
    separator: char,
) {
    out.clear();
    out.extend(month.iter().map(|&d| digit_char(d)));
    if month_complete {
        out.push(separator);
        out.extend(year.iter().map(|&d| digit_char(d)));
    }
}

/// Strips all formatting, leaving only digits.
///
/// # Example
///
/// ```
/// use card_entry::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4111 1111 1111 1111"), "4111111111111111");
/// assert_eq!(strip_formatting("12/30"), "1230");
/// ```
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[inline]
fn digit_char(digit: u8) -> char {
    char::from(b'0' + digit)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VISA: [u8; 16] = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];

    #[test]
    fn test_format_visa() {
        assert_eq!(format_number(&VISA, CardBrand::Visa, ' '), "4111 1111 1111 1111");
        assert_eq!(format_number(&VISA[..8], CardBrand::Visa, ' '), "4111 1111 ");
        assert_eq!(format_number(&VISA[..9], CardBrand::Visa, ' '), "4111 1111 1");
    }

    #[test]
    fn test_format_amex() {
        let amex = [3, 7, 8, 2, 8, 2, 2, 4, 6, 3];
        assert_eq!(format_number(&amex, CardBrand::Amex, ' '), "3782 822463 ");
        assert_eq!(format_number(&amex[..5], CardBrand::Amex, ' '), "3782 8");
    }

    #[test]
    fn test_format_unknown_has_no_separators() {
        assert_eq!(format_number(&VISA, CardBrand::Unknown, ' '), "4111111111111111");
    }

    #[test]
    fn test_custom_separator() {
        assert_eq!(format_number(&VISA, CardBrand::Visa, '-'), "4111-1111-1111-1111");
    }

    #[test]
    fn test_empty() {
        assert_eq!(format_number(&[], CardBrand::Visa, ' '), "");
        assert_eq!(format_expiry(&[], &[], false, '/'), "");
    }

    #[test]
    fn test_strip_roundtrip() {
        for len in 0..=VISA.len() {
            let formatted = format_number(&VISA[..len], CardBrand::Visa, ' ');
            let expected: String = VISA[..len].iter().map(|&d| digit_char(d)).collect();
            assert_eq!(strip_formatting(&formatted), expected);
        }
    }

    #[test]
    fn test_write_reuses_buffer() {
        let mut out = String::from("stale");
        write_number(&mut out, &[5, 5], CardBrand::Mastercard, ' ');
        assert_eq!(out, "55");
        write_expiry(&mut out, &[1, 2], &[2], true, '/');
        assert_eq!(out, "12/2");
    }
}
