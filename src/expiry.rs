//! Expiry date handling for keystroke entry.
//!
//! Expiry digits are never flagged as errors. A digit that cannot lead to a
//! valid, non-expired `MM/YY` is simply refused, so the field can only ever
//! hold a plausible date. The guards in this module decide which digits are
//! refused:
//!
//! - month: first digit `0` or `1`; after `1` only `0`-`2`; after `0` not `0`
//! - year: first digit not `0`; the second digit is refused if the resulting
//!   month/year lies before the current calendar month
//!
//! The current date comes from a [`Clock`] so tests can pin it.

use chrono::Datelike;
use std::fmt;

/// Source of the current calendar year and month.
pub trait Clock {
    /// Returns `(four-digit year, month 1-12)`.
    fn year_month(&self) -> (u16, u8);
}

/// Reads the local calendar date from the system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn year_month(&self) -> (u16, u8) {
        let today = chrono::Local::now().date_naive();
        let year = u16::try_from(today.year()).unwrap_or(u16::MAX);
        // month() is 1-12
        (year, today.month() as u8)
    }
}

/// A clock pinned to one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    year: u16,
    month: u8,
}

impl FixedClock {
    /// Creates a clock that always reports `year`/`month`.
    ///
    /// Returns `None` if the month is invalid (not 1-12).
    pub fn new(year: u16, month: u8) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }
}

impl Clock for FixedClock {
    fn year_month(&self) -> (u16, u8) {
        (self.year, self.month)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn year_month(&self) -> (u16, u8) {
        (**self).year_month()
    }
}

/// A completed expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExpiryDate {
    /// Month (1-12)
    month: u8,
    /// Four-digit year (e.g., 2030)
    year: u16,
}

impl ExpiryDate {
    /// Creates a new expiry date.
    ///
    /// Returns `None` if the month is invalid (not 1-12).
    pub fn new(month: u8, year: u16) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { month, year })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns true if the card expired before the clock's current month.
    ///
    /// A card is usable through the end of its expiry month.
    pub fn is_expired(&self, clock: &impl Clock) -> bool {
        let (year, month) = clock.year_month();
        is_before(self.year, self.month, year, month)
    }

    /// Formats as MM/YYYY.
    pub fn format_long(&self) -> String {
        format!("{:02}/{:04}", self.month, self.year)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year % 100)
    }
}

/// Returns true if `digit` may follow the month digits typed so far.
///
/// # Example
///
/// ```
/// use card_entry::expiry::accepts_month_digit;
///
/// assert!(accepts_month_digit(&[], 1));
/// assert!(!accepts_month_digit(&[], 2));
/// assert!(accepts_month_digit(&[1], 2));
/// assert!(!accepts_month_digit(&[1], 3));
/// assert!(!accepts_month_digit(&[0], 0));
/// ```
#[inline]
pub fn accepts_month_digit(month: &[u8], digit: u8) -> bool {
    match month {
        [] => matches!(digit, 0 | 1),
        [0] => matches!(digit, 1..=9),
        [1] => matches!(digit, 0..=2),
        _ => false,
    }
}

/// Returns true if `digit` may start a two-digit year.
#[inline]
pub fn accepts_year_first_digit(digit: u8) -> bool {
    matches!(digit, 1..=9)
}

/// Returns true if `year`/`month` lies before `now_year`/`now_month`.
#[inline]
pub fn is_before(year: u16, month: u8, now_year: u16, now_month: u8) -> bool {
    year < now_year || (year == now_year && month < now_month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_guard_allows_exactly_1_to_12() {
        let mut accepted = Vec::new();
        for first in 0..=9u8 {
            if !accepts_month_digit(&[], first) {
                continue;
            }
            for second in 0..=9u8 {
                if accepts_month_digit(&[first], second) {
                    accepted.push(first * 10 + second);
                }
            }
        }
        assert_eq!(accepted, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn test_month_guard_refuses_third_digit() {
        assert!(!accepts_month_digit(&[1, 2], 0));
    }

    #[test]
    fn test_year_first_digit() {
        assert!(!accepts_year_first_digit(0));
        assert!((1..=9).all(accepts_year_first_digit));
    }

    #[test]
    fn test_is_before() {
        assert!(is_before(2025, 12, 2026, 1));
        assert!(is_before(2026, 9, 2026, 10));
        assert!(!is_before(2026, 10, 2026, 10));
        assert!(!is_before(2026, 11, 2026, 10));
        assert!(!is_before(2027, 1, 2026, 10));
    }

    #[test]
    fn test_is_expired_with_fixed_clock() {
        let clock = FixedClock::new(2026, 10).unwrap();
        assert!(ExpiryDate::new(9, 2026).unwrap().is_expired(&clock));
        assert!(!ExpiryDate::new(10, 2026).unwrap().is_expired(&clock));
        assert!(!ExpiryDate::new(1, 2030).unwrap().is_expired(&clock));
    }

    #[test]
    fn test_system_clock_is_plausible() {
        let (year, month) = SystemClock.year_month();
        assert!(year >= 2024);
        assert!((1..=12).contains(&month));
    }

    #[test]
    fn test_format() {
        let expiry = ExpiryDate::new(3, 2030).unwrap();
        assert_eq!(expiry.to_string(), "03/30");
        assert_eq!(expiry.format_long(), "03/2030");
    }

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(ExpiryDate::new(0, 2030).is_none());
        assert!(ExpiryDate::new(13, 2030).is_none());
        assert!(FixedClock::new(2030, 0).is_none());
    }
}
