//! Fixed-capacity digit storage.
//!
//! Raw card data is kept in stack arrays rather than heap strings, and every
//! slot is wiped when it is cleared, popped or dropped.

use std::fmt;
use zeroize::Zeroize;

/// A stack of at most `N` decimal digits (values 0-9).
#[derive(Clone, PartialEq, Eq)]
pub struct DigitBuffer<const N: usize> {
    digits: [u8; N],
    len: u8,
}

impl<const N: usize> DigitBuffer<N> {
    /// Creates an empty buffer.
    #[inline]
    pub const fn new() -> Self {
        Self {
            digits: [0; N],
            len: 0,
        }
    }

    /// Number of digits held.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Returns true if no digit is held.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if `N` digits are held.
    #[inline]
    pub const fn is_full(&self) -> bool {
        self.len() == N
    }

    /// Appends a digit. Returns false if the buffer is full or the value is
    /// not a digit.
    #[inline]
    pub fn push(&mut self, digit: u8) -> bool {
        if digit > 9 || self.is_full() {
            return false;
        }
        self.digits[self.len()] = digit;
        self.len += 1;
        true
    }

    /// Removes and returns the last digit.
    #[inline]
    pub fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        self.len -= 1;
        let idx = self.len();
        let digit = self.digits[idx];
        self.digits[idx].zeroize();
        Some(digit)
    }

    /// Wipes every digit.
    #[inline]
    pub fn clear(&mut self) {
        self.digits.zeroize();
        self.len = 0;
    }

    /// Returns the held digits.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.digits[..self.len()]
    }

    /// Interprets the digits as a decimal number. An empty buffer gives 0.
    #[inline]
    pub fn value(&self) -> u32 {
        self.as_slice()
            .iter()
            .fold(0u32, |acc, &d| acc * 10 + u32::from(d))
    }

    /// Renders the digits as an ASCII string.
    ///
    /// # Security Warning
    ///
    /// The returned string is not wiped on drop; never log it.
    pub fn to_digit_string(&self) -> String {
        self.as_slice().iter().map(|&d| char::from(b'0' + d)).collect()
    }
}

impl<const N: usize> Default for DigitBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for DigitBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Length only; contents may be card data
        f.debug_struct("DigitBuffer")
            .field("len", &self.len)
            .field("capacity", &N)
            .finish()
    }
}

impl<const N: usize> Drop for DigitBuffer<N> {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut buf = DigitBuffer::<3>::new();
        assert!(buf.is_empty());
        assert!(buf.push(1));
        assert!(buf.push(2));
        assert!(buf.push(3));
        assert!(buf.is_full());
        assert!(!buf.push(4));
        assert_eq!(buf.as_slice(), &[1, 2, 3]);

        assert_eq!(buf.pop(), Some(3));
        assert_eq!(buf.as_slice(), &[1, 2]);
        assert_eq!(buf.pop(), Some(2));
        assert_eq!(buf.pop(), Some(1));
        assert_eq!(buf.pop(), None);
    }

    #[test]
    fn test_rejects_non_digits() {
        let mut buf = DigitBuffer::<4>::new();
        assert!(!buf.push(10));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_value_and_string() {
        let mut buf = DigitBuffer::<2>::new();
        assert_eq!(buf.value(), 0);
        buf.push(0);
        buf.push(7);
        assert_eq!(buf.value(), 7);
        assert_eq!(buf.to_digit_string(), "07");
    }

    #[test]
    fn test_clear_wipes_storage() {
        let mut buf = DigitBuffer::<4>::new();
        for d in [9, 9, 9, 9] {
            buf.push(d);
        }
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.digits, [0; 4]);
    }

    #[test]
    fn test_pop_wipes_slot() {
        let mut buf = DigitBuffer::<2>::new();
        buf.push(5);
        buf.pop();
        assert_eq!(buf.digits, [0, 0]);
    }

    #[test]
    fn test_debug_hides_digits() {
        let mut buf = DigitBuffer::<4>::new();
        for d in [4, 2, 4, 2] {
            buf.push(d);
        }
        let debug = format!("{:?}", buf);
        assert!(!debug.contains("4242"));
        assert!(debug.contains("len"));
    }
}
