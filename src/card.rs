//! Card brands and their entry layout.
//!
//! The set of brands is closed and small, so each brand maps to a static
//! [`BrandLayout`] record instead of carrying behaviour of its own. The
//! layout tells the entry state machine how long a number is, where the
//! display separators go and how many CVC digits to collect.

use std::fmt;

/// Maximum number of digits any brand can hold.
pub const MAX_CARD_DIGITS: usize = 19;

/// Maximum number of CVC digits any brand can hold.
pub const MAX_CVC_DIGITS: usize = 4;

/// Hint shown in an empty number field.
pub const NUMBER_HINT: &str = "1234 5678 9012 3456";

/// Hint shown in an empty expiry field.
pub const EXPIRY_HINT: &str = "MM/YY";

/// Supported card brands.
///
/// `Unknown` is the fallback until two digits are typed, and stays in place
/// when the prefix matches no known brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CardBrand {
    /// Visa - Prefix 4, length 16
    Visa,
    /// Mastercard - Prefix 51-55, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15, 4-digit CVC
    Amex,
    /// No brand detected yet
    #[default]
    Unknown,
}

/// Immutable layout metadata for one brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrandLayout {
    /// Human-readable brand name.
    pub name: &'static str,
    /// Fixed number length.
    pub total_digits: usize,
    /// Digit counts after which a display separator follows.
    /// Strictly increasing, all below `total_digits`.
    pub group_breaks: &'static [usize],
    /// Number of CVC digits.
    pub cvc_digits: usize,
    /// Hint shown in an empty CVC field; its length equals `cvc_digits`.
    pub cvc_hint: &'static str,
}

const VISA: BrandLayout = BrandLayout {
    name: "Visa",
    total_digits: 16,
    group_breaks: &[4, 8, 12],
    cvc_digits: 3,
    cvc_hint: "CVC",
};

const MASTERCARD: BrandLayout = BrandLayout {
    name: "Mastercard",
    total_digits: 16,
    group_breaks: &[4, 8, 12],
    cvc_digits: 3,
    cvc_hint: "CVC",
};

const AMEX: BrandLayout = BrandLayout {
    name: "American Express",
    total_digits: 15,
    group_breaks: &[4, 10],
    cvc_digits: 4,
    cvc_hint: "4DBC",
};

const UNKNOWN: BrandLayout = BrandLayout {
    name: "Unknown",
    total_digits: 16,
    group_breaks: &[],
    cvc_digits: 3,
    cvc_hint: "CVC",
};

impl CardBrand {
    /// Brands in the order prefixes are tried. `Unknown` is the fallback and
    /// is not part of the list.
    pub const PRIORITY: [CardBrand; 3] = [Self::Visa, Self::Mastercard, Self::Amex];

    /// Returns the layout record for this brand.
    #[inline]
    pub const fn layout(&self) -> &'static BrandLayout {
        match self {
            Self::Visa => &VISA,
            Self::Mastercard => &MASTERCARD,
            Self::Amex => &AMEX,
            Self::Unknown => &UNKNOWN,
        }
    }

    /// Returns a human-readable name for the card brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.layout().name
    }

    /// Returns the fixed number length for this brand.
    #[inline]
    pub const fn total_digits(&self) -> usize {
        self.layout().total_digits
    }

    /// Returns the digit counts after which a separator is displayed.
    #[inline]
    pub const fn group_breaks(&self) -> &'static [usize] {
        self.layout().group_breaks
    }

    /// Returns the number of CVC digits for this brand.
    #[inline]
    pub const fn cvc_digits(&self) -> usize {
        self.layout().cvc_digits
    }

    /// Returns the hint shown in an empty CVC field.
    #[inline]
    pub const fn cvc_hint(&self) -> &'static str {
        self.layout().cvc_hint
    }

    /// Returns true if `digit_count` digits make a complete number.
    ///
    /// # Example
    ///
    /// ```
    /// use card_entry::CardBrand;
    ///
    /// assert!(CardBrand::Amex.is_fully_typed(15));
    /// assert!(!CardBrand::Visa.is_fully_typed(15));
    /// ```
    #[inline]
    pub const fn is_fully_typed(&self, digit_count: usize) -> bool {
        digit_count == self.total_digits()
    }

    /// Returns true if a separator follows the `digit_count`-th digit.
    ///
    /// # Example
    ///
    /// ```
    /// use card_entry::CardBrand;
    ///
    /// assert!(CardBrand::Amex.has_separator_after(10));
    /// assert!(!CardBrand::Visa.has_separator_after(10));
    /// assert!(!CardBrand::Unknown.has_separator_after(4));
    /// ```
    #[inline]
    pub const fn has_separator_after(&self, digit_count: usize) -> bool {
        let breaks = self.group_breaks();
        let mut i = 0;
        while i < breaks.len() {
            if breaks[i] == digit_count {
                return true;
            }
            i += 1;
        }
        false
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
