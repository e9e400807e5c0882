//! Entry configuration.
//!
//! ```
//! use card_entry::EntryConfig;
//!
//! let config = EntryConfig::default().with_number_separator('-').unwrap();
//! assert_eq!(config.number_separator(), '-');
//! assert_eq!(config.expiry_separator(), '/');
//!
//! // Digits would be mistaken for card digits
//! assert!(EntryConfig::default().with_number_separator('0').is_none());
//! ```

/// Display and date settings for a [`crate::CardEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryConfig {
    number_separator: char,
    expiry_separator: char,
    century: u16,
}

impl EntryConfig {
    /// Space between number groups, `/` between month and year, years in the 2000s.
    pub const fn new() -> Self {
        Self {
            number_separator: ' ',
            expiry_separator: '/',
            century: 2000,
        }
    }

    /// Sets the character written between number groups.
    ///
    /// Returns `None` if the separator is an ASCII digit.
    pub const fn with_number_separator(mut self, separator: char) -> Option<Self> {
        if separator.is_ascii_digit() {
            return None;
        }
        self.number_separator = separator;
        Some(self)
    }

    /// Sets the character written between expiry month and year.
    ///
    /// Returns `None` if the separator is an ASCII digit.
    pub const fn with_expiry_separator(mut self, separator: char) -> Option<Self> {
        if separator.is_ascii_digit() {
            return None;
        }
        self.expiry_separator = separator;
        Some(self)
    }

    /// Sets the base added to a two-digit year (2000 turns `30` into 2030).
    pub const fn with_century(mut self, century: u16) -> Self {
        self.century = century;
        self
    }

    /// Character written between number groups.
    #[inline]
    pub const fn number_separator(&self) -> char {
        self.number_separator
    }

    /// Character written between expiry month and year.
    #[inline]
    pub const fn expiry_separator(&self) -> char {
        self.expiry_separator
    }

    /// Base added to a two-digit year.
    #[inline]
    pub const fn century(&self) -> u16 {
        self.century
    }
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self::new()
    }
}
