//! Error types for card entry.
//!
//! Two families live here. [`ValidationError`] explains why a fully typed
//! number was refused; the state machine folds it into its sticky error flag.
//! [`EntryError`] reports caller misuse (a value that is not a digit, a bad
//! seed or key script) and is the only thing the entry API ever returns as `Err`.

use crate::CardBrand;
use std::fmt;

/// Reasons a fully typed card number fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The digits do not have the shape required by the brand.
    PatternMismatch {
        /// The brand the number was checked against.
        brand: CardBrand,
        /// Number of digits that were checked.
        length: usize,
    },

    /// The Luhn checksum validation failed.
    ///
    /// This usually indicates a typo in the card number.
    InvalidChecksum,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PatternMismatch { brand, length } => {
                write!(f, "{} digits do not form a valid {} number", length, brand)
            }
            Self::InvalidChecksum => {
                write!(f, "invalid checksum (Luhn check failed) - please verify the card number")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors caused by calling the entry API with input it cannot accept.
///
/// None of these change the entry state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// A key value outside 0-9 was passed to `on_digit`.
    NotADigit(u8),

    /// A seed number contained something other than a digit.
    InvalidSeedCharacter {
        /// The position in the seed string (0-indexed).
        position: usize,
        /// The offending character.
        character: char,
    },

    /// A key script contained a character that maps to no key.
    InvalidKey {
        /// The position in the script (0-indexed).
        position: usize,
        /// The offending character.
        character: char,
    },

    /// A seed number is longer than its brand allows.
    SeedTooLong {
        /// Number of digits in the seed.
        length: usize,
        /// Total digits allowed for the detected brand.
        maximum: usize,
    },
}

impl fmt::Display for EntryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotADigit(value) => write!(f, "key value {} is not a digit (0-9)", value),

            Self::InvalidSeedCharacter {
                position,
                character,
            } => {
                write!(
                    f,
                    "invalid character '{}' at position {} in seed number (only digits allowed)",
                    character.escape_default(),
                    position
                )
            }

            Self::InvalidKey {
                position,
                character,
            } => {
                write!(
                    f,
                    "invalid key '{}' at position {} (only digits and '<' allowed)",
                    character.escape_default(),
                    position
                )
            }

            Self::SeedTooLong { length, maximum } => {
                write!(
                    f,
                    "seed number too long: got {} digits, maximum is {}",
                    length, maximum
                )
            }
        }
    }
}

impl std::error::Error for EntryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::InvalidChecksum.to_string(),
            "invalid checksum (Luhn check failed) - please verify the card number"
        );

        assert_eq!(
            ValidationError::PatternMismatch {
                brand: CardBrand::Amex,
                length: 15
            }
            .to_string(),
            "15 digits do not form a valid American Express number"
        );
    }

    #[test]
    fn test_entry_error_display() {
        assert_eq!(
            EntryError::NotADigit(12).to_string(),
            "key value 12 is not a digit (0-9)"
        );

        assert_eq!(
            EntryError::InvalidSeedCharacter {
                position: 3,
                character: 'x'
            }
            .to_string(),
            "invalid character 'x' at position 3 in seed number (only digits allowed)"
        );

        assert_eq!(
            EntryError::InvalidKey {
                position: 0,
                character: '?'
            }
            .to_string(),
            "invalid key '?' at position 0 (only digits and '<' allowed)"
        );

        assert_eq!(
            EntryError::SeedTooLong {
                length: 17,
                maximum: 16
            }
            .to_string(),
            "seed number too long: got 17 digits, maximum is 16"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationError>();
        assert_send_sync::<EntryError>();
    }
}
