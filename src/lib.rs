//! # card_entry
//!
//! Keystroke-driven credit card entry for Rust.
//!
//! A [`CardEntry`] takes digit and backspace key presses one at a time and
//! builds the card number, expiry month/year and CVC. It detects the brand
//! from the first two digits, checks the number (brand shape plus Luhn) as
//! soon as it is complete, refuses expiry digits that would make an
//! impossible or past date, and keeps display strings with separators ready
//! for a view to render. It has no rendering, timers or platform input code
//! of its own, so the same machine can back a terminal UI, a web form or a
//! native widget.
//!
//! ## Features
//!
//! - Brand detection from a two-digit prefix (Visa, Mastercard, Amex)
//! - Luhn validation of the complete number, with a sticky error flag
//! - Expiry guards: month 01-12, no past dates
//! - Per-brand grouping: `4111 1111 1111 1111`, `3782 822463 10005`
//! - Edge-triggered completion listener
//! - Digit buffers wiped on deletion, reset and drop
//!
//! ## Quick Start
//!
//! ```rust
//! use card_entry::{CardEntry, EntryPhase, FixedClock};
//!
//! let mut entry = CardEntry::with_clock(FixedClock::new(2026, 10).unwrap());
//!
//! for digit in [3, 7, 8, 2, 8, 2, 2, 4, 6, 3, 1, 0, 0, 0, 5] {
//!     entry.on_digit(digit).unwrap();
//! }
//! assert_eq!(entry.formatted_number(), "3782 822463 10005");
//! assert_eq!(entry.phase(), EntryPhase::ExpiryMonth);
//! assert_eq!(entry.cvc_hint(), "4DBC");
//! ```
//!
//! ## Invalid Numbers
//!
//! ```rust
//! use card_entry::{CardEntry, FixedClock, KeyOutcome};
//!
//! let mut entry = CardEntry::with_clock(FixedClock::new(2026, 10).unwrap());
//! entry.reset(Some("4111111111111112")).unwrap();
//! assert!(entry.is_error());
//!
//! // Digits are refused until the mistake is deleted
//! assert_eq!(entry.on_digit(1).unwrap(), KeyOutcome::Ignored);
//! entry.on_backspace();
//! assert!(!entry.is_error());
//! ```
//!
//! ## Completion Listener
//!
//! ```rust
//! use card_entry::{CardEntry, FixedClock};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let pay_enabled = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&pay_enabled);
//!
//! let mut entry = CardEntry::with_clock(FixedClock::new(2026, 10).unwrap());
//! entry.set_completion_listener(Some(Box::new(move |completed| {
//!     flag.store(completed, Ordering::SeqCst);
//! })));
//!
//! entry.reset(Some("5500000000000004")).unwrap();
//! for digit in [0, 8, 2, 9, 7, 3, 1] {
//!     entry.on_digit(digit).unwrap();
//! }
//! assert!(pay_enabled.load(Ordering::SeqCst));
//! ```
//!
//! ## Registry Functions
//!
//! ```rust
//! use card_entry::{detect, validate, CardBrand};
//!
//! assert_eq!(detect::guess_brand(&[5, 1]), CardBrand::Mastercard);
//! assert!(CardBrand::Mastercard.is_fully_typed(16));
//! assert!(CardBrand::Mastercard.has_separator_after(8));
//! assert!(validate(CardBrand::Mastercard, &[5, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 4]));
//! ```
//!
//! ## Supported Card Brands
//!
//! | Brand | Prefix | Length | Groups | CVC |
//! |-------|--------|--------|--------|-----|
//! | Visa | 4 | 16 | 4-4-4-4 | 3 |
//! | Mastercard | 51-55 | 16 | 4-4-4-4 | 3 |
//! | American Express | 34, 37 | 15 | 4-6-5 | 4 |
//! | Unknown | any other | 16 | none | 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` for brands, phases, expiry dates and snapshots |
//! | `cli` | `cardentry` terminal harness |
//!
//! ## Security
//!
//! - Raw digits stored in fixed-size arrays, not heap strings
//! - Automatic memory zeroization on deletion, reset and drop
//! - `Debug` shows masked numbers only; log lines never carry a full number
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod config;
pub mod detect;
pub mod digits;
pub mod entry;
pub mod error;
pub mod expiry;
pub mod format;
pub mod luhn;
pub mod mask;
pub mod stream;
pub mod validate;

// Re-export main types at crate root
pub use card::{BrandLayout, CardBrand, EXPIRY_HINT, MAX_CARD_DIGITS, MAX_CVC_DIGITS, NUMBER_HINT};
pub use config::EntryConfig;
pub use detect::guess_brand;
pub use entry::{CardEntry, CompletionListener, EntryPhase, EntrySnapshot, KeyOutcome};
pub use error::{EntryError, ValidationError};
pub use expiry::{Clock, ExpiryDate, FixedClock, SystemClock};
pub use stream::{KeyEvent, ReplayExt};
pub use validate::{check_number, validate};
