//! The keystroke-driven card entry state machine.
//!
//! A [`CardEntry`] collects four fields in order: number, expiry month,
//! expiry year and CVC. Each accepted keystroke updates the raw digits and
//! the display strings; the host view only renders what it reads back.
//!
//! Two kinds of bad input are handled differently:
//!
//! - a complete number that fails validation sets a sticky error flag. Further
//!   digits are ignored until a backspace clears it.
//! - an expiry digit that cannot lead to a valid, non-expired date is silently
//!   ignored. No flag is raised.
//!
//! # Example
//!
//! ```
//! use card_entry::{CardBrand, CardEntry, EntryPhase, FixedClock};
//!
//! let clock = FixedClock::new(2026, 10).unwrap();
//! let mut entry = CardEntry::with_clock(clock);
//!
//! for digit in [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1] {
//!     entry.on_digit(digit).unwrap();
//! }
//! assert_eq!(entry.brand(), CardBrand::Visa);
//! assert_eq!(entry.formatted_number(), "4111 1111 1111 1111");
//! assert_eq!(entry.phase(), EntryPhase::ExpiryMonth);
//!
//! for digit in [1, 2, 3, 0, 1, 2, 3] {
//!     entry.on_digit(digit).unwrap();
//! }
//! assert_eq!(entry.formatted_expiry(), "12/30");
//! assert!(entry.is_completed());
//! ```
//!
//! # Concurrency
//!
//! All operations are synchronous and mutate in place. One caller drives the
//! machine; share it across threads only behind a mutex. The completion
//! listener runs inside the triggering call and must not call back into the
//! machine.

use std::fmt;
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::card::{CardBrand, MAX_CARD_DIGITS, MAX_CVC_DIGITS};
use crate::config::EntryConfig;
use crate::detect::guess_brand;
use crate::digits::DigitBuffer;
use crate::error::EntryError;
use crate::expiry::{
    accepts_month_digit, accepts_year_first_digit, is_before, Clock, ExpiryDate, SystemClock,
};
use crate::format::{strip_formatting, write_expiry, write_number};
use crate::mask::mask_digits;
use crate::stream::KeyEvent;
use crate::validate::check_number;

/// Callback told about every change of the completed flag.
///
/// The `Send` bound keeps [`CardEntry`] movable into a `Mutex` shared across
/// threads. Single-threaded hosts can share state with it through
/// `Arc<Mutex<_>>` or atomics instead of `Rc<RefCell<_>>`.
pub type CompletionListener = Box<dyn FnMut(bool) + Send>;

/// The field currently being typed.
///
/// Phases are ordered; a field is finished once the current phase is past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EntryPhase {
    /// Card number
    #[default]
    Number,
    /// First half of the expiry date
    ExpiryMonth,
    /// Second half of the expiry date
    ExpiryYear,
    /// Card verification code
    Cvc,
}

/// What a keystroke did to the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The state changed.
    Accepted,
    /// The keystroke was refused and nothing changed.
    Ignored,
}

impl KeyOutcome {
    /// Returns true for [`KeyOutcome::Accepted`].
    #[inline]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Incremental card number, expiry and CVC entry.
///
/// # Security
///
/// Raw digits live in fixed-size buffers that are wiped on deletion, reset
/// and drop. `Debug` output masks the number and hides the CVC.
pub struct CardEntry<C: Clock = SystemClock> {
    config: EntryConfig,
    clock: C,
    phase: EntryPhase,
    brand: CardBrand,
    number: DigitBuffer<MAX_CARD_DIGITS>,
    month: DigitBuffer<2>,
    year: DigitBuffer<2>,
    cvc: DigitBuffer<MAX_CVC_DIGITS>,
    formatted_number: String,
    formatted_expiry: String,
    cvc_display: String,
    error: bool,
    completed: bool,
    listener: Option<CompletionListener>,
}

impl CardEntry<SystemClock> {
    /// Creates an empty entry that reads the date from the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CardEntry<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CardEntry<C> {
    /// Creates an empty entry with the default configuration.
    pub fn with_clock(clock: C) -> Self {
        Self::with_config(EntryConfig::default(), clock)
    }

    /// Creates an empty entry.
    pub fn with_config(config: EntryConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            phase: EntryPhase::Number,
            brand: CardBrand::Unknown,
            number: DigitBuffer::new(),
            month: DigitBuffer::new(),
            year: DigitBuffer::new(),
            cvc: DigitBuffer::new(),
            formatted_number: String::with_capacity(MAX_CARD_DIGITS + 4),
            formatted_expiry: String::with_capacity(5),
            cvc_display: String::with_capacity(MAX_CVC_DIGITS),
            error: false,
            completed: false,
            listener: None,
        }
    }

    // =========================================================================
    // Event intake
    // =========================================================================

    /// Clears every field and optionally prefills the number.
    ///
    /// A seed is applied as if typed, except that validation runs once at the
    /// end rather than per digit. The seed is checked before anything is
    /// cleared, so an `Err` leaves the entry untouched.
    ///
    /// # Errors
    ///
    /// [`EntryError::InvalidSeedCharacter`] if the seed holds anything but
    /// ASCII digits, [`EntryError::SeedTooLong`] if it has more digits than
    /// its brand allows.
    pub fn reset(&mut self, seed: Option<&str>) -> Result<(), EntryError> {
        let seed = seed.map(parse_seed).transpose()?;

        self.clear_fields();
        if let Some(seed) = seed {
            for &digit in seed.as_slice() {
                self.number.push(digit);
                if self.number.len() == 2 {
                    self.set_brand(guess_brand(self.number.as_slice()));
                }
            }
            if self.brand.is_fully_typed(self.number.len()) {
                self.finish_number();
            }
        }

        debug!(phase = ?self.phase, brand = %self.brand, "entry reset");
        self.refresh_display();
        self.update_completed();
        Ok(())
    }

    /// Clears every field.
    pub fn clear(&mut self) {
        self.clear_fields();
        debug!("entry cleared");
        self.refresh_display();
        self.update_completed();
    }

    /// Feeds one digit key press.
    ///
    /// Returns [`KeyOutcome::Ignored`] when the digit is refused: the number
    /// is flagged as invalid, the expiry digit would make an impossible or
    /// past date, or the CVC is already full.
    ///
    /// # Errors
    ///
    /// [`EntryError::NotADigit`] if `digit` is above 9.
    pub fn on_digit(&mut self, digit: u8) -> Result<KeyOutcome, EntryError> {
        if digit > 9 {
            return Err(EntryError::NotADigit(digit));
        }

        if self.error {
            trace!("digit ignored until the flagged number is corrected");
            return Ok(KeyOutcome::Ignored);
        }

        let accepted = match self.phase {
            EntryPhase::Number => self.push_number_digit(digit),
            EntryPhase::ExpiryMonth => self.push_month_digit(digit),
            EntryPhase::ExpiryYear => self.push_year_digit(digit),
            EntryPhase::Cvc => self.push_cvc_digit(digit),
        };

        if !accepted {
            trace!(phase = ?self.phase, "digit refused");
            return Ok(KeyOutcome::Ignored);
        }

        self.refresh_display();
        self.update_completed();
        Ok(KeyOutcome::Accepted)
    }

    /// Feeds one backspace key press.
    ///
    /// Clears the error flag, then deletes the last digit of the current
    /// field. When the field is already empty the entry steps back one phase
    /// and deletes the last digit of that field in the same call.
    pub fn on_backspace(&mut self) -> KeyOutcome {
        let cleared_error = std::mem::take(&mut self.error);
        let start = self.phase;

        let removed = match self.phase {
            EntryPhase::Cvc if self.cvc.is_empty() => {
                self.phase = EntryPhase::ExpiryYear;
                self.year.pop().is_some()
            }
            EntryPhase::Cvc => self.cvc.pop().is_some(),
            EntryPhase::ExpiryYear if self.year.is_empty() => {
                self.phase = EntryPhase::ExpiryMonth;
                self.month.pop().is_some()
            }
            EntryPhase::ExpiryYear => self.year.pop().is_some(),
            EntryPhase::ExpiryMonth if self.month.is_empty() => {
                self.phase = EntryPhase::Number;
                self.pop_number_digit()
            }
            EntryPhase::ExpiryMonth => self.month.pop().is_some(),
            EntryPhase::Number => self.pop_number_digit(),
        };

        if self.phase != start {
            debug!(from = ?start, to = ?self.phase, "stepped back a phase");
        }

        self.refresh_display();
        self.update_completed();

        if removed || cleared_error || self.phase != start {
            KeyOutcome::Accepted
        } else {
            KeyOutcome::Ignored
        }
    }

    /// Feeds one key event.
    ///
    /// # Errors
    ///
    /// Same as [`CardEntry::on_digit`].
    pub fn apply(&mut self, event: KeyEvent) -> Result<KeyOutcome, EntryError> {
        match event {
            KeyEvent::Digit(digit) => self.on_digit(digit),
            KeyEvent::Backspace => Ok(self.on_backspace()),
        }
    }

    /// Replaces the completion listener, returning the previous one.
    ///
    /// The listener is called with the new value every time the completed
    /// flag flips, and only then.
    pub fn set_completion_listener(
        &mut self,
        listener: Option<CompletionListener>,
    ) -> Option<CompletionListener> {
        std::mem::replace(&mut self.listener, listener)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The field currently being typed.
    #[inline]
    pub fn phase(&self) -> EntryPhase {
        self.phase
    }

    /// The detected brand (`Unknown` until two digits are typed).
    #[inline]
    pub fn brand(&self) -> CardBrand {
        self.brand
    }

    /// True while a complete number is flagged as invalid.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// True once every field is filled and the CVC has its full length.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The number with group separators, e.g. `"4111 1111 1111 1111"`.
    #[inline]
    pub fn formatted_number(&self) -> &str {
        &self.formatted_number
    }

    /// The expiry as typed so far, e.g. `"1"`, `"12/"`, `"12/30"`.
    #[inline]
    pub fn formatted_expiry(&self) -> &str {
        &self.formatted_expiry
    }

    /// The CVC digits typed so far.
    #[inline]
    pub fn cvc_display(&self) -> &str {
        &self.cvc_display
    }

    /// The hint to show while the CVC field is empty.
    #[inline]
    pub fn cvc_hint(&self) -> &'static str {
        self.brand.cvc_hint()
    }

    /// The raw number digits.
    #[inline]
    pub fn number_digits(&self) -> &[u8] {
        self.number.as_slice()
    }

    /// The raw number as a digit string.
    ///
    /// # Security Warning
    ///
    /// Exposes the full card number. Never log the result.
    pub fn number(&self) -> String {
        self.number.to_digit_string()
    }

    /// The raw CVC as a digit string.
    pub fn cvc(&self) -> String {
        self.cvc.to_digit_string()
    }

    /// The expiry month (1-12), or 0 while the month is still being typed.
    pub fn expiry_month(&self) -> u8 {
        if self.phase > EntryPhase::ExpiryMonth {
            self.month.value() as u8
        } else {
            0
        }
    }

    /// The two-digit expiry year (2030 gives 30), or 0 while the year is
    /// still being typed.
    pub fn expiry_year(&self) -> u8 {
        if self.phase > EntryPhase::ExpiryYear {
            self.year.value() as u8
        } else {
            0
        }
    }

    /// The full expiry date once both halves are typed.
    pub fn expiry(&self) -> Option<ExpiryDate> {
        if self.phase <= EntryPhase::ExpiryYear {
            return None;
        }
        let year = self.config.century().saturating_add(self.year.value() as u16);
        ExpiryDate::new(self.month.value() as u8, year)
    }

    /// Copies the display state for a host view.
    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            phase: self.phase,
            brand: self.brand,
            formatted_number: self.formatted_number.clone(),
            formatted_expiry: self.formatted_expiry.clone(),
            cvc_display: self.cvc_display.clone(),
            error: self.error,
            completed: self.completed,
        }
    }

    // =========================================================================
    // Per-phase transitions
    // =========================================================================

    fn push_number_digit(&mut self, digit: u8) -> bool {
        if self.brand.is_fully_typed(self.number.len()) || !self.number.push(digit) {
            return false;
        }

        let len = self.number.len();
        if len == 2 {
            self.set_brand(guess_brand(self.number.as_slice()));
        }
        if self.brand.is_fully_typed(len) {
            self.finish_number();
        }
        true
    }

    fn pop_number_digit(&mut self) -> bool {
        let removed = self.number.pop().is_some();
        if self.number.len() < 2 {
            self.set_brand(CardBrand::Unknown);
        }
        removed
    }

    fn finish_number(&mut self) {
        let digits = self.number.as_slice();
        match check_number(self.brand, digits) {
            Ok(()) => {
                debug!(brand = %self.brand, number = %mask_digits(digits), "number accepted");
                self.phase = EntryPhase::ExpiryMonth;
            }
            Err(err) => {
                debug!(
                    brand = %self.brand,
                    number = %mask_digits(digits),
                    error = %err,
                    "number rejected"
                );
                self.error = true;
            }
        }
    }

    fn push_month_digit(&mut self, digit: u8) -> bool {
        if !accepts_month_digit(self.month.as_slice(), digit) {
            return false;
        }

        self.month.push(digit);
        if self.month.is_full() {
            self.phase = EntryPhase::ExpiryYear;
        }
        true
    }

    fn push_year_digit(&mut self, digit: u8) -> bool {
        match self.year.len() {
            0 => accepts_year_first_digit(digit) && self.year.push(digit),
            1 => {
                let yy = self.year.value() as u16 * 10 + u16::from(digit);
                let year = self.config.century().saturating_add(yy);
                let month = self.month.value() as u8;
                let (now_year, now_month) = self.clock.year_month();
                if is_before(year, month, now_year, now_month) {
                    trace!("expiry in the past refused");
                    return false;
                }

                self.year.push(digit);
                self.phase = EntryPhase::Cvc;
                true
            }
            _ => false,
        }
    }

    fn push_cvc_digit(&mut self, digit: u8) -> bool {
        self.cvc.len() < self.brand.cvc_digits() && self.cvc.push(digit)
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    fn clear_fields(&mut self) {
        self.phase = EntryPhase::Number;
        self.set_brand(CardBrand::Unknown);
        self.number.clear();
        self.month.clear();
        self.year.clear();
        self.cvc.clear();
        self.error = false;
    }

    fn set_brand(&mut self, brand: CardBrand) {
        if self.brand != brand {
            debug!(from = %self.brand, to = %brand, "brand changed");
            self.brand = brand;
        }
    }

    fn refresh_display(&mut self) {
        self.formatted_number.zeroize();
        write_number(
            &mut self.formatted_number,
            self.number.as_slice(),
            self.brand,
            self.config.number_separator(),
        );

        self.formatted_expiry.zeroize();
        write_expiry(
            &mut self.formatted_expiry,
            self.month.as_slice(),
            self.year.as_slice(),
            self.phase > EntryPhase::ExpiryMonth,
            self.config.expiry_separator(),
        );

        self.cvc_display.zeroize();
        self.cvc_display
            .extend(self.cvc.as_slice().iter().map(|&d| char::from(b'0' + d)));
    }

    fn update_completed(&mut self) {
        let completed =
            self.phase == EntryPhase::Cvc && self.cvc.len() == self.brand.cvc_digits();
        if completed == self.completed {
            return;
        }

        self.completed = completed;
        debug!(completed, "completion changed");
        if let Some(listener) = self.listener.as_mut() {
            listener(completed);
        }
    }
}

fn parse_seed(seed: &str) -> Result<DigitBuffer<MAX_CARD_DIGITS>, EntryError> {
    let mut digits = DigitBuffer::new();
    for (position, character) in seed.chars().enumerate() {
        let digit = character
            .to_digit(10)
            .ok_or(EntryError::InvalidSeedCharacter {
                position,
                character,
            })?;
        if !digits.push(digit as u8) {
            return Err(EntryError::SeedTooLong {
                length: seed.chars().count(),
                maximum: guess_brand(digits.as_slice()).total_digits(),
            });
        }
    }

    let maximum = guess_brand(digits.as_slice()).total_digits();
    if digits.len() > maximum {
        return Err(EntryError::SeedTooLong {
            length: digits.len(),
            maximum,
        });
    }
    Ok(digits)
}

impl<C: Clock> fmt::Debug for CardEntry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardEntry")
            .field("phase", &self.phase)
            .field("brand", &self.brand)
            .field("number", &mask_digits(self.number.as_slice()))
            .field("expiry", &self.formatted_expiry)
            .field("cvc_len", &self.cvc.len())
            .field("error", &self.error)
            .field("completed", &self.completed)
            .field("has_listener", &self.listener.is_some())
            .finish()
    }
}

impl<C: Clock> Drop for CardEntry<C> {
    fn drop(&mut self) {
        self.formatted_number.zeroize();
        self.formatted_expiry.zeroize();
        self.cvc_display.zeroize();
    }
}

/// An owned copy of the display state, wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntrySnapshot {
    /// The field being typed.
    #[zeroize(skip)]
    pub phase: EntryPhase,
    /// The detected brand.
    #[zeroize(skip)]
    pub brand: CardBrand,
    /// The number with separators.
    pub formatted_number: String,
    /// The expiry as typed so far.
    pub formatted_expiry: String,
    /// The CVC digits typed so far.
    pub cvc_display: String,
    /// The sticky number error flag.
    pub error: bool,
    /// The completion flag.
    pub completed: bool,
}

impl fmt::Debug for EntrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: Vec<u8> = strip_formatting(&self.formatted_number)
            .bytes()
            .map(|b| b - b'0')
            .collect();
        f.debug_struct("EntrySnapshot")
            .field("phase", &self.phase)
            .field("brand", &self.brand)
            .field("number", &mask_digits(&digits))
            .field("expiry", &self.formatted_expiry)
            .field("cvc_len", &self.cvc_display.len())
            .field("error", &self.error)
            .field("completed", &self.completed)
            .finish()
    }
}
