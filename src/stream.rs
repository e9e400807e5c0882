//! Key events and replaying them through an entry.
//!
//! Host views push events one at a time; scripted callers (tests, the
//! terminal harness) can drive a [`CardEntry`] from any iterator of events
//! instead.
//!
//! # Example
//!
//! ```
//! use card_entry::stream::{parse_keys, ReplayExt};
//! use card_entry::{CardEntry, FixedClock};
//!
//! let mut entry = CardEntry::with_clock(FixedClock::new(2026, 10).unwrap());
//! let keys = parse_keys("4111 1111 1111 1111 1230 123").unwrap();
//!
//! let accepted = keys
//!     .into_iter()
//!     .replay_into(&mut entry)
//!     .filter(|(_, result)| matches!(result, Ok(outcome) if outcome.is_accepted()))
//!     .count();
//!
//! assert_eq!(accepted, 23);
//! assert!(entry.is_completed());
//! ```

use crate::entry::{CardEntry, KeyOutcome};
use crate::error::EntryError;
use crate::expiry::Clock;

/// A single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// A digit key (0-9).
    Digit(u8),
    /// The delete key.
    Backspace,
}

impl KeyEvent {
    /// Maps a script character to a key.
    ///
    /// Digits map to [`KeyEvent::Digit`]; `<`, ASCII backspace and DEL map to
    /// [`KeyEvent::Backspace`].
    #[inline]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c as u8 - b'0')),
            '<' | '\u{8}' | '\u{7f}' => Some(Self::Backspace),
            _ => None,
        }
    }
}

/// Parses a key script.
///
/// Whitespace is skipped so scripts can be grouped for readability.
///
/// # Example
///
/// ```
/// use card_entry::stream::{parse_keys, KeyEvent};
///
/// let keys = parse_keys("41 <").unwrap();
/// assert_eq!(keys, vec![KeyEvent::Digit(4), KeyEvent::Digit(1), KeyEvent::Backspace]);
/// assert!(parse_keys("41x").is_err());
/// ```
pub fn parse_keys(script: &str) -> Result<Vec<KeyEvent>, EntryError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, character)| {
            KeyEvent::from_char(character).ok_or(EntryError::InvalidKey {
                position,
                character,
            })
        })
        .collect()
}

/// Applies each event of the inner iterator to an entry as it is pulled.
///
/// Yields every event together with its outcome.
#[derive(Debug)]
pub struct Replay<'a, I, C: Clock> {
    inner: I,
    entry: &'a mut CardEntry<C>,
}

impl<'a, I, C: Clock> Replay<'a, I, C> {
    /// Creates a new Replay driving `entry`.
    #[inline]
    pub fn new(inner: I, entry: &'a mut CardEntry<C>) -> Self {
        Self { inner, entry }
    }
}

impl<I, C> Iterator for Replay<'_, I, C>
where
    I: Iterator<Item = KeyEvent>,
    C: Clock,
{
    type Item = (KeyEvent, Result<KeyOutcome, EntryError>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|event| (event, self.entry.apply(event)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I, C> ExactSizeIterator for Replay<'_, I, C>
where
    I: ExactSizeIterator<Item = KeyEvent>,
    C: Clock,
{
}

/// Extension trait for driving an entry from any iterator of key events.
pub trait ReplayExt: Iterator<Item = KeyEvent> + Sized {
    /// Lazily applies each event to `entry`.
    fn replay_into<C: Clock>(self, entry: &mut CardEntry<C>) -> Replay<'_, Self, C>;

    /// Applies every event and returns how many were accepted.
    ///
    /// # Errors
    ///
    /// Stops at the first event the entry reports as [`EntryError`]; events
    /// before it stay applied.
    fn apply_all<C: Clock>(self, entry: &mut CardEntry<C>) -> Result<usize, EntryError> {
        let mut accepted = 0;
        for (_, result) in self.replay_into(entry) {
            if result?.is_accepted() {
                accepted += 1;
            }
        }
        Ok(accepted)
    }
}

impl<I: Iterator<Item = KeyEvent>> ReplayExt for I {
    #[inline]
    fn replay_into<C: Clock>(self, entry: &mut CardEntry<C>) -> Replay<'_, Self, C> {
        Replay::new(self, entry)
    }
}
