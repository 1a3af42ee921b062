#![forbid(unsafe_code)]

//! Escape sequence boundary detection and per-codepoint display width.
//!
//! Escape sequences are recognized only by their boundaries: an introducer
//! (`ESC`, `0x1B`) followed by any number of non-letter characters and closed
//! by a single ASCII letter. Nothing inside the sequence is interpreted.
//!
//! ```text
//!            ESC                     ASCII letter
//!   Normal ─────────▶ InEscape ─────────────────▶ Normal
//!     ▲ │                │ ▲
//!     └─┘ printable      └─┘ ESC / other
//! ```
//!
//! # Example
//! ```
//! use ftui_padding::escape::{CharClass, EscapeState};
//!
//! let mut state = EscapeState::default();
//! let classes: Vec<CharClass> = "\x1b[1mA".chars().map(|c| state.classify(c)).collect();
//! assert_eq!(
//!     classes,
//!     [
//!         CharClass::Introducer,
//!         CharClass::Sequence,
//!         CharClass::Sequence,
//!         CharClass::Terminator,
//!         CharClass::Printable,
//!     ]
//! );
//! ```

use unicode_width::UnicodeWidthChar;

/// Escape sequence introducer (`ESC`).
pub const ESC: char = '\x1b';

/// Returns true if `c` starts an escape sequence.
#[inline]
#[must_use]
pub const fn is_introducer(c: char) -> bool {
    c == ESC
}

/// Returns true if `c` closes an open escape sequence.
#[inline]
#[must_use]
pub const fn is_terminator(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Display width of a single codepoint in terminal cells.
///
/// Control characters (including `\n`) and combining marks are 0 wide,
/// East-Asian wide and fullwidth characters are 2, everything else is 1.
#[inline]
#[must_use]
pub fn char_width(c: char) -> usize {
    if c.is_ascii() {
        return usize::from(!c.is_ascii_control());
    }
    c.width().unwrap_or(0)
}

/// What a character means to the padding logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// `ESC`: opens (or restarts) an escape sequence.
    Introducer,
    /// A character inside an open escape sequence.
    Sequence,
    /// The ASCII letter that closed the sequence.
    Terminator,
    /// Visible content outside any escape sequence.
    Printable,
}

impl CharClass {
    /// Whether the character may contribute to the visible line width.
    #[inline]
    #[must_use]
    pub const fn is_printable(self) -> bool {
        matches!(self, Self::Printable)
    }
}

/// Two-state escape sequence machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EscapeState {
    /// Outside of any escape sequence.
    #[default]
    Normal,
    /// Between an introducer and its terminating letter.
    InEscape,
}

impl EscapeState {
    /// Classify `c` and advance the state.
    #[inline]
    pub fn classify(&mut self, c: char) -> CharClass {
        if is_introducer(c) {
            *self = Self::InEscape;
            return CharClass::Introducer;
        }
        match self {
            Self::InEscape if is_terminator(c) => {
                *self = Self::Normal;
                CharClass::Terminator
            }
            Self::InEscape => CharClass::Sequence,
            Self::Normal => CharClass::Printable,
        }
    }

    /// Returns true while an escape sequence is open.
    #[inline]
    #[must_use]
    pub const fn is_in_escape(self) -> bool {
        matches!(self, Self::InEscape)
    }

    /// Return to [`EscapeState::Normal`].
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::Normal;
    }
}
