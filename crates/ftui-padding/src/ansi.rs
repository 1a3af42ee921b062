#![forbid(unsafe_code)]

//! Escape-aware pass-through writer.
//!
//! [`AnsiWriter`] forwards everything it receives to an inner writer. Visible
//! content goes through immediately; escape sequences are collected from
//! introducer to terminator and forwarded as a single write. Along the way
//! it remembers which SGR (`CSI ... m`) sequences are still open so callers
//! can close styling before filler and reopen it afterwards.
//!
//! # Usage
//!
//! ```
//! use ftui_padding::ansi::AnsiWriter;
//! use std::io::Write;
//!
//! let mut writer = AnsiWriter::new(Vec::new());
//! writer.write_all(b"\x1b[1mbold").unwrap();
//! assert_eq!(writer.last_sequence(), b"\x1b[1m");
//!
//! writer.reset_ansi().unwrap();
//! assert_eq!(writer.get_ref().as_slice(), b"\x1b[1mbold\x1b[0m");
//! ```

use std::io::{self, Write};

use smallvec::SmallVec;

use crate::escape::{CharClass, EscapeState};

/// SGR reset: `CSI 0 m`
pub const SGR_RESET: &[u8] = b"\x1b[0m";

/// Inline capacity for a collected escape sequence. Typical SGR sequences,
/// including 256-color and truecolor forms, fit without allocating.
const SEQ_INLINE: usize = 24;

/// Returns true if a complete sequence clears all styling.
#[inline]
fn is_sgr_reset(seq: &[u8]) -> bool {
    seq.ends_with(b"[0m") || seq.ends_with(b"[m")
}

/// A writer that forwards bytes while tracking escape sequence boundaries.
///
/// Works at the byte level: `ESC` and the ASCII terminators never appear
/// inside a multi-byte UTF-8 sequence, so no decoding is needed.
#[derive(Debug)]
pub struct AnsiWriter<W> {
    /// The forward writer.
    inner: W,
    /// Boundary state for the sequence being collected.
    state: EscapeState,
    /// Bytes of the escape sequence collected so far.
    seq: SmallVec<[u8; SEQ_INLINE]>,
    /// SGR sequences seen since the last reset.
    last_seq: Vec<u8>,
    /// Whether any sequence was seen since styling was last reset.
    style_changed: bool,
}

impl<W> AnsiWriter<W> {
    /// Create a new writer forwarding to `inner`.
    #[inline]
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            state: EscapeState::Normal,
            seq: SmallVec::new(),
            last_seq: Vec::new(),
            style_changed: false,
        }
    }

    /// Open SGR styling, as the concatenation of every SGR sequence seen
    /// since the last reset.
    #[inline]
    #[must_use]
    pub fn last_sequence(&self) -> &[u8] {
        &self.last_seq
    }

    /// Whether a sequence is currently being collected.
    #[inline]
    #[must_use]
    pub fn in_sequence(&self) -> bool {
        self.state.is_in_escape()
    }

    /// Whether styling may be active on the forward writer.
    #[inline]
    #[must_use]
    pub fn style_changed(&self) -> bool {
        self.style_changed
    }

    /// Drop any partial sequence and forget tracked styling.
    pub fn clear(&mut self) {
        self.state.reset();
        self.seq.clear();
        self.last_seq.clear();
        self.style_changed = false;
    }

    /// Get a reference to the forward writer.
    #[inline]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Get a mutable reference to the forward writer.
    ///
    /// Bytes written directly bypass sequence tracking.
    #[inline]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Consume the writer and return the forward writer.
    ///
    /// A partially collected sequence is discarded.
    #[inline]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> AnsiWriter<W> {
    /// Close any styling opened since the last reset.
    ///
    /// Writes [`SGR_RESET`] only if a sequence was seen since styling was
    /// last cleared; otherwise writes nothing.
    pub fn reset_ansi(&mut self) -> io::Result<()> {
        if !self.style_changed {
            return Ok(());
        }
        self.inner.write_all(SGR_RESET)?;
        self.style_changed = false;
        Ok(())
    }

    /// Re-emit the styling that was open before the last [`reset_ansi`].
    ///
    /// [`reset_ansi`]: AnsiWriter::reset_ansi
    pub fn restore_ansi(&mut self) -> io::Result<()> {
        if self.last_seq.is_empty() {
            return Ok(());
        }
        self.inner.write_all(&self.last_seq)?;
        self.style_changed = true;
        Ok(())
    }

    /// Forward a partially collected sequence as-is.
    ///
    /// Used when the input ends inside a sequence so no bytes are lost.
    pub fn flush_pending(&mut self) -> io::Result<()> {
        if !self.seq.is_empty() {
            self.inner.write_all(&self.seq)?;
            self.seq.clear();
        }
        self.state.reset();
        Ok(())
    }

    fn finish_sequence(&mut self, terminator: u8) -> io::Result<()> {
        if is_sgr_reset(&self.seq) {
            self.last_seq.clear();
            self.style_changed = false;
        } else if terminator == b'm' {
            self.last_seq.extend_from_slice(&self.seq);
        }
        self.inner.write_all(&self.seq)?;
        self.seq.clear();
        Ok(())
    }
}

impl<W: Write> Write for AnsiWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Start of the current run of visible bytes.
        let mut run = 0;
        for (i, &b) in buf.iter().enumerate() {
            match self.state.classify(char::from(b)) {
                CharClass::Printable => continue,
                CharClass::Introducer => {
                    if run < i {
                        self.inner.write_all(&buf[run..i])?;
                    }
                    self.style_changed = true;
                    self.seq.push(b);
                }
                CharClass::Sequence => self.seq.push(b),
                CharClass::Terminator => {
                    self.seq.push(b);
                    self.finish_sequence(b)?;
                }
            }
            run = i + 1;
        }
        if run < buf.len() {
            self.inner.write_all(&buf[run..])?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
