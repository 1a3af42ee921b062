#![forbid(unsafe_code)]

//! Streaming line padder.
//!
//! [`PaddingWriter`] right-pads every line written through it to a fixed
//! display width. Widths are measured per codepoint (wide glyphs count 2,
//! combining marks 0) and escape sequences never count, so styled content
//! lines up with plain content.
//!
//! # Lifecycle
//!
//! 1. Construct with [`PaddingWriter::new`] (buffered) or
//!    [`PaddingWriter::pipe`] (forwarding to another writer).
//! 2. Write any number of byte chunks. Chunks may split lines, escape
//!    sequences and even multi-byte characters anywhere.
//! 3. Call [`PaddingWriter::flush`]. A trailing line without `\n` is padded
//!    here, and the buffered flavor publishes its output.
//! 4. Read the result with [`PaddingWriter::bytes`] or
//!    [`PaddingWriter::as_str`].
//!
//! # Example
//!
//! ```
//! use ftui_padding::{Filler, PaddingWriter};
//! use std::io::Write;
//!
//! let mut writer = PaddingWriter::new(6, Filler::Spaces);
//! writer.write_all("\x1b[1mok\x1b[0m\n世界\nlonger line\nend".as_bytes()).unwrap();
//! writer.flush().unwrap();
//!
//! assert_eq!(
//!     writer.as_str(),
//!     "\x1b[1mok\x1b[0m    \n世界  \nlonger line\nend   "
//! );
//! ```
//!
//! # Unterminated escape sequences
//!
//! An introducer that is never followed by an ASCII letter keeps the writer
//! in escape mode, so nothing after it counts toward the line width. Such
//! input is passed through unchanged; a `WARN` event is logged once the
//! sequence exceeds [`PaddingConfig::escape_warn_len`] characters.

use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::ansi::AnsiWriter;
use crate::config::PaddingConfig;
use crate::escape::{CharClass, EscapeState, char_width};
use crate::filler::Filler;

/// Where padded output goes.
#[derive(Debug)]
enum Output<W> {
    /// Collected internally until [`PaddingWriter::flush`].
    Buffered(Vec<u8>),
    /// Forwarded to a caller-supplied writer.
    Piped(W),
}

impl<W: Write> Write for Output<W> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Buffered(out) => {
                out.extend_from_slice(buf);
                Ok(buf.len())
            }
            Self::Piped(out) => out.write(buf),
        }
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Buffered(out) => {
                out.extend_from_slice(buf);
                Ok(())
            }
            Self::Piped(out) => out.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Buffered(_) => Ok(()),
            Self::Piped(out) => out.flush(),
        }
    }
}

/// A writer that pads each line to a fixed display width.
///
/// The type parameter is the forward writer of the pipe flavor. Buffered
/// writers use the default, [`io::Sink`], which is never written to.
///
/// # Thread Safety
/// A writer holds per-line state and must have a single user. Share one
/// across threads only behind a lock; prefer
/// [`WriterPool`](crate::WriterPool) for one writer per task.
#[derive(Debug)]
pub struct PaddingWriter<W = io::Sink> {
    /// Escape-aware sink in front of the output.
    sink: AnsiWriter<Output<W>>,
    /// Finalized output of the buffered flavor.
    cache: Vec<u8>,
    /// Target visible width. Zero disables padding.
    width: usize,
    filler: Filler,
    /// Visible width of the current line so far.
    line_width: usize,
    escape: EscapeState,
    /// Characters in the open escape sequence.
    escape_len: usize,
    escape_warn_len: usize,
    /// Incomplete UTF-8 sequence carried over from the previous write.
    pending: SmallVec<[u8; 4]>,
}

impl PaddingWriter {
    /// Create a buffered writer.
    ///
    /// Output is available from [`bytes`](Self::bytes) and
    /// [`as_str`](Self::as_str) after [`flush`](Self::flush).
    #[must_use]
    pub fn new(width: usize, filler: Filler) -> Self {
        Self::with_config(PaddingConfig::new(width).filler(filler))
    }

    /// Create a buffered writer from full options.
    #[must_use]
    pub fn with_config(config: PaddingConfig) -> Self {
        Self::from_output(Output::Buffered(Vec::new()), config)
    }

    /// Bytes of buffer capacity this writer holds on to.
    pub(crate) fn retained_capacity(&self) -> usize {
        let buffered = match self.sink.get_ref() {
            Output::Buffered(out) => out.capacity(),
            Output::Piped(_) => 0,
        };
        self.cache.capacity() + buffered
    }

    /// Prepare a pooled writer for another use.
    pub(crate) fn reset(&mut self, width: usize) {
        self.width = width;
        self.filler = Filler::Spaces;
        self.line_width = 0;
        self.escape.reset();
        self.escape_len = 0;
        self.pending.clear();
        self.cache.clear();
        self.sink.clear();
        if let Output::Buffered(out) = self.sink.get_mut() {
            out.clear();
        }
    }
}

impl Default for PaddingWriter {
    /// A buffered writer with padding disabled.
    fn default() -> Self {
        Self::with_config(PaddingConfig::default())
    }
}

impl<W> PaddingWriter<W> {
    fn from_output(output: Output<W>, config: PaddingConfig) -> Self {
        Self {
            sink: AnsiWriter::new(output),
            cache: Vec::new(),
            width: config.width,
            filler: config.filler,
            line_width: 0,
            escape: EscapeState::Normal,
            escape_len: 0,
            escape_warn_len: config.escape_warn_len,
            pending: SmallVec::new(),
        }
    }

    /// Target visible width.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Change the target width. Applies from the next line fill on.
    #[inline]
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
    }

    /// Replace the filler policy.
    #[inline]
    pub fn set_filler(&mut self, filler: Filler) {
        self.filler = filler;
    }

    /// Visible width of the current, unfinished line.
    #[inline]
    #[must_use]
    pub fn line_width(&self) -> usize {
        self.line_width
    }

    /// Whether an escape sequence is open.
    #[inline]
    #[must_use]
    pub fn is_in_escape(&self) -> bool {
        self.escape.is_in_escape()
    }

    /// Finalized output as bytes.
    ///
    /// Only meaningful after [`flush`](Self::flush); before that it holds
    /// the previous flush's output (or nothing). Always empty for pipe
    /// writers.
    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.cache
    }

    /// Finalized output as text. Same precondition as [`bytes`](Self::bytes).
    #[must_use]
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.cache)
    }

    /// The forward writer, for pipe writers.
    #[must_use]
    pub fn get_ref(&self) -> Option<&W> {
        match self.sink.get_ref() {
            Output::Piped(out) => Some(out),
            Output::Buffered(_) => None,
        }
    }

    /// Consume the writer and return the forward writer, for pipe writers.
    ///
    /// Call [`flush`](Self::flush) first; unflushed state is discarded.
    pub fn into_inner(self) -> Option<W> {
        match self.sink.into_inner() {
            Output::Piped(out) => Some(out),
            Output::Buffered(_) => None,
        }
    }
}

impl<W: Write> PaddingWriter<W> {
    /// Create a writer that forwards padded output to `forward`.
    pub fn pipe(forward: W, width: usize, filler: Filler) -> Self {
        Self::pipe_with_config(forward, PaddingConfig::new(width).filler(filler))
    }

    /// Create a pipe writer from full options.
    pub fn pipe_with_config(forward: W, config: PaddingConfig) -> Self {
        Self::from_output(Output::Piped(forward), config)
    }

    /// Finish the current output.
    ///
    /// Pads a trailing line that has visible content, without adding a line
    /// break. Bytes of an unfinished escape sequence or character are passed
    /// through. The buffered flavor then publishes everything written so far
    /// to [`bytes`](Self::bytes); the pipe flavor flushes its forward writer.
    /// Line and escape state are reset, so the writer can be reused.
    ///
    /// # Errors
    ///
    /// Returns the forward writer's or the filler's error.
    pub fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            self.pending.clear();
            let mut buf = [0u8; 4];
            self.write_text(char::REPLACEMENT_CHARACTER.encode_utf8(&mut buf))?;
        }
        self.sink.flush_pending()?;
        if self.line_width != 0 {
            self.fill_line()?;
        }

        self.cache.clear();
        match self.sink.get_mut() {
            Output::Buffered(out) => std::mem::swap(&mut self.cache, out),
            Output::Piped(out) => out.flush()?,
        }
        debug!(bytes = self.cache.len(), width = self.width, "padding flushed");

        self.line_width = 0;
        self.escape.reset();
        self.escape_len = 0;
        Ok(())
    }

    /// Alias for [`flush`](Self::flush).
    ///
    /// # Errors
    ///
    /// Same as [`flush`](Self::flush).
    #[inline]
    pub fn close(&mut self) -> io::Result<()> {
        self.flush()
    }

    /// Process every complete character in `bytes`.
    ///
    /// Invalid sequences become U+FFFD. Returns the offset of an incomplete
    /// trailing sequence, or `bytes.len()`.
    fn decode(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let mut rest = bytes;
        loop {
            let err = match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.write_text(text)?;
                    return Ok(bytes.len());
                }
                Err(err) => err,
            };
            let (valid, tail) = rest.split_at(err.valid_up_to());
            if let Ok(text) = std::str::from_utf8(valid) {
                self.write_text(text)?;
            }
            match err.error_len() {
                None => return Ok(bytes.len() - tail.len()),
                Some(len) => {
                    let mut buf = [0u8; 4];
                    self.write_text(char::REPLACEMENT_CHARACTER.encode_utf8(&mut buf))?;
                    rest = &tail[len..];
                }
            }
        }
    }

    /// Classify, measure and forward decoded text.
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        // Start of the bytes not yet forwarded.
        let mut run = 0;
        for (i, c) in text.char_indices() {
            match self.escape.classify(c) {
                CharClass::Introducer => self.escape_len = 0,
                CharClass::Sequence => self.note_escape_char(),
                CharClass::Terminator => {}
                CharClass::Printable => {
                    self.line_width += char_width(c);
                    if c == '\n' {
                        self.sink.write_all(&text.as_bytes()[run..i])?;
                        run = i;
                        self.end_line()?;
                    }
                }
            }
        }
        self.sink.write_all(&text.as_bytes()[run..])
    }

    fn note_escape_char(&mut self) {
        self.escape_len += 1;
        if self.escape_warn_len != 0 && self.escape_len == self.escape_warn_len {
            warn!(
                chars = self.escape_len,
                line_width = self.line_width,
                "escape sequence still unterminated; following text does not count toward line width"
            );
        }
    }

    /// Fill the finished line, close its styling and start the next one.
    ///
    /// With padding disabled nothing is injected, not even the reset.
    fn end_line(&mut self) -> io::Result<()> {
        if self.width != 0 {
            self.fill_line()?;
            self.sink.reset_ansi()?;
        }
        self.line_width = 0;
        Ok(())
    }

    fn fill_line(&mut self) -> io::Result<()> {
        if self.width == 0 || self.line_width >= self.width {
            return Ok(());
        }
        let shortfall = self.width - self.line_width;
        trace!(
            width = self.width,
            line_width = self.line_width,
            shortfall,
            "filling line"
        );
        self.filler.fill(&mut self.sink, shortfall)
    }
}

impl<W: Write> Write for PaddingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.pending.is_empty() {
            let done = self.decode(buf)?;
            self.pending.extend_from_slice(&buf[done..]);
        } else {
            // A character was split across writes.
            let mut joined = Vec::with_capacity(self.pending.len() + buf.len());
            joined.extend_from_slice(&self.pending);
            joined.extend_from_slice(buf);
            self.pending.clear();
            let done = self.decode(&joined)?;
            self.pending.extend_from_slice(&joined[done..]);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        PaddingWriter::flush(self)
    }
}

impl<W> fmt::Display for PaddingWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}
