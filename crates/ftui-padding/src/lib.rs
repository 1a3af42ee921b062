#![forbid(unsafe_code)]

//! ANSI-aware line padding for FrankenTUI.
//!
//! This crate right-pads every line of a text stream to a fixed display
//! width. It is meant for table cells, boxes and status lines whose content
//! carries styling escapes and wide glyphs:
//! - [`PaddingWriter`] - streaming `io::Write` padder (buffered or piped)
//! - [`Filler`] - space or custom per-column filler
//! - [`AnsiWriter`] - escape-aware pass-through sink with style reset
//! - [`WriterPool`] - reuse pool backing the one-shot helpers
//! - [`pad_bytes`] / [`pad_str`] - pad a whole input in one call
//!
//! Widths are per codepoint: East-Asian wide glyphs count 2, combining marks
//! and control characters 0. Escape sequences (`ESC` up to and including the
//! first ASCII letter) are passed through and never counted. Lines are never
//! truncated.
//!
//! # Example
//! ```
//! use ftui_padding::{Filler, PaddingWriter, pad_str};
//! use std::io::Write;
//!
//! // One-shot
//! assert_eq!(pad_str("\x1b[31mhi\x1b[0m\n", 5), "\x1b[31mhi\x1b[0m   \n");
//! assert_eq!(pad_str("ab", 4), "ab  ");
//!
//! // Streaming into another writer
//! let mut out = PaddingWriter::pipe(Vec::new(), 4, Filler::repeat('.'));
//! out.write_all("中\nx".as_bytes()).unwrap();
//! out.flush().unwrap();
//! assert_eq!(out.into_inner().unwrap(), "中..\nx...".as_bytes());
//! ```

pub mod ansi;
pub mod config;
pub mod escape;
pub mod filler;
pub mod pool;
pub mod writer;

use std::io::Write;

pub use ansi::{AnsiWriter, SGR_RESET};
pub use config::{DEFAULT_ESCAPE_WARN_LEN, PaddingConfig};
pub use escape::{CharClass, EscapeState, char_width};
pub use filler::{FillFn, Filler};
pub use pool::{DEFAULT_MAX_IDLE, PooledWriter, WriterPool};
pub use writer::PaddingWriter;

/// Pad every line of `input` to `width` columns with spaces.
///
/// A trailing line without `\n` is padded too. Invalid UTF-8 is replaced
/// with U+FFFD.
#[must_use]
pub fn pad_bytes(input: &[u8], width: usize) -> Vec<u8> {
    let mut writer = WriterPool::global().acquire(width);
    // In-memory output with the space filler cannot fail.
    let _ = writer.write_all(input);
    let _ = writer.flush();
    writer.bytes().to_vec()
}

/// Pad every line of `input` to `width` columns with spaces.
#[must_use]
pub fn pad_str(input: &str, width: usize) -> String {
    let padded = pad_bytes(input.as_bytes(), width);
    String::from_utf8(padded)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}
