#![forbid(unsafe_code)]

//! Filler policies for the columns a short line is missing.

use std::fmt;
use std::io::{self, Write};

/// Procedure invoked once per missing column.
///
/// It must write exactly one column of visible content; the output is not
/// re-measured. Escape sequences may be included (e.g. a styled dot).
pub type FillFn = Box<dyn FnMut(&mut dyn Write) -> io::Result<()> + Send>;

/// How the missing columns of a short line are filled.
#[derive(Default)]
pub enum Filler {
    /// Literal spaces, written in a single call.
    #[default]
    Spaces,
    /// A caller-supplied procedure, invoked once per missing column.
    Custom(FillFn),
}

impl Filler {
    /// Wrap a per-column procedure.
    ///
    /// ```
    /// use ftui_padding::{Filler, PaddingWriter};
    /// use std::io::Write;
    ///
    /// let filler = Filler::custom(|w| w.write_all(b"\x1b[2m.\x1b[0m"));
    /// let mut writer = PaddingWriter::new(3, filler);
    /// writer.write_all(b"a").unwrap();
    /// writer.flush().unwrap();
    /// assert_eq!(writer.as_str(), "a\x1b[2m.\x1b[0m\x1b[2m.\x1b[0m");
    /// ```
    pub fn custom<F>(fill: F) -> Self
    where
        F: FnMut(&mut dyn Write) -> io::Result<()> + Send + 'static,
    {
        Self::Custom(Box::new(fill))
    }

    /// Repeat a single character per missing column.
    ///
    /// The character should be one column wide; wide characters overshoot.
    #[must_use]
    pub fn repeat(c: char) -> Self {
        if c == ' ' {
            return Self::Spaces;
        }
        let mut encoded = [0u8; 4];
        let len = c.encode_utf8(&mut encoded).len();
        Self::custom(move |w| w.write_all(&encoded[..len]))
    }

    /// Returns true for the default space policy.
    #[inline]
    #[must_use]
    pub fn is_spaces(&self) -> bool {
        matches!(self, Self::Spaces)
    }

    /// Write `columns` columns of filler into `out`.
    pub(crate) fn fill<W: Write>(&mut self, out: &mut W, columns: usize) -> io::Result<()> {
        match self {
            Self::Spaces => write_spaces(out, columns),
            Self::Custom(fill) => {
                for _ in 0..columns {
                    fill(&mut *out)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Filler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spaces => f.write_str("Spaces"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Spaces available without allocating.
const SPACES: &[u8; 64] = &[b' '; 64];

/// Write `count` spaces. A single forwarding call for typical widths.
fn write_spaces<W: Write>(out: &mut W, count: usize) -> io::Result<()> {
    if count <= SPACES.len() {
        return out.write_all(&SPACES[..count]);
    }
    out.write_all(&vec![b' '; count])
}
