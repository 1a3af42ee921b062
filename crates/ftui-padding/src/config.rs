#![forbid(unsafe_code)]

//! Construction-time options for [`PaddingWriter`](crate::PaddingWriter).

use crate::filler::Filler;

/// Escape sequence length (in characters) after which an unterminated
/// sequence is reported.
pub const DEFAULT_ESCAPE_WARN_LEN: usize = 256;

/// Options for a padding writer.
#[derive(Debug)]
pub struct PaddingConfig {
    /// Target visible width per line. Zero disables padding.
    pub width: usize,
    /// How missing columns are filled.
    pub filler: Filler,
    /// Characters an escape sequence may span before a warning is logged.
    /// Zero disables the warning.
    pub escape_warn_len: usize,
}

impl PaddingConfig {
    /// Create options for the given width with space filler.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width,
            filler: Filler::Spaces,
            escape_warn_len: DEFAULT_ESCAPE_WARN_LEN,
        }
    }

    /// Set the filler policy.
    #[must_use]
    pub fn filler(mut self, filler: Filler) -> Self {
        self.filler = filler;
        self
    }

    /// Set the unterminated escape sequence warning threshold.
    #[must_use]
    pub fn escape_warn_len(mut self, len: usize) -> Self {
        self.escape_warn_len = len;
        self
    }
}

impl Default for PaddingConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
