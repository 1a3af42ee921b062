#![forbid(unsafe_code)]

//! Reuse pool for buffered padding writers.
//!
//! One-shot padding allocates an output buffer per call. The pool keeps a
//! bounded free list of writers so their buffers are reused. It has no
//! observable effect on output.
//!
//! # Usage
//!
//! ```
//! use ftui_padding::WriterPool;
//! use std::io::Write;
//!
//! let pool = WriterPool::new(4);
//! {
//!     let mut writer = pool.acquire(5);
//!     writer.write_all(b"abc").unwrap();
//!     writer.flush().unwrap();
//!     assert_eq!(writer.as_str(), "abc  ");
//! } // returned to the pool here
//! assert_eq!(pool.idle(), 1);
//! ```

use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, OnceLock};

use tracing::trace;

use crate::writer::PaddingWriter;

/// Default number of idle writers kept by [`WriterPool::global`].
pub const DEFAULT_MAX_IDLE: usize = 32;

/// Idle writers whose buffers grew beyond this many bytes are dropped
/// instead of pooled.
const MAX_RETAINED_CAPACITY: usize = 64 * 1024;

static GLOBAL: OnceLock<WriterPool> = OnceLock::new();

/// A thread-safe free list of buffered [`PaddingWriter`]s.
#[derive(Debug)]
pub struct WriterPool {
    idle: Mutex<Vec<PaddingWriter>>,
    max_idle: usize,
}

impl WriterPool {
    /// Create an empty pool that keeps at most `max_idle` idle writers.
    #[must_use]
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// The process-wide pool used by the one-shot helpers.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| Self::new(DEFAULT_MAX_IDLE))
    }

    /// Check out a writer with the given width and space filler.
    ///
    /// The writer comes back with empty buffers and no line or escape
    /// state. It returns to the pool when the guard is dropped.
    pub fn acquire(&self, width: usize) -> PooledWriter<'_> {
        let reused = self.idle.lock().unwrap_or_else(|e| e.into_inner()).pop();
        let writer = match reused {
            Some(mut writer) => {
                trace!(width, "reusing pooled padding writer");
                writer.reset(width);
                writer
            }
            None => PaddingWriter::new(width, Default::default()),
        };
        PooledWriter { pool: self, writer }
    }

    /// Number of idle writers.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.idle.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Maximum number of idle writers kept.
    #[inline]
    #[must_use]
    pub fn max_idle(&self) -> usize {
        self.max_idle
    }

    /// Drop all idle writers.
    pub fn clear(&self) {
        self.idle.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn release(&self, writer: PaddingWriter) {
        if writer.retained_capacity() > MAX_RETAINED_CAPACITY {
            return;
        }
        let mut idle = self.idle.lock().unwrap_or_else(|e| e.into_inner());
        if idle.len() < self.max_idle {
            idle.push(writer);
        }
    }
}

impl Default for WriterPool {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IDLE)
    }
}

/// A writer checked out of a [`WriterPool`].
///
/// Dereferences to [`PaddingWriter`] and returns it to the pool on drop.
#[derive(Debug)]
pub struct PooledWriter<'a> {
    pool: &'a WriterPool,
    writer: PaddingWriter,
}

impl PooledWriter<'_> {
    /// Detach the writer from the pool.
    ///
    /// The pool gets an empty writer in its place.
    #[must_use]
    pub fn into_inner(mut self) -> PaddingWriter {
        std::mem::take(&mut self.writer)
    }
}

impl Deref for PooledWriter<'_> {
    type Target = PaddingWriter;

    #[inline]
    fn deref(&self) -> &PaddingWriter {
        &self.writer
    }
}

impl DerefMut for PooledWriter<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut PaddingWriter {
        &mut self.writer
    }
}

impl Drop for PooledWriter<'_> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.writer));
    }
}
