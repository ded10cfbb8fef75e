//! Scanner: a forward-only cursor over a growable window of a byte stream.
//!
//! The scanner owns one buffer. Bytes between `start` and the cursor form the
//! *window*: everything advanced over since the last release. Callers borrow
//! the window (see [`Scanner::bytes`]) instead of copying it, and the borrow
//! checker keeps that borrow from outliving the next refill.
//!
//! Refills only happen when a request runs past the buffered bytes. A refill
//! first compacts the window to offset 0, then doubles the buffer while the
//! free tail is smaller than both the outstanding request and the threshold,
//! then reads until the request is covered or the source is exhausted.
//!
//! Invariants
//! - `start <= end <= filled <= buf.len()`; `end` is one past the cursor.
//! - `base + end - 1` is the absolute stream index of the cursor byte, and
//!   never moves backwards across compaction or growth.
//! - Once the source reports exhaustion no further reads are issued.
use std::{
    io::{self, Read},
    ops::Range,
};

use crate::{error::ScanError, options::ParserOptions};

/// Buffered byte cursor over any [`Read`] source.
///
/// # Examples
///
/// ```rust
/// use jsonstruct::{ParserOptions, Scanner};
///
/// let mut s = Scanner::with_options(&b"ABCDEF"[..], ParserOptions::with_buffer_size(4));
/// s.scan(2).unwrap();
/// assert_eq!(s.bytes(), b"AB");
/// s.scan(3).unwrap();
/// assert_eq!(s.current(), b'E');
/// assert_eq!(s.index(), 4);
/// assert_eq!(s.bytes(), b"CDE");
/// ```
#[derive(Debug)]
pub struct Scanner<R> {
    reader: R,
    buf: Vec<u8>,
    filled: usize,
    start: usize,
    end: usize,
    base: u64,
    threshold: usize,
    finished: bool,
}

impl<R: Read> Scanner<R> {
    /// Creates a scanner with the default 4096-byte buffer.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ParserOptions::default())
    }

    /// Creates a scanner with explicit buffer tuning.
    pub fn with_options(reader: R, options: ParserOptions) -> Self {
        Self {
            reader,
            buf: vec![0; options.buffer_size.max(1)],
            filled: 0,
            start: 0,
            end: 0,
            base: 0,
            threshold: options.threshold,
            finished: false,
        }
    }

    /// The byte under the cursor, or `0` when nothing is under it: before the
    /// first advance, or right after [`Scanner::bytes`] released it.
    #[must_use]
    pub fn current(&self) -> u8 {
        if self.end == 0 || self.end <= self.start {
            0
        } else {
            self.buf[self.end - 1]
        }
    }

    /// Absolute stream index of the cursor byte; `-1` before the first
    /// advance.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn index(&self) -> i64 {
        (self.base + self.end as u64) as i64 - 1
    }

    /// Advances the cursor by one byte.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfStream`] when the source is exhausted; the cursor
    /// stays on the last byte. [`ScanError::Io`] when the reader fails.
    pub fn next(&mut self) -> Result<(), ScanError> {
        self.scan(1)
    }

    /// Advances the cursor by `n` bytes, reading more input if needed.
    ///
    /// When the source runs out first, the cursor moves to the last byte the
    /// source produced and [`ScanError::EndOfStream`] is returned; the
    /// partial window remains available through [`Scanner::bytes`].
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfStream`] or [`ScanError::Io`], as for
    /// [`Scanner::next`].
    pub fn scan(&mut self, n: usize) -> Result<(), ScanError> {
        let target = self.end.saturating_add(n);
        if target <= self.filled {
            self.end = target;
            return Ok(());
        }
        if self.finished {
            self.end = self.filled;
            return Err(ScanError::EndOfStream);
        }

        let target = target - self.compact();
        self.reserve(target - self.filled);
        self.fill(target)?;

        if target <= self.filled {
            self.end = target;
            Ok(())
        } else {
            self.end = self.filled;
            Err(ScanError::EndOfStream)
        }
    }

    /// Returns the window, from the last release through the cursor byte,
    /// and releases it.
    pub fn bytes(&mut self) -> &[u8] {
        let window = self.start..self.end;
        self.start = self.end;
        &self.buf[window]
    }

    /// Every buffered byte, released or not. For diagnostics.
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buf[..self.filled]
    }

    /// Buffer offsets of the unreleased window, cursor byte included.
    #[must_use]
    pub fn window(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Total bytes released so far over the life of the scanner.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.base + self.start as u64
    }

    /// Current buffer capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Consumes the scanner, returning the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// The unreleased window without releasing it.
    pub(crate) fn peek_window(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    /// The first `len` bytes of the window.
    pub(crate) fn window_prefix(&self, len: usize) -> &[u8] {
        debug_assert!(self.start + len <= self.end);
        &self.buf[self.start..self.start + len]
    }

    /// Releases everything up to, but not including, the cursor byte.
    pub(crate) fn release_before_cursor(&mut self) {
        self.start = self.end.saturating_sub(1).max(self.start);
    }

    /// Releases the whole window, cursor byte included.
    pub(crate) fn release(&mut self) {
        self.start = self.end;
    }

    /// Returns `true` once the source reported exhaustion.
    #[cfg(test)]
    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    /// Moves the unreleased window to offset 0 and returns the distance
    /// moved.
    fn compact(&mut self) -> usize {
        let shift = self.start;
        if shift == 0 {
            return 0;
        }
        #[cfg(trace_scanner)]
        eprintln!(
            "scanner: compact {} bytes by {shift} (capacity {})",
            self.filled - shift,
            self.buf.len()
        );
        self.buf.copy_within(shift..self.filled, 0);
        self.filled -= shift;
        self.end -= shift;
        self.start = 0;
        self.base += shift as u64;
        shift
    }

    /// Doubles the buffer until the free tail holds `missing` bytes and the
    /// threshold.
    fn reserve(&mut self, missing: usize) {
        let wanted = missing.max(self.threshold);
        let mut capacity = self.buf.len();
        while capacity - self.filled < wanted && capacity < usize::MAX {
            capacity = capacity.saturating_mul(2);
        }
        if capacity != self.buf.len() {
            #[cfg(trace_scanner)]
            eprintln!("scanner: grow {} -> {capacity}", self.buf.len());
            self.buf.resize(capacity, 0);
        }
    }

    /// Reads until `target` bytes are buffered or the source is exhausted.
    fn fill(&mut self, target: usize) -> Result<(), ScanError> {
        while self.filled < target {
            match self.reader.read(&mut self.buf[self.filled..]) {
                Ok(0) => {
                    self.finished = true;
                    break;
                }
                Ok(read) => self.filled += read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(ScanError::Io(e)),
            }
        }
        debug_assert!(self.filled <= self.buf.len());
        Ok(())
    }
}
